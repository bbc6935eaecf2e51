use serde::Serialize;
use std::sync::Arc;

/// One resource record of a decoded response, with type-specific data
/// already rendered as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    pub name: Arc<str>,
    pub record_type: String,
    pub class: String,
    pub ttl: u32,
    pub data: serde_json::Value,
}

/// A decoded DNS response, independent of the wire library that produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseMessage {
    pub id: u16,
    pub rcode: String,
    pub truncated: bool,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl ResponseMessage {
    pub fn record_count(&self) -> usize {
        self.answers.len() + self.authority.len() + self.additional.len()
    }
}
