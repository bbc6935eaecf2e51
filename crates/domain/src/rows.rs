use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Column names of the DNS relation, in positional order.
pub const DNS_COLUMNS: [&str; 7] = [
    "domain",
    "section",
    "class",
    "type",
    "ttl",
    "nameserver",
    "data",
];

/// Column names of the search-list relation, in positional order.
pub const SEARCH_LIST_COLUMNS: [&str; 3] = ["partial", "ndots", "candidate"];

/// Message section a row was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Answer,
    Authority,
    Extra,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Extra => "extra",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecordRow {
    pub domain: Arc<str>,
    pub section: Section,
    pub class: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub nameserver: Arc<str>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCandidateRow {
    pub partial: Arc<str>,
    pub ndots: u32,
    pub candidate: String,
}
