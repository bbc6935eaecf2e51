use crate::name::fqdn;
use crate::{RecordClass, RecordType};
use std::fmt;
use std::sync::Arc;

/// A single DNS question. The name is always stored fully qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn new(name: &str, record_type: RecordType, class: RecordClass) -> Self {
        Self {
            name: fqdn(name).into(),
            record_type,
            class,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.record_type)
    }
}
