//! dnsql domain layer
pub mod config;
pub mod dns_message;
pub mod endpoint;
pub mod errors;
pub mod name;
pub mod question;
pub mod record_type;
pub mod resolv_config;
pub mod rows;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{ResourceRecord, ResponseMessage};
pub use endpoint::{format_classic, format_tls, Endpoint, UpstreamAddr};
pub use errors::{DomainError, ErrorKind};
pub use name::{count_labels, fqdn, is_fqdn};
pub use question::Question;
pub use record_type::{RecordClass, RecordType};
pub use resolv_config::ResolvConfig;
pub use rows::{ResourceRecordRow, SearchCandidateRow, Section};
