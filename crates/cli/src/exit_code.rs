use dnsql_domain::{ConfigError, DomainError, ErrorKind};
use std::process::ExitCode;

/// Unclassified failure.
pub const FAILURE: u8 = 1;

pub fn for_kind(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Configuration => 2,
        ErrorKind::Constraint => 3,
        ErrorKind::Transport => 4,
        ErrorKind::Protocol => 5,
        ErrorKind::ServerResponse => 6,
    }
}

pub fn from_error(err: &anyhow::Error) -> ExitCode {
    let code = if let Some(domain) = err.downcast_ref::<DomainError>() {
        for_kind(domain.kind())
    } else if err.downcast_ref::<ConfigError>().is_some() {
        for_kind(ErrorKind::Configuration)
    } else {
        FAILURE
    };
    ExitCode::from(code)
}
