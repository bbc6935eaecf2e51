use thiserror::Error;

/// Coarse classification of [`DomainError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or incomplete endpoint descriptor, bad record tokens.
    Configuration,
    /// Query predicates that cannot be planned or bound.
    Constraint,
    /// Network level failure during an exchange.
    Transport,
    /// DNS wire encode/decode failure or malformed response.
    Protocol,
    /// Non-success HTTP status from a DoH endpoint.
    ServerResponse,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("No registered resolver for {0:?} protocol")]
    UnsupportedProtocol(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Unknown record class: {0}")]
    UnknownRecordClass(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Constraint error: {0}")]
    ConstraintViolation(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport error with {server}: {message}")]
    Transport { server: String, message: String },

    #[error("Failed to encode DNS message: {0}")]
    MessageEncode(String),

    #[error("Failed to decode DNS message: {0}")]
    MessageDecode(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Error from nameserver {server}: {status}")]
    ServerResponse { server: String, status: String },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidEndpoint(_)
            | DomainError::UnsupportedProtocol(_)
            | DomainError::InvalidDomainName(_)
            | DomainError::UnknownRecordType(_)
            | DomainError::UnknownRecordClass(_)
            | DomainError::ConfigError(_) => ErrorKind::Configuration,

            DomainError::ConstraintViolation(_) => ErrorKind::Constraint,

            DomainError::TransportTimeout { .. }
            | DomainError::TransportConnectionRefused { .. }
            | DomainError::Transport { .. } => ErrorKind::Transport,

            DomainError::MessageEncode(_)
            | DomainError::MessageDecode(_)
            | DomainError::InvalidDnsResponse(_) => ErrorKind::Protocol,

            DomainError::ServerResponse { .. } => ErrorKind::ServerResponse,
        }
    }

    pub fn is_transport_error(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    pub fn transport(server: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Transport {
            server: server.into(),
            message: message.into(),
        }
    }
}
