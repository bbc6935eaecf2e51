pub mod https;
pub mod tcp;
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use dnsql_domain::{DomainError, UpstreamAddr};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Transports used by classic (non-HTTP) resolvers.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
    Tls(tls::TlsTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tls(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
            Self::Tls(_) => "TLS",
        }
    }
}

/// Resolves an upstream address to a socket address, looking up hostnames
/// through the system resolver.
pub(crate) async fn resolve_upstream(
    addr: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(socket_addr) = addr.socket_addr() {
        return Ok(socket_addr);
    }

    let host = addr.host();
    let port = addr.port();

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host((host.as_str(), port)))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: addr.to_string(),
        })?
        .map_err(|e| {
            DomainError::transport(addr.to_string(), format!("failed to resolve host: {}", e))
        })?;

    addrs.next().ok_or_else(|| {
        DomainError::transport(addr.to_string(), "host resolved to no addresses")
    })
}

/// Maps an I/O failure to the matching transport error.
pub(crate) fn io_error(server: impl ToString, context: &str, e: io::Error) -> DomainError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server.to_string(),
        },
        io::ErrorKind::TimedOut => DomainError::TransportTimeout {
            server: server.to_string(),
        },
        _ => DomainError::transport(server.to_string(), format!("{}: {}", context, e)),
    }
}

pub(crate) fn timeout_error(server: impl ToString) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}
