use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::{tcp::TcpTransport, tls::TlsTransport, udp::UdpTransport, Transport};
use async_trait::async_trait;
use dnsql_application::ports::DnsResolver;
use dnsql_domain::{DomainError, Endpoint, Question, ResponseMessage, UpstreamAddr};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How a classic resolver reaches its nameserver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Udp,
    Tcp,
    TcpTls,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportMode::Udp => "udp",
            TransportMode::Tcp => "tcp",
            TransportMode::TcpTls => "tcp-tls",
        })
    }
}

/// Resolver speaking plain DNS over UDP, TCP or TLS to one nameserver.
///
/// A truncated response is retried exactly once over plain TCP. The retry
/// uses a call-local mode, so the configured mode is never modified and one
/// instance may serve concurrent lookups.
#[derive(Debug, Clone)]
pub struct ClassicResolver {
    addr: UpstreamAddr,
    mode: TransportMode,
    tls_server_name: Option<Arc<str>>,
    timeout: Duration,
}

impl ClassicResolver {
    pub fn new(addr: UpstreamAddr, mode: TransportMode, timeout: Duration) -> Self {
        Self {
            addr,
            mode,
            tls_server_name: None,
            timeout,
        }
    }

    pub fn with_tls(addr: UpstreamAddr, server_name: Arc<str>, timeout: Duration) -> Self {
        Self {
            addr,
            mode: TransportMode::TcpTls,
            tls_server_name: Some(server_name),
            timeout,
        }
    }

    pub fn from_endpoint(endpoint: &Endpoint, timeout: Duration) -> Result<Self, DomainError> {
        match endpoint {
            Endpoint::Udp { addr } => Ok(Self::new(addr.clone(), TransportMode::Udp, timeout)),
            Endpoint::Tcp { addr } => Ok(Self::new(addr.clone(), TransportMode::Tcp, timeout)),
            Endpoint::Tls { addr, server_name } => {
                Ok(Self::with_tls(addr.clone(), Arc::clone(server_name), timeout))
            }
            Endpoint::Https { .. } => Err(DomainError::UnsupportedProtocol(
                endpoint.scheme().to_string(),
            )),
        }
    }

    pub fn addr(&self) -> &UpstreamAddr {
        &self.addr
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn tls_server_name(&self) -> Option<&str> {
        self.tls_server_name.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport(&self, mode: TransportMode) -> Result<Transport, DomainError> {
        match mode {
            TransportMode::Udp => Ok(Transport::Udp(UdpTransport::new(self.addr.clone()))),
            TransportMode::Tcp => Ok(Transport::Tcp(TcpTransport::new(self.addr.clone()))),
            TransportMode::TcpTls => {
                let server_name = self.tls_server_name.as_deref().ok_or_else(|| {
                    DomainError::InvalidEndpoint(format!(
                        "missing 'hostname' parameter for use with TLS to {}",
                        self.addr
                    ))
                })?;
                Ok(Transport::Tls(TlsTransport::new(
                    self.addr.clone(),
                    server_name.to_string(),
                )))
            }
        }
    }

    async fn exchange(
        &self,
        mode: TransportMode,
        id: u16,
        query_bytes: &[u8],
    ) -> Result<ResponseMessage, DomainError> {
        let transport = self.transport(mode)?;
        let response = transport.send(query_bytes, self.timeout).await?;
        let message = match ResponseParser::parse(&response.bytes) {
            Ok(message) => message,
            Err(e) => match ResponseParser::parse_truncated(&response.bytes) {
                Some(header_only) => {
                    debug!(server = %self.addr, %mode, error = %e, "undecodable reply has TC set");
                    header_only
                }
                None => return Err(e),
            },
        };

        if message.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "transaction id mismatch from {}: sent {}, received {}",
                self.addr, id, message.id
            )));
        }

        Ok(message)
    }
}

#[async_trait]
impl DnsResolver for ClassicResolver {
    async fn lookup(&self, question: &Question) -> Result<ResponseMessage, DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query(question)?;

        let mut mode = self.mode;
        let mut retried = false;

        loop {
            debug!(
                server = %self.addr,
                mode = %mode,
                question = %question,
                "Classic DNS exchange"
            );

            let message = self.exchange(mode, id, &query_bytes).await?;

            if message.truncated && !retried {
                debug!(
                    server = %self.addr,
                    mode = %mode,
                    "Response truncated (TC bit), retrying via TCP"
                );
                mode = TransportMode::Tcp;
                retried = true;
                continue;
            }

            return Ok(message);
        }
    }
}
