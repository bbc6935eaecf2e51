use super::{ClassicResolver, DohResolver};
use async_trait::async_trait;
use dnsql_application::ports::{DnsResolver, ResolverFactory};
use dnsql_domain::{DomainError, Endpoint, Question, ResponseMessage};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A resolver selected by endpoint scheme.
pub enum Resolver {
    Classic(ClassicResolver),
    Doh(DohResolver),
}

impl Resolver {
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Resolver::Classic(_) => "classic",
            Resolver::Doh(_) => "doh",
        }
    }
}

#[async_trait]
impl DnsResolver for Resolver {
    async fn lookup(&self, question: &Question) -> Result<ResponseMessage, DomainError> {
        match self {
            Resolver::Classic(r) => r.lookup(question).await,
            Resolver::Doh(r) => r.lookup(question).await,
        }
    }
}

/// Parses an endpoint descriptor and builds the matching resolver.
///
/// `udp`, `tcp` and `tls` produce a [`ClassicResolver`]; `https` produces a
/// [`DohResolver`]. Any other scheme is rejected before any network activity.
pub fn create_resolver(nameserver: &str, timeout: Duration) -> Result<Resolver, DomainError> {
    let endpoint: Endpoint = nameserver.parse()?;

    debug!(
        nameserver = %nameserver,
        protocol = endpoint.protocol_name(),
        "Creating resolver"
    );

    match &endpoint {
        Endpoint::Https { url } => Ok(Resolver::Doh(DohResolver::new(url, timeout)?)),
        _ => Ok(Resolver::Classic(ClassicResolver::from_endpoint(
            &endpoint, timeout,
        )?)),
    }
}

/// [`ResolverFactory`] backed by the real network transports.
#[derive(Debug, Clone)]
pub struct TransportResolverFactory {
    timeout: Duration,
}

impl TransportResolverFactory {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ResolverFactory for TransportResolverFactory {
    fn create(&self, nameserver: &str) -> Result<Arc<dyn DnsResolver>, DomainError> {
        Ok(Arc::new(create_resolver(nameserver, self.timeout)?))
    }
}
