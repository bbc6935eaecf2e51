use super::DnsResolver;
use dnsql_domain::DomainError;
use std::sync::Arc;

/// Builds a resolver from an endpoint descriptor such as `udp://8.8.8.8:53`.
pub trait ResolverFactory: Send + Sync {
    fn create(&self, nameserver: &str) -> Result<Arc<dyn DnsResolver>, DomainError>;
}
