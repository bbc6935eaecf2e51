use async_trait::async_trait;
use dnsql_domain::{DomainError, ResolvConfig};

/// Source of the host resolver configuration. Implementations must not cache:
/// every call returns a fresh snapshot.
#[async_trait]
pub trait ResolvConfigSource: Send + Sync {
    async fn load(&self) -> Result<ResolvConfig, DomainError>;
}
