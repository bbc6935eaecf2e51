use async_trait::async_trait;
use dnsql_domain::{DomainError, Question, ResponseMessage};

/// A transport-bound resolver: one question in, one decoded message out.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn lookup(&self, question: &Question) -> Result<ResponseMessage, DomainError>;
}
