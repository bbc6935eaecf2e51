use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::{https::HttpsTransport, DnsTransport};
use async_trait::async_trait;
use dnsql_application::ports::DnsResolver;
use dnsql_domain::{DomainError, Question, ResponseMessage};
use std::time::Duration;
use tracing::debug;

/// DNS-over-HTTPS resolver bound to one endpoint URL.
pub struct DohResolver {
    transport: HttpsTransport,
    timeout: Duration,
}

impl DohResolver {
    /// Fails unless `url` uses the `https` scheme.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme);
        if !scheme.is_some_and(|s| s.eq_ignore_ascii_case("https")) {
            return Err(DomainError::InvalidEndpoint(format!(
                "DoH endpoint must use https: '{}'",
                url
            )));
        }

        Ok(Self::from_transport(HttpsTransport::new(url.to_string()), timeout))
    }

    /// Wraps an already configured transport without scheme validation.
    pub fn from_transport(transport: HttpsTransport, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }
}

#[async_trait]
impl DnsResolver for DohResolver {
    async fn lookup(&self, question: &Question) -> Result<ResponseMessage, DomainError> {
        let (_, query_bytes) = MessageBuilder::build_query(question)?;

        debug!(url = %self.url(), question = %question, "DoH exchange");

        let response = self.transport.send(&query_bytes, self.timeout).await?;
        ResponseParser::parse(&response.bytes)
    }
}
