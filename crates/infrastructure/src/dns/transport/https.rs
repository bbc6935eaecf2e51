//! HTTPS Transport for DNS queries: DNS-over-HTTPS (RFC 8484)
//!
//! Queries are sent as HTTP POST requests with `application/dns-message`
//! content type. A server answering "405 Method Not Allowed" is retried once
//! with GET, the message carried base64url-encoded (no padding) in the `dns`
//! query parameter.
//!
//! ```text
//! POST /dns-query HTTP/1.1            GET /dns-query?dns=<base64url> HTTP/1.1
//! Content-Type: application/dns-message
//! Accept: application/dns-message     Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use super::{timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use dnsql_domain::DomainError;
use reqwest::StatusCode;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Expected content type for DNS-over-HTTPS messages (RFC 8484 §4.2.1)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// DNS-over-HTTPS transport (RFC 8484)
pub struct HttpsTransport {
    url: String,
}

impl HttpsTransport {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            timeout_error(&self.url)
        } else {
            DomainError::transport(&self.url, format!("DoH request failed: {}", e))
        }
    }

    async fn post(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<reqwest::Response, DomainError> {
        tokio::time::timeout(
            timeout,
            SHARED_CLIENT
                .post(&self.url)
                .header(reqwest::header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
                .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .body(bytes::Bytes::copy_from_slice(message_bytes))
                .send(),
        )
        .await
        .map_err(|_| timeout_error(&self.url))?
        .map_err(|e| self.request_error(e))
    }

    async fn get(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<reqwest::Response, DomainError> {
        let mut url = reqwest::Url::parse(&self.url)
            .map_err(|e| DomainError::InvalidEndpoint(format!("'{}': {}", self.url, e)))?;
        url.set_query(Some(&format!("dns={}", URL_SAFE_NO_PAD.encode(message_bytes))));

        tokio::time::timeout(
            timeout,
            SHARED_CLIENT
                .get(url)
                .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .send(),
        )
        .await
        .map_err(|_| timeout_error(&self.url))?
        .map_err(|e| self.request_error(e))
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(
            url = %self.url,
            message_len = message_bytes.len(),
            "Sending DoH query"
        );

        let mut response = self.post(message_bytes, timeout).await?;

        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            debug!(url = %self.url, "DoH server rejected POST, retrying with GET");
            response = self.get(message_bytes, timeout).await?;
        }

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DomainError::ServerResponse {
                server: self.url.clone(),
                status: status.to_string(),
            });
        }

        let response_bytes = tokio::time::timeout(timeout, response.bytes())
            .await
            .map_err(|_| timeout_error(&self.url))?
            .map_err(|e| self.request_error(e))?;

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes.to_vec(),
            protocol_used: "HTTPS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_transport_creation() {
        let transport = HttpsTransport::new("https://1.1.1.1/dns-query".to_string());
        assert_eq!(transport.url(), "https://1.1.1.1/dns-query");
        assert_eq!(transport.protocol_name(), "HTTPS");
    }

    #[test]
    fn test_get_encoding_has_no_padding() {
        let encoded = URL_SAFE_NO_PAD.encode([0xfb, 0xff, 0x00]);
        assert_eq!(encoded, "-_8A");
        assert!(!URL_SAFE_NO_PAD.encode([0u8; 13]).ends_with('='));
    }
}
