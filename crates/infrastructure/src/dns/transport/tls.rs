//! TLS Transport for DNS queries: DNS-over-TLS (RFC 7858)
//!
//! TCP framing inside a rustls session. The server certificate is verified
//! against the webpki roots using the configured server name.

use super::tcp::{connect, read_with_length_prefix, send_with_length_prefix, with_server};
use super::{resolve_upstream, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsql_domain::{DomainError, UpstreamAddr};
use rustls::pki_types::ServerName;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::debug;

/// Shared TLS config, built once.
static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

/// DNS-over-TLS transport (RFC 7858)
pub struct TlsTransport {
    upstream_addr: UpstreamAddr,
    server_name: String,
}

impl TlsTransport {
    pub fn new(upstream_addr: UpstreamAddr, server_name: String) -> Self {
        Self {
            upstream_addr,
            server_name,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_name = ServerName::try_from(self.server_name.clone()).map_err(|e| {
            DomainError::InvalidEndpoint(format!(
                "invalid TLS server name '{}': {}",
                self.server_name, e
            ))
        })?;

        let server_addr = resolve_upstream(&self.upstream_addr, timeout).await?;
        let tcp_stream = connect(server_addr, timeout).await?;

        let connector = tokio_rustls::TlsConnector::from(SHARED_TLS_CONFIG.clone());
        let mut stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp_stream))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| {
                DomainError::transport(server_addr.to_string(), format!("TLS handshake failed: {}", e))
            })?;

        debug!(server = %server_addr, server_name = %self.server_name, "TLS connection established");

        tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| with_server(e, server_addr))?;

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| with_server(e, server_addr))?;

        debug!(
            server = %server_addr,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TLS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
