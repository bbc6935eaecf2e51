use async_trait::async_trait;
use dnsql_application::ports::ResolvConfigSource;
use dnsql_domain::{format_classic, DomainError, ResolvConfig};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const DEFAULT_PORT: u16 = 53;

/// Reads the host resolver configuration (`/etc/resolv.conf` by default).
///
/// Every call re-reads the file.
#[derive(Debug, Clone)]
pub struct ResolvConfReader {
    path: PathBuf,
}

impl ResolvConfReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ResolvConfReader {
    fn default() -> Self {
        Self::new("/etc/resolv.conf")
    }
}

#[async_trait]
impl ResolvConfigSource for ResolvConfReader {
    async fn load(&self) -> Result<ResolvConfig, DomainError> {
        let contents = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::ConfigError(format!(
                "failed to read system configuration {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let config = ResolvConfig::parse(&contents);
        debug!(
            path = %self.path.display(),
            servers = config.servers.len(),
            search = config.search.len(),
            ndots = config.ndots,
            "Loaded system resolver configuration"
        );
        Ok(config)
    }
}

/// Picks one configured nameserver at random and renders it as an endpoint
/// descriptor carrying `ndots` and `search` as query parameters.
pub fn system_endpoint(
    config: &ResolvConfig,
    rng: &mut fastrand::Rng,
) -> Result<String, DomainError> {
    if config.servers.is_empty() {
        return Err(DomainError::ConfigError(
            "no nameservers in system configuration".to_string(),
        ));
    }

    let server = &config.servers[rng.usize(..config.servers.len())];
    let mut endpoint = server_endpoint(server);

    endpoint.push_str(&format!("?ndots={}", config.ndots));
    for domain in &config.search {
        endpoint.push_str("&search=");
        endpoint.push_str(domain);
    }

    Ok(endpoint)
}

fn server_endpoint(server: &str) -> String {
    let server = server.trim();

    if let Ok(ip) = server.parse::<IpAddr>() {
        return format_classic("udp", &ip.to_string(), DEFAULT_PORT);
    }

    let (scheme, rest) = server.split_once("://").unwrap_or(("udp", server));
    let authority = rest.split(['/', '?']).next().unwrap_or_default();

    if has_port(authority) {
        format!("{}://{}", scheme, authority)
    } else {
        format_classic(scheme, authority.trim_matches(['[', ']']), DEFAULT_PORT)
    }
}

fn has_port(authority: &str) -> bool {
    if let Some(rest) = authority.strip_prefix('[') {
        return rest.split_once("]:").is_some();
    }
    matches!(authority.matches(':').count(), 1)
}
