use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Deadline for a single wire exchange, in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Path of the host resolver configuration file.
    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Endpoint used when a query names no nameserver.
    #[serde(default)]
    pub default_nameserver: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            resolv_conf: default_resolv_conf(),
            default_nameserver: None,
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}
