/// Upper bound applied to `options ndots:N`.
pub const MAX_NDOTS: u32 = 15;

pub const DEFAULT_NDOTS: u32 = 1;

/// Snapshot of the host resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvConfig {
    pub servers: Vec<String>,
    pub search: Vec<String>,
    pub ndots: u32,
}

impl Default for ResolvConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            search: Vec::new(),
            ndots: DEFAULT_NDOTS,
        }
    }
}

impl ResolvConfig {
    /// Parses `resolv.conf` syntax. Unknown keywords and malformed options
    /// are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut config = ResolvConfig::default();

        for line in contents.lines() {
            let line = match line.find(['#', ';']) {
                Some(pos) => &line[..pos],
                None => line,
            };
            let mut words = line.split_whitespace();
            let Some(keyword) = words.next() else {
                continue;
            };

            match keyword {
                "nameserver" => {
                    if let Some(server) = words.next() {
                        config.servers.push(server.to_string());
                    }
                }
                "domain" => {
                    if let Some(domain) = words.next() {
                        config.search = vec![domain.to_string()];
                    }
                }
                "search" => {
                    config.search = words.map(str::to_string).collect();
                }
                "options" => {
                    for option in words {
                        if let Some(value) = option.strip_prefix("ndots:") {
                            if let Ok(n) = value.parse::<u32>() {
                                config.ndots = n.min(MAX_NDOTS);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        config
    }
}
