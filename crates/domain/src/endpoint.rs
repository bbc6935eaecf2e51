use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Address of a classic nameserver, kept unresolved when given as a hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl UpstreamAddr {
    pub fn new(host: &str, port: u16) -> Self {
        match host.parse::<IpAddr>() {
            Ok(ip) => UpstreamAddr::Resolved(SocketAddr::new(ip, port)),
            Err(_) => UpstreamAddr::Unresolved {
                hostname: host.into(),
                port,
            },
        }
    }

    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            UpstreamAddr::Resolved(addr) => Some(*addr),
            UpstreamAddr::Unresolved { .. } => None,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            UpstreamAddr::Resolved(addr) => addr.port(),
            UpstreamAddr::Unresolved { port, .. } => *port,
        }
    }

    pub fn host(&self) -> String {
        match self {
            UpstreamAddr::Resolved(addr) => addr.ip().to_string(),
            UpstreamAddr::Unresolved { hostname, .. } => hostname.to_string(),
        }
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

/// A parsed nameserver endpoint descriptor.
///
/// Accepted forms:
/// - `udp://host:port`, `tcp://host:port`
/// - `tls://host:port?hostname=SNI` (the `hostname` parameter is mandatory)
/// - `https://host[:port]/path[?query]` (kept verbatim)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Udp {
        addr: UpstreamAddr,
    },
    Tcp {
        addr: UpstreamAddr,
    },
    Tls {
        addr: UpstreamAddr,
        server_name: Arc<str>,
    },
    Https {
        url: Arc<str>,
    },
}

impl Endpoint {
    pub fn scheme(&self) -> &'static str {
        match self {
            Endpoint::Udp { .. } => "udp",
            Endpoint::Tcp { .. } => "tcp",
            Endpoint::Tls { .. } => "tls",
            Endpoint::Https { .. } => "https",
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Endpoint::Udp { .. } => "UDP",
            Endpoint::Tcp { .. } => "TCP",
            Endpoint::Tls { .. } => "TLS",
            Endpoint::Https { .. } => "HTTPS",
        }
    }

    pub fn addr(&self) -> Option<&UpstreamAddr> {
        match self {
            Endpoint::Udp { addr } | Endpoint::Tcp { addr } | Endpoint::Tls { addr, .. } => {
                Some(addr)
            }
            Endpoint::Https { .. } => None,
        }
    }

    pub fn tls_server_name(&self) -> Option<&str> {
        match self {
            Endpoint::Tls { server_name, .. } => Some(server_name),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Endpoint::Https { url } => Some(url),
            _ => None,
        }
    }

    pub fn is_classic(&self) -> bool {
        !matches!(self, Endpoint::Https { .. })
    }
}

fn split_host_port(authority: &str) -> (&str, Option<&str>) {
    if let Some(rest) = authority.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (authority, None),
        };
    }
    match authority.rsplit_once(':') {
        // a bare IPv6 literal has several colons and no port
        Some((host, port)) if !host.contains(':') => (host, Some(port)),
        Some(_) => (authority, None),
        None => (authority, None),
    }
}

fn query_param<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

fn parse_classic(scheme: &str, rest: &str, original: &str) -> Result<Endpoint, DomainError> {
    let rest = rest.split('#').next().unwrap_or(rest);
    let (location, query) = match rest.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (rest, None),
    };
    let authority = location.split('/').next().unwrap_or(location);

    let (host, port) = split_host_port(authority);
    if host.is_empty() {
        return Err(DomainError::InvalidEndpoint(format!(
            "missing host in '{}'",
            original
        )));
    }

    let port = match port {
        Some(p) if !p.is_empty() => p.parse::<u16>().map_err(|e| {
            DomainError::InvalidEndpoint(format!("invalid port '{}' in '{}': {}", p, original, e))
        })?,
        _ => {
            return Err(DomainError::InvalidEndpoint(format!(
                "missing port for {} in '{}'",
                scheme, original
            )))
        }
    };

    let addr = UpstreamAddr::new(host, port);

    match scheme {
        "udp" => Ok(Endpoint::Udp { addr }),
        "tcp" => Ok(Endpoint::Tcp { addr }),
        _ => match query_param(query, "hostname") {
            Some(name) if !name.is_empty() => Ok(Endpoint::Tls {
                addr,
                server_name: name.into(),
            }),
            _ => Err(DomainError::InvalidEndpoint(format!(
                "missing 'hostname' parameter for use with TLS in '{}'",
                original
            ))),
        },
    }
}

impl FromStr for Endpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (scheme, rest) = match s.split_once("://") {
            Some((scheme, rest)) if !scheme.is_empty() => (scheme.to_ascii_lowercase(), rest),
            _ => {
                return Err(DomainError::InvalidEndpoint(format!(
                    "missing scheme in '{}'",
                    s
                )))
            }
        };

        match scheme.as_str() {
            "udp" | "tcp" | "tls" => parse_classic(&scheme, rest, s),
            "https" => {
                let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
                if host.is_empty() {
                    return Err(DomainError::InvalidEndpoint(format!(
                        "missing host in '{}'",
                        s
                    )));
                }
                Ok(Endpoint::Https { url: s.into() })
            }
            _ => Err(DomainError::UnsupportedProtocol(scheme)),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Udp { addr } => write!(f, "udp://{}", addr),
            Endpoint::Tcp { addr } => write!(f, "tcp://{}", addr),
            Endpoint::Tls { addr, server_name } => {
                write!(f, "tls://{}?hostname={}", addr, server_name)
            }
            Endpoint::Https { url } => write!(f, "{}", url),
        }
    }
}

fn bracket_host(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

/// Builds a classic endpoint descriptor such as `udp://8.8.8.8:53`.
pub fn format_classic(protocol: &str, host: &str, port: u16) -> String {
    format!("{}://{}:{}", protocol, bracket_host(host), port)
}

/// Builds a DNS-over-TLS endpoint descriptor carrying the TLS server name.
pub fn format_tls(host: &str, port: u16, hostname: &str) -> String {
    format!("tls://{}:{}?hostname={}", bracket_host(host), port, hostname)
}
