//! dnsql application layer: ports, relation machinery and use cases.
pub mod ports;
pub mod relation;
pub mod services;
pub mod use_cases;
