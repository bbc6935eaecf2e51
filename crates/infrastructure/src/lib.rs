//! dnsql infrastructure: wire transports, resolvers and system configuration.
pub mod dns;
pub mod system;
