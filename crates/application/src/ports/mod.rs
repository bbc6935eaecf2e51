mod dns_resolver;
mod resolv_config_source;
mod resolver_factory;

pub use dns_resolver::DnsResolver;
pub use resolv_config_source::ResolvConfigSource;
pub use resolver_factory::ResolverFactory;
