use dnsql_application::use_cases::{ExpandSearchListUseCase, QueryDnsUseCase};
use dnsql_domain::Config;
use dnsql_infrastructure::dns::TransportResolverFactory;
use dnsql_infrastructure::system::ResolvConfReader;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct Services {
    pub query_dns: QueryDnsUseCase,
    pub search_list: ExpandSearchListUseCase,
    pub resolv_conf: Arc<ResolvConfReader>,
    pub default_nameserver: Option<String>,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        let timeout = Duration::from_millis(config.resolver.query_timeout_ms);
        let factory = Arc::new(TransportResolverFactory::new(timeout));
        let resolv_conf = Arc::new(ResolvConfReader::new(&config.resolver.resolv_conf));

        debug!(
            timeout_ms = config.resolver.query_timeout_ms,
            resolv_conf = %config.resolver.resolv_conf,
            "Services wired"
        );

        Self {
            query_dns: QueryDnsUseCase::new(factory),
            search_list: ExpandSearchListUseCase::new(resolv_conf.clone()),
            resolv_conf,
            default_nameserver: config.resolver.default_nameserver.clone(),
        }
    }
}
