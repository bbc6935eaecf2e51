pub mod query_dns;

pub use query_dns::{DnsColumn, DnsPlan, DnsRequest, QueryDnsUseCase};
