pub mod dns;
pub mod search_list;

pub use dns::{DnsColumn, DnsPlan, DnsRequest, QueryDnsUseCase};
pub use search_list::{ExpandSearchListUseCase, SearchListColumn, SearchListPlan};
