pub mod expand_search_list;

pub use expand_search_list::{ExpandSearchListUseCase, SearchListColumn, SearchListPlan};
