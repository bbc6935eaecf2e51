pub mod search_list;

pub use search_list::expand as expand_search_list;
