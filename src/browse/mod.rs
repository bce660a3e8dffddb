pub mod filter;
pub mod format;
pub mod search;
pub mod sort;

pub use filter::filter_by_year;
pub use search::{run_search, SearchOutcome, SearchRequest, SearchSource};
pub use sort::{sort_movies, SortDirection, SortField, SortKey, DEFAULT_SORT};
