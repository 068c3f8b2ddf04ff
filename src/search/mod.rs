pub mod errors;
pub mod executor;
pub mod filter_params;
pub mod pagination;
pub mod predicate;
pub mod result;
pub mod search_text;
pub mod traits;

pub use errors::SearchError;
pub use executor::SearchExecutor;
pub use filter_params::{FilterParameters, SortBy};
pub use pagination::{PageWindow, PaginationInfo};
pub use predicate::{Direction, ListingOrder, ListingQuery, Predicate, ResolvedCategories, SortKey};
pub use result::{HomeFeed, ListingPage, LoadMoreResult, SearchResult};
pub use search_text::SearchText;
