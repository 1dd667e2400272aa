pub mod filter;
pub mod lenient;
pub mod listing;
pub mod notification;
pub mod review;
pub mod sort;

pub use filter::{apply_filters, FilterCriteria};
pub use sort::{sort_listings, SortOrder};
