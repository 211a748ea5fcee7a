//! Query model for table and chart requests.

mod filter;
mod order;
mod page;
mod params;

pub use filter::{DateRange, FilterState, FilterUpdate, PriceRange};
pub use order::{Direction, SortState};
pub use page::{MAX_PAGE_SIZE, PageWindow};
pub use params::{TableQuery, date_range_params, iso_timestamp, with_params};
