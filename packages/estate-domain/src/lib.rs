//! Catalog entities and the value objects that describe a listing search.

pub mod criteria;
pub mod listing;
pub mod projection;

mod error;

pub use criteria::{
	DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE, PageWindow, SearchCriteria,
	clamp_page, clamp_page_size,
};
pub use error::{Error, Result};
pub use listing::{Listing, ListingRecord, Price, ensure_unique_ids};
pub use projection::ListingView;
pub use rust_decimal::Decimal;
