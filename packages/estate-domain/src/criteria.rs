use rust_decimal::Decimal;

use crate::Listing;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Offset/limit pair derived from a 1-based page and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
	pub offset: u64,
	pub limit: u32,
}
impl PageWindow {
	/// Number of rows this window yields out of `total` matches.
	pub fn len_of(&self, total: u64) -> u64 {
		total.saturating_sub(self.offset).min(u64::from(self.limit))
	}
}

/// Normalized filter and pagination parameters for one query.
///
/// The setters normalize as they go, so a value of this type always has `page >= 1` and a
/// page size inside `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`. Blank text filters are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
	name: Option<String>,
	address: Option<String>,
	min_price: Option<Decimal>,
	max_price: Option<Decimal>,
	page: u32,
	page_size: u32,
}
impl SearchCriteria {
	pub fn new() -> Self {
		Self {
			name: None,
			address: None,
			min_price: None,
			max_price: None,
			page: DEFAULT_PAGE,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = non_blank(name.into());

		self
	}

	pub fn with_address(mut self, address: impl Into<String>) -> Self {
		self.address = non_blank(address.into());

		self
	}

	pub fn with_min_price(mut self, min_price: Decimal) -> Self {
		self.min_price = Some(min_price);

		self
	}

	pub fn with_max_price(mut self, max_price: Decimal) -> Self {
		self.max_price = Some(max_price);

		self
	}

	pub fn with_page(mut self, page: i64) -> Self {
		self.page = clamp_page(page);

		self
	}

	pub fn with_page_size(mut self, page_size: i64) -> Self {
		self.page_size = clamp_page_size(page_size);

		self
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn address(&self) -> Option<&str> {
		self.address.as_deref()
	}

	pub fn min_price(&self) -> Option<Decimal> {
		self.min_price
	}

	pub fn max_price(&self) -> Option<Decimal> {
		self.max_price
	}

	pub fn page(&self) -> u32 {
		self.page
	}

	pub fn page_size(&self) -> u32 {
		self.page_size
	}

	pub fn window(&self) -> PageWindow {
		let offset = u64::from(self.page - 1) * u64::from(self.page_size);

		PageWindow { offset, limit: self.page_size }
	}

	/// Evaluates the conjunction of active predicates against one listing.
	///
	/// Text filters are case-insensitive literal substring matches. Price bounds are
	/// inclusive and never swapped, so an inverted range matches nothing.
	pub fn matches(&self, listing: &Listing) -> bool {
		let price = listing.price().amount();

		self.name.as_deref().is_none_or(|needle| contains_ignore_case(listing.name(), needle))
			&& self
				.address
				.as_deref()
				.is_none_or(|needle| contains_ignore_case(listing.address(), needle))
			&& self.min_price.is_none_or(|min| price >= min)
			&& self.max_price.is_none_or(|max| price <= max)
	}
}
impl Default for SearchCriteria {
	fn default() -> Self {
		Self::new()
	}
}

/// Pages are 1-based; anything below one means the first page.
pub fn clamp_page(requested: i64) -> u32 {
	u32::try_from(requested.max(i64::from(DEFAULT_PAGE))).unwrap_or(u32::MAX)
}

pub fn clamp_page_size(requested: i64) -> u32 {
	let clamped = requested.clamp(i64::from(MIN_PAGE_SIZE), i64::from(MAX_PAGE_SIZE));

	u32::try_from(clamped).unwrap_or(MAX_PAGE_SIZE)
}

fn non_blank(value: String) -> Option<String> {
	if value.trim().is_empty() { None } else { Some(value) }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}
