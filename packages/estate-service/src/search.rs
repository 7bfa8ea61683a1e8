use std::str::FromStr;

use serde::{Deserialize, Serialize};

use estate_domain::{Decimal, ListingView, SearchCriteria};
use estate_storage::CancellationToken;

use crate::{Error, ListingService, Result};

/// Raw search parameters as they arrive from a query string.
///
/// Numbers stay strings here so a malformed value can be reported by field name instead of
/// failing extraction wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	pub name: Option<String>,
	pub address: Option<String>,
	pub min_price: Option<String>,
	pub max_price: Option<String>,
	pub page: Option<String>,
	pub page_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub total: u64,
	pub page: u32,
	/// Effective page size after clamping, not the requested one.
	pub page_size: u32,
	pub data: Vec<ListingView>,
}

impl ListingService {
	pub async fn search(
		&self,
		req: SearchRequest,
		cancel: &CancellationToken,
	) -> Result<SearchResponse> {
		let criteria = criteria_from_request(&req)?;
		let page = self
			.store
			.query(&criteria, cancel)
			.await
			.inspect_err(|err| crate::log_store_failure("query", err))?;

		Ok(SearchResponse {
			total: page.total,
			page: criteria.page(),
			page_size: criteria.page_size(),
			data: page.items.iter().map(ListingView::from).collect(),
		})
	}
}

/// Normalizes raw parameters into criteria.
///
/// Text filters pass through untouched (blank means absent). Price bounds must be decimals.
/// `page` falls back to 1 when absent, malformed, or below 1. `pageSize` defaults to 20 and
/// is clamped into `[1, 100]`; only a non-integer value is rejected. Every malformed field
/// is reported at once.
pub fn criteria_from_request(req: &SearchRequest) -> Result<SearchCriteria> {
	let mut invalid = Vec::new();
	let mut criteria = SearchCriteria::new();

	if let Some(name) = req.name.as_deref() {
		criteria = criteria.with_name(name);
	}
	if let Some(address) = req.address.as_deref() {
		criteria = criteria.with_address(address);
	}

	match parse_decimal(req.min_price.as_deref()) {
		Ok(Some(min_price)) => criteria = criteria.with_min_price(min_price),
		Ok(None) => {},
		Err(()) => invalid.push("minPrice"),
	}
	match parse_decimal(req.max_price.as_deref()) {
		Ok(Some(max_price)) => criteria = criteria.with_max_price(max_price),
		Ok(None) => {},
		Err(()) => invalid.push("maxPrice"),
	}

	if let Some(Ok(page)) = non_blank(req.page.as_deref()).map(parse_saturating_int) {
		criteria = criteria.with_page(page);
	}

	match non_blank(req.page_size.as_deref()).map(parse_saturating_int) {
		Some(Ok(page_size)) => criteria = criteria.with_page_size(page_size),
		Some(Err(())) => invalid.push("pageSize"),
		None => {},
	}

	if !invalid.is_empty() {
		let message = invalid
			.iter()
			.map(|field| match *field {
				"pageSize" => "pageSize must be an integer.".to_string(),
				field => format!("{field} must be a decimal number."),
			})
			.collect::<Vec<_>>()
			.join(" ");

		return Err(Error::Validation {
			message,
			fields: invalid.into_iter().map(str::to_string).collect(),
		});
	}

	Ok(criteria)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
	raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_decimal(raw: Option<&str>) -> Result<Option<Decimal>, ()> {
	let Some(value) = non_blank(raw) else {
		return Ok(None);
	};

	Decimal::from_str(value)
		.or_else(|_| Decimal::from_scientific(value))
		.map(Some)
		.map_err(|_| ())
}

/// Parses an integer, saturating digit strings too long for `i64`.
fn parse_saturating_int(value: &str) -> Result<i64, ()> {
	if let Ok(parsed) = value.parse::<i64>() {
		return Ok(parsed);
	}

	let (negative, digits) = match value.strip_prefix('-') {
		Some(digits) => (true, digits),
		None => (false, value.strip_prefix('+').unwrap_or(value)),
	};

	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return Err(());
	}

	Ok(if negative { i64::MIN } else { i64::MAX })
}
