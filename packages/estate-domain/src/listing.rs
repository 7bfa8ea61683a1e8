use std::{collections::HashSet, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Non-negative fixed-point currency amount.
///
/// On the wire it is a JSON number carrying the exact decimal digits; a quoted decimal string is
/// also accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);
impl Price {
	pub const ZERO: Self = Self(Decimal::ZERO);

	pub fn new(amount: Decimal) -> Result<Self> {
		if amount < Decimal::ZERO {
			return Err(Error::InvalidField {
				field: "priceProperty",
				message: "must be zero or greater.".to_string(),
			});
		}

		Ok(Self(amount))
	}

	pub fn amount(&self) -> Decimal {
		self.0
	}
}
impl fmt::Display for Price {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}
impl Serialize for Price {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
	}
}
impl<'de> Deserialize<'de> for Price {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let amount = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;

		Self::new(amount).map_err(serde::de::Error::custom)
	}
}

/// One property in the catalog.
///
/// Fields are only reachable through accessors so a constructed listing always satisfies
/// its invariants: non-blank id, name and address, and a non-negative price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
	id: String,
	owner_id: String,
	name: String,
	address: String,
	price: Price,
	image_url: String,
}
impl Listing {
	pub fn new(
		id: impl Into<String>,
		owner_id: impl Into<String>,
		name: impl Into<String>,
		address: impl Into<String>,
		price: Decimal,
		image_url: impl Into<String>,
	) -> Result<Self> {
		let id = id.into();
		let name = name.into();
		let address = address.into();

		require_non_blank("id", &id)?;
		require_non_blank("name", &name)?;
		require_non_blank("addressProperty", &address)?;

		Ok(Self {
			id,
			owner_id: owner_id.into(),
			name,
			address,
			price: Price::new(price)?,
			image_url: image_url.into(),
		})
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn owner_id(&self) -> &str {
		&self.owner_id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn address(&self) -> &str {
		&self.address
	}

	pub fn price(&self) -> Price {
		self.price
	}

	pub fn image_url(&self) -> &str {
		&self.image_url
	}
}

/// Listing as it appears in a seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
	pub id: String,
	#[serde(rename = "idOwner")]
	pub owner_id: String,
	pub name: String,
	#[serde(rename = "addressProperty")]
	pub address: String,
	#[serde(rename = "priceProperty", with = "rust_decimal::serde::arbitrary_precision")]
	pub price: Decimal,
	#[serde(rename = "imageUrl", default)]
	pub image_url: String,
}
impl TryFrom<ListingRecord> for Listing {
	type Error = Error;

	fn try_from(record: ListingRecord) -> Result<Self> {
		Self::new(
			record.id,
			record.owner_id,
			record.name,
			record.address,
			record.price,
			record.image_url,
		)
	}
}

/// Rejects a batch that would put two rows under the same id.
pub fn ensure_unique_ids(listings: &[Listing]) -> Result<()> {
	let mut seen = HashSet::with_capacity(listings.len());

	for listing in listings {
		if !seen.insert(listing.id()) {
			return Err(Error::DuplicateId { id: listing.id().to_string() });
		}
	}

	Ok(())
}

fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
	if value.trim().is_empty() {
		return Err(Error::InvalidField { field, message: "must be non-empty.".to_string() });
	}

	Ok(())
}
