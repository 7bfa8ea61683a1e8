use serde::{Deserialize, Serialize};

use crate::{Listing, Price};

/// Externally visible shape of a [`Listing`].
///
/// Every field is copied verbatim; the keys match the seed file so clients can feed a
/// response back into a seed without renaming anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingView {
	pub id: String,
	#[serde(rename = "idOwner")]
	pub owner_id: String,
	pub name: String,
	#[serde(rename = "addressProperty")]
	pub address: String,
	#[serde(rename = "priceProperty")]
	pub price: Price,
	#[serde(rename = "imageUrl")]
	pub image_url: String,
}
impl From<&Listing> for ListingView {
	fn from(listing: &Listing) -> Self {
		Self {
			id: listing.id().to_string(),
			owner_id: listing.owner_id().to_string(),
			name: listing.name().to_string(),
			address: listing.address().to_string(),
			price: listing.price(),
			image_url: listing.image_url().to_string(),
		}
	}
}
