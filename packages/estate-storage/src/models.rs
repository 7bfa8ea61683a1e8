use estate_domain::{Decimal, Listing};

use crate::{Error, Result};

#[derive(Debug, sqlx::FromRow)]
pub struct ListingRow {
	pub id: String,
	pub owner_id: String,
	pub name: String,
	pub address: String,
	pub price: Decimal,
	pub image_url: String,
}
impl ListingRow {
	pub fn into_listing(self) -> Result<Listing> {
		let id = self.id.clone();

		Listing::new(self.id, self.owner_id, self.name, self.address, self.price, self.image_url)
			.map_err(|err| Error::InvalidRow(format!("listing {id:?}: {err}")))
	}
}
