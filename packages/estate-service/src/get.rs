use estate_domain::ListingView;
use estate_storage::CancellationToken;

use crate::{Error, ListingService, Result};

impl ListingService {
	/// Looks up one listing; an unknown id is [`Error::NotFound`].
	pub async fn get(&self, id: &str, cancel: &CancellationToken) -> Result<ListingView> {
		let listing = self
			.store
			.get_by_id(id, cancel)
			.await
			.inspect_err(|err| crate::log_store_failure("get_by_id", err))?;

		match listing {
			Some(listing) => Ok(ListingView::from(&listing)),
			None => Err(Error::NotFound { message: format!("No listing found with id {id}.") }),
		}
	}
}
