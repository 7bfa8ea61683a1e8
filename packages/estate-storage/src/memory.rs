use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

use estate_domain::{Listing, SearchCriteria, ensure_unique_ids};

use crate::{BoxFuture, Error, ListingStore, QueryPage, Result, SeedOutcome, cancel};

/// Process-local store backed by a vector kept in insertion order.
///
/// The lock is held across the emptiness check and the insert, so concurrent seeders
/// cannot both write.
#[derive(Debug, Default)]
pub struct MemoryListingStore {
	rows: Mutex<Vec<Listing>>,
}
impl MemoryListingStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_listings(listings: Vec<Listing>) -> Result<Self> {
		ensure_unique_ids(&listings).map_err(|err| Error::InvalidArgument(err.to_string()))?;

		Ok(Self { rows: Mutex::new(listings) })
	}

	pub fn len(&self) -> usize {
		self.rows().len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows().is_empty()
	}

	fn rows(&self) -> MutexGuard<'_, Vec<Listing>> {
		self.rows.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn query_now(&self, criteria: &SearchCriteria) -> QueryPage {
		let rows = self.rows();
		let mut matched =
			rows.iter().filter(|listing| criteria.matches(listing)).collect::<Vec<_>>();
		let total = matched.len() as u64;
		let window = criteria.window();
		let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);

		// Stable sort keeps insertion order among equal prices.
		matched.sort_by_key(|listing| listing.price());

		let items = matched
			.into_iter()
			.skip(offset)
			.take(window.limit as usize)
			.cloned()
			.collect();

		QueryPage { items, total }
	}

	fn seed_now(&self, items: &[Listing]) -> Result<SeedOutcome> {
		if items.is_empty() {
			return Ok(SeedOutcome::skipped(0));
		}

		ensure_unique_ids(items).map_err(|err| Error::InvalidArgument(err.to_string()))?;

		let mut rows = self.rows();

		if !rows.is_empty() {
			return Ok(SeedOutcome::skipped(items.len()));
		}

		rows.extend_from_slice(items);

		Ok(SeedOutcome::inserted(items.len()))
	}
}
impl ListingStore for MemoryListingStore {
	fn query<'a>(
		&'a self,
		criteria: &'a SearchCriteria,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<QueryPage>> {
		Box::pin(cancel::run(cancel, async move { Ok(self.query_now(criteria)) }))
	}

	fn get_by_id<'a>(
		&'a self,
		id: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<Option<Listing>>> {
		Box::pin(cancel::run(cancel, async move {
			Ok(self.rows().iter().find(|listing| listing.id() == id).cloned())
		}))
	}

	fn seed_if_empty<'a>(
		&'a self,
		items: &'a [Listing],
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<SeedOutcome>> {
		Box::pin(cancel::run(cancel, async move { self.seed_now(items) }))
	}
}
