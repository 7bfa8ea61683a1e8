pub mod get;
pub mod search;
pub mod seed;

mod error;

pub use error::{Error, Result};
pub use search::{SearchRequest, SearchResponse, criteria_from_request};
pub use seed::{JsonFileSeed, SeedResponse, SeedSource};

use std::sync::Arc;

use estate_storage::ListingStore;

pub use estate_storage::{BoxFuture, CancellationToken};

/// Entry point for catalog reads and the one-time seed.
///
/// Store failures are never swallowed: an unreachable backend surfaces as
/// [`Error::StoreUnavailable`], distinct from an empty result.
pub struct ListingService {
	pub store: Arc<dyn ListingStore>,
	pub seed_source: Option<Arc<dyn SeedSource>>,
}
impl ListingService {
	pub fn new(store: Arc<dyn ListingStore>) -> Self {
		Self { store, seed_source: None }
	}

	pub fn with_seed_source(mut self, source: Arc<dyn SeedSource>) -> Self {
		self.seed_source = Some(source);

		self
	}
}

fn log_store_failure(operation: &'static str, err: &estate_storage::Error) {
	match err {
		estate_storage::Error::Cancelled => {
			tracing::debug!(operation, "Store operation cancelled.");
		},
		_ => {
			tracing::warn!(operation, error = %err, "Store operation failed.");
		},
	}
}
