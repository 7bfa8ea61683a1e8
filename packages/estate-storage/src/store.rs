use std::{future::Future, pin::Pin};

use tokio_util::sync::CancellationToken;

use estate_domain::{Listing, SearchCriteria};

use crate::Result;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One page of matches plus the size of the full match set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage {
	pub items: Vec<Listing>,
	pub total: u64,
}

/// Effect of a guarded bulk insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
	/// Rows handed to the store.
	pub supplied: usize,
	/// Rows actually written: either `0` or `supplied`.
	pub written: usize,
}
impl SeedOutcome {
	pub fn skipped(supplied: usize) -> Self {
		Self { supplied, written: 0 }
	}

	pub fn inserted(supplied: usize) -> Self {
		Self { supplied, written: supplied }
	}
}

/// Persistent listing collection.
///
/// Every call takes a cancellation token. Cancelling before or during a call fails it with
/// [`crate::Error::Cancelled`] and leaves the collection as it was.
pub trait ListingStore
where
	Self: Send + Sync,
{
	/// Filters, sorts by price ascending (insertion order breaks ties), and pages.
	///
	/// `total` counts every match, not only the returned page. An offset past the end
	/// yields an empty page.
	///
	/// Text filters fold case with Unicode rules in memory. Postgres folds with the database's
	/// `LC_CTYPE`, so non-ASCII letters only match across case on a UTF-8 locale; under `C` or
	/// `SQL_ASCII`, `peña` does not match `PEÑA`.
	fn query<'a>(
		&'a self,
		criteria: &'a SearchCriteria,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<QueryPage>>;

	fn get_by_id<'a>(
		&'a self,
		id: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<Option<Listing>>>;

	/// Inserts `items` only when the collection holds no rows; otherwise does nothing.
	///
	/// The batch commits in full or not at all. An empty batch never writes.
	fn seed_if_empty<'a>(
		&'a self,
		items: &'a [Listing],
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<SeedOutcome>>;
}
