use std::{io, path::PathBuf};

use serde::{Deserialize, Serialize};

use estate_domain::{Listing, ListingRecord, ensure_unique_ids};
use estate_storage::{BoxFuture, CancellationToken};

use crate::{Error, ListingService, Result};

/// Supplier of the records used to seed an empty catalog.
pub trait SeedSource
where
	Self: Send + Sync,
{
	/// Fails with [`Error::NotFound`] when the source cannot be reached.
	fn load<'a>(
		&'a self,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<Vec<ListingRecord>>>;
}

/// Seed records read from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
	path: PathBuf,
}
impl JsonFileSeed {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	async fn read(&self) -> Result<Vec<ListingRecord>> {
		let raw = tokio::fs::read(&self.path).await.map_err(|err| {
			let reason = match err.kind() {
				io::ErrorKind::NotFound => "not found".to_string(),
				_ => err.to_string(),
			};

			Error::NotFound { message: format!("Seed file {:?} unavailable: {reason}.", self.path) }
		})?;

		serde_json::from_slice(&raw).map_err(|err| Error::Validation {
			message: format!("Seed file {:?} is not a JSON array of listings: {err}.", self.path),
			fields: Vec::new(),
		})
	}
}
impl SeedSource for JsonFileSeed {
	fn load<'a>(
		&'a self,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<Vec<ListingRecord>>> {
		Box::pin(async move {
			tokio::select! {
				biased;
				_ = cancel.cancelled() => Err(Error::Cancelled),
				records = self.read() => records,
			}
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
	/// Size of the supplied batch, whether or not it was written.
	pub inserted: usize,
	/// Rows actually written: zero when the catalog already had data.
	pub written: usize,
}

impl ListingService {
	/// Loads the seed source and writes it only when the catalog is empty.
	pub async fn seed(&self, cancel: &CancellationToken) -> Result<SeedResponse> {
		let Some(source) = self.seed_source.as_ref() else {
			return Err(Error::NotFound { message: "No seed source is configured.".to_string() });
		};
		let records = source.load(cancel).await?;
		let listings = to_listings(records)?;
		let outcome = self
			.store
			.seed_if_empty(&listings, cancel)
			.await
			.inspect_err(|err| crate::log_store_failure("seed_if_empty", err))?;

		tracing::info!(
			supplied = outcome.supplied,
			written = outcome.written,
			"Seed request completed."
		);

		Ok(SeedResponse { inserted: outcome.supplied, written: outcome.written })
	}
}

fn to_listings(records: Vec<ListingRecord>) -> Result<Vec<Listing>> {
	let listings = records
		.into_iter()
		.enumerate()
		.map(|(index, record)| {
			Listing::try_from(record).map_err(|err| {
				let fields = err.field().map(|field| vec![format!("$[{index}].{field}")]);

				Error::Validation {
					message: format!("Seed record {index} is invalid: {err}"),
					fields: fields.unwrap_or_default(),
				}
			})
		})
		.collect::<Result<Vec<_>>>()?;

	ensure_unique_ids(&listings)?;

	Ok(listings)
}
