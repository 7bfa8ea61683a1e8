use std::sync::Arc;

use estate_service::{CancellationToken, JsonFileSeed, ListingService};
use estate_storage::{ListingStore, MemoryListingStore, PgListingStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ListingService>,
	/// Parent of every per-request token.
	pub shutdown: CancellationToken,
}
impl AppState {
	pub async fn new(
		config: estate_config::Config,
		shutdown: CancellationToken,
	) -> color_eyre::Result<Self> {
		let store: Arc<dyn ListingStore> = match config.storage.postgres.as_ref() {
			Some(postgres) if !config.storage.is_memory() => {
				let store = PgListingStore::connect(postgres).await?;

				store.ensure_schema().await?;

				Arc::new(store)
			},
			_ => {
				tracing::warn!("Using the in-memory listing store; data is lost on restart.");

				Arc::new(MemoryListingStore::new())
			},
		};
		let mut service = ListingService::new(store);

		if config.seed.enabled {
			tracing::info!(path = %config.seed.path, "Seed endpoint enabled.");

			service = service.with_seed_source(Arc::new(JsonFileSeed::new(&config.seed.path)));
		}

		Ok(Self::from_service(service, shutdown))
	}

	pub fn from_service(service: ListingService, shutdown: CancellationToken) -> Self {
		Self { service: Arc::new(service), shutdown }
	}
}
