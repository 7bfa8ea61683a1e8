pub mod cancel;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;

mod error;

pub use error::Error;
pub use memory::MemoryListingStore;
pub use postgres::PgListingStore;
pub use store::{BoxFuture, ListingStore, QueryPage, SeedOutcome};
pub use tokio_util::sync::CancellationToken;

pub type Result<T, E = Error> = std::result::Result<T, E>;
