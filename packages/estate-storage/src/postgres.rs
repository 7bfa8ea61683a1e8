use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions};
use tokio_util::sync::CancellationToken;

use estate_domain::{Listing, SearchCriteria};

use crate::{
	BoxFuture, ListingStore, QueryPage, Result, SeedOutcome, cancel, models::ListingRow, schema,
};

const SCHEMA_LOCK_ID: i64 = 5_310_001;
const SEED_LOCK_ID: i64 = 5_310_002;
// Six binds per row keeps each statement well under the 65535 parameter limit.
const INSERT_BATCH_ROWS: usize = 1_000;
const LISTING_COLUMNS: &str = "id, owner_id, name, address, price, image_url";

/// Listing collection stored in one Postgres table keyed by `id`.
pub struct PgListingStore {
	pub pool: PgPool,
}
impl PgListingStore {
	pub async fn connect(cfg: &estate_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	pub fn from_pool(pool: PgPool) -> Self {
		Self { pool }
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		// Advisory locks belong to a connection; the transaction pins the lock to one and releases
		// it on commit.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in sql.split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		let folds_unicode: bool =
			sqlx::query_scalar("SELECT lower('Ñ') = 'ñ'").fetch_one(&self.pool).await?;

		if !folds_unicode {
			tracing::warn!(
				"Database locale does not fold non-ASCII case; text filters match ASCII case only."
			);
		}

		Ok(())
	}

	async fn query_now(&self, criteria: &SearchCriteria) -> Result<QueryPage> {
		let window = criteria.window();
		let mut count = QueryBuilder::<Postgres>::new("SELECT count(*) FROM listings");

		push_filters(&mut count, criteria);

		let mut fetch =
			QueryBuilder::<Postgres>::new(format!("SELECT {LISTING_COLUMNS} FROM listings"));

		push_filters(&mut fetch, criteria);
		fetch.push(" ORDER BY price ASC, seq ASC LIMIT ");
		fetch.push_bind(i64::from(window.limit));
		fetch.push(" OFFSET ");
		fetch.push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));

		let (total, rows) = tokio::try_join!(
			count.build_query_scalar::<i64>().fetch_one(&self.pool),
			fetch.build_query_as::<ListingRow>().fetch_all(&self.pool),
		)?;
		let items = rows.into_iter().map(ListingRow::into_listing).collect::<Result<Vec<_>>>()?;

		Ok(QueryPage { items, total: u64::try_from(total).unwrap_or_default() })
	}

	async fn get_now(&self, id: &str) -> Result<Option<Listing>> {
		let row = sqlx::query_as::<_, ListingRow>(&format!(
			"SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1 LIMIT 1"
		))
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		row.map(ListingRow::into_listing).transpose()
	}

	async fn seed_now(&self, items: &[Listing]) -> Result<SeedOutcome> {
		if items.is_empty() {
			return Ok(SeedOutcome::skipped(0));
		}

		// The lock serializes seeders so the emptiness check and the insert act as one step.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SEED_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		let populated: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM listings)")
			.fetch_one(&mut *tx)
			.await?;

		if populated {
			tx.rollback().await?;

			tracing::debug!(supplied = items.len(), "Listings already present; seed skipped.");

			return Ok(SeedOutcome::skipped(items.len()));
		}

		for batch in items.chunks(INSERT_BATCH_ROWS) {
			let mut insert =
				QueryBuilder::<Postgres>::new(format!("INSERT INTO listings ({LISTING_COLUMNS}) "));

			insert.push_values(batch, |mut row, listing| {
				row.push_bind(listing.id().to_string())
					.push_bind(listing.owner_id().to_string())
					.push_bind(listing.name().to_string())
					.push_bind(listing.address().to_string())
					.push_bind(listing.price().amount())
					.push_bind(listing.image_url().to_string());
			});
			insert.build().execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(SeedOutcome::inserted(items.len()))
	}
}
impl ListingStore for PgListingStore {
	fn query<'a>(
		&'a self,
		criteria: &'a SearchCriteria,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<QueryPage>> {
		Box::pin(cancel::run(cancel, self.query_now(criteria)))
	}

	fn get_by_id<'a>(
		&'a self,
		id: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<Option<Listing>>> {
		Box::pin(cancel::run(cancel, self.get_now(id)))
	}

	fn seed_if_empty<'a>(
		&'a self,
		items: &'a [Listing],
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, Result<SeedOutcome>> {
		Box::pin(cancel::run(cancel, self.seed_now(items)))
	}
}

/// Appends the conjunction of active predicates. No predicate means every row.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, criteria: &SearchCriteria) {
	let mut joiner = " WHERE ";

	// strpos keeps the needle literal; LIKE or a regex would treat `%`, `_` or `.` specially.
	if let Some(name) = criteria.name() {
		builder.push(joiner).push("strpos(lower(name), lower(");
		builder.push_bind(name.to_string()).push(")) > 0");

		joiner = " AND ";
	}
	if let Some(address) = criteria.address() {
		builder.push(joiner).push("strpos(lower(address), lower(");
		builder.push_bind(address.to_string()).push(")) > 0");

		joiner = " AND ";
	}
	if let Some(min_price) = criteria.min_price() {
		builder.push(joiner).push("price >= ");
		builder.push_bind(min_price);

		joiner = " AND ";
	}
	if let Some(max_price) = criteria.max_price() {
		builder.push(joiner).push("price <= ");
		builder.push_bind(max_price);
	}
}
