//! Behaviour every `ListingStore` must share, run against each backend.

use estate_domain::{Decimal, Listing, SearchCriteria};
use estate_storage::{CancellationToken, Error, ListingStore};
use estate_testkit::{listing, sample_catalog};

pub async fn seed_sample(store: &dyn ListingStore) -> Vec<Listing> {
	let catalog = sample_catalog();
	let outcome = store
		.seed_if_empty(&catalog, &CancellationToken::new())
		.await
		.expect("Failed to seed sample catalog.");

	assert_eq!(outcome.written, catalog.len());

	catalog
}

async fn query(store: &dyn ListingStore, criteria: SearchCriteria) -> (Vec<String>, u64) {
	let page = store.query(&criteria, &CancellationToken::new()).await.expect("Query failed.");
	let ids = page.items.iter().map(|item| item.id().to_string()).collect();

	(ids, page.total)
}

pub async fn orders_by_price_with_insertion_tie_break(store: &dyn ListingStore) {
	seed_sample(store).await;

	let (ids, total) = query(store, SearchCriteria::new()).await;

	assert_eq!(total, 6);
	assert_eq!(ids, ["p-2", "p-1", "p-5", "p-4", "p-3", "p-6"]);
}

pub async fn min_price_filters_and_counts(store: &dyn ListingStore) {
	let priced = vec![
		listing("a", "First", "Calle 1", 100),
		listing("b", "Second", "Calle 2", 50),
		listing("c", "Third", "Calle 3", 200),
	];

	store.seed_if_empty(&priced, &CancellationToken::new()).await.expect("Seed failed.");

	let page = store
		.query(&SearchCriteria::new().with_min_price(Decimal::from(60)), &CancellationToken::new())
		.await
		.expect("Query failed.");
	let prices = page.items.iter().map(|item| item.price().amount()).collect::<Vec<_>>();

	assert_eq!(page.total, 2);
	assert_eq!(prices, [Decimal::from(100), Decimal::from(200)]);
}

pub async fn text_filters_ignore_case(store: &dyn ListingStore) {
	seed_sample(store).await;

	for needle in ["casa", "BONITA", "a bon"] {
		let (ids, _) = query(store, SearchCriteria::new().with_name(needle)).await;

		assert!(ids.contains(&"p-1".to_string()), "needle = {needle}");
	}

	let (ids, total) = query(store, SearchCriteria::new().with_name("casa")).await;

	assert_eq!(total, 2);
	assert_eq!(ids, ["p-1", "p-4"]);

	let (ids, total) = query(store, SearchCriteria::new().with_address("MEDELLIN")).await;

	assert_eq!(total, 2);
	assert_eq!(ids, ["p-5", "p-3"]);

	// Wildcard characters are literal.
	let (_, total) = query(store, SearchCriteria::new().with_name("c%a")).await;

	assert_eq!(total, 0);
}

pub async fn text_filters_fold_non_ascii_case(store: &dyn ListingStore) {
	let batch = vec![
		listing("n-1", "CASA PEÑA", "Calle Ñandú", 10),
		listing("n-2", "Casa Pena", "Calle Nandu", 20),
	];

	store.seed_if_empty(&batch, &CancellationToken::new()).await.expect("Seed failed.");

	let (ids, total) = query(store, SearchCriteria::new().with_name("peña")).await;

	assert_eq!(total, 1);
	assert_eq!(ids, ["n-1"]);

	let (ids, _) = query(store, SearchCriteria::new().with_address("ÑANDÚ")).await;

	assert_eq!(ids, ["n-1"]);
}

pub async fn inverted_range_yields_nothing(store: &dyn ListingStore) {
	seed_sample(store).await;

	let criteria = SearchCriteria::new()
		.with_min_price(Decimal::from(100_000))
		.with_max_price(Decimal::from(50_000));
	let (ids, total) = query(store, criteria).await;

	assert_eq!(total, 0);
	assert!(ids.is_empty());
}

pub async fn pages_respect_window(store: &dyn ListingStore) {
	seed_sample(store).await;

	for page_size in 1..=7_i64 {
		for page in 1..=8_i64 {
			let criteria = SearchCriteria::new().with_page(page).with_page_size(page_size);
			let window = criteria.window();
			let (ids, total) = query(store, criteria).await;

			assert_eq!(total, 6, "total must not depend on paging");
			assert_eq!(ids.len() as u64, window.len_of(total), "page={page} size={page_size}");
		}
	}

	let (ids, _) = query(store, SearchCriteria::new().with_page(2).with_page_size(4)).await;

	assert_eq!(ids, ["p-3", "p-6"]);
}

pub async fn total_ignores_paging(store: &dyn ListingStore) {
	seed_sample(store).await;

	let criteria = SearchCriteria::new().with_name("casa").with_page(5).with_page_size(1);
	let (ids, total) = query(store, criteria).await;

	assert!(ids.is_empty());
	assert_eq!(total, 2);
}

pub async fn seeds_empty_collection_once(store: &dyn ListingStore) {
	let first = vec![
		listing("s-1", "Uno", "Calle 1", 10),
		listing("s-2", "Dos", "Calle 2", 20),
		listing("s-3", "Tres", "Calle 3", 30),
	];
	let outcome =
		store.seed_if_empty(&first, &CancellationToken::new()).await.expect("Seed failed.");

	assert_eq!((outcome.supplied, outcome.written), (3, 3));

	for expected in &first {
		let found = store
			.get_by_id(expected.id(), &CancellationToken::new())
			.await
			.expect("Lookup failed.")
			.expect("Seeded listing must be retrievable.");

		assert_eq!(&found, expected);
	}

	let second = vec![listing("s-1", "Otro", "Calle 9", 99), listing("s-9", "Nueve", "Calle 9", 9)];
	let outcome =
		store.seed_if_empty(&second, &CancellationToken::new()).await.expect("Seed failed.");

	assert_eq!((outcome.supplied, outcome.written), (2, 0));

	let (_, total) = query(store, SearchCriteria::new()).await;
	let kept = store
		.get_by_id("s-1", &CancellationToken::new())
		.await
		.expect("Lookup failed.")
		.expect("Original row must survive.");

	assert_eq!(total, 3);
	assert_eq!(kept.name(), "Uno");
}

pub async fn prices_keep_their_exact_value(store: &dyn ListingStore) {
	let priced = |id: &str, amount: &str| {
		let amount: Decimal = amount.parse().expect("Amount must parse.");

		Listing::new(id, "o-1", "Casa", "Calle 1", amount, "").expect("Listing must be valid.")
	};
	let batch = vec![
		priced("x-1", "100.005"),
		priced("x-2", "100000000000000000"),
		priced("x-3", "12345678901234567.891"),
		priced("x-4", "100.004"),
	];

	store.seed_if_empty(&batch, &CancellationToken::new()).await.expect("Seed failed.");

	for expected in &batch {
		let found = store
			.get_by_id(expected.id(), &CancellationToken::new())
			.await
			.expect("Lookup failed.")
			.expect("Seeded listing must be retrievable.");

		assert_eq!(found.price(), expected.price(), "id = {}", expected.id());
	}

	let exact = batch[0].price().amount();
	let (ids, total) =
		query(store, SearchCriteria::new().with_min_price(exact).with_max_price(exact)).await;

	assert_eq!(total, 1);
	assert_eq!(ids, ["x-1"]);
}

pub async fn empty_seed_writes_nothing(store: &dyn ListingStore) {
	let outcome = store.seed_if_empty(&[], &CancellationToken::new()).await.expect("Seed failed.");
	let (_, total) = query(store, SearchCriteria::new()).await;

	assert_eq!((outcome.supplied, outcome.written), (0, 0));
	assert_eq!(total, 0);
}

pub async fn missing_id_is_absent(store: &dyn ListingStore) {
	seed_sample(store).await;

	let found =
		store.get_by_id("does-not-exist", &CancellationToken::new()).await.expect("Lookup failed.");

	assert!(found.is_none());
}

pub async fn cancelled_seed_leaves_store_untouched(store: &dyn ListingStore) {
	let cancel = CancellationToken::new();

	cancel.cancel();

	let err = store
		.seed_if_empty(&sample_catalog(), &cancel)
		.await
		.expect_err("Cancelled seed must fail.");

	assert!(matches!(err, Error::Cancelled));

	let err = store
		.query(&SearchCriteria::new(), &cancel)
		.await
		.expect_err("Cancelled query must fail.");

	assert!(matches!(err, Error::Cancelled));

	let (_, total) = query(store, SearchCriteria::new()).await;

	assert_eq!(total, 0);
}
