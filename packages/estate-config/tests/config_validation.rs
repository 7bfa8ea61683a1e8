use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use estate_config::Error;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

static NEXT_FILE: AtomicU64 = AtomicU64::new(0);

fn sample_with(edit: impl FnOnce(&mut toml::Table)) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	edit(root);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn section<'a>(root: &'a mut toml::Table, name: &str) -> &'a mut toml::Table {
	root.get_mut(name)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Template config must include [{name}]."))
}

fn write_temp_config(payload: &str) -> PathBuf {
	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("Clock is before epoch.");
	let path = env::temp_dir().join(format!(
		"estate_config_{}_{}_{}.toml",
		std::process::id(),
		nanos.as_nanos(),
		NEXT_FILE.fetch_add(1, Ordering::SeqCst)
	));

	fs::write(&path, payload).expect("Failed to write temp config.");

	path
}

fn validation_message(result: estate_config::Result<estate_config::Config>) -> String {
	match result {
		Err(Error::Validation { message }) => message,
		other => panic!("Expected a validation error, got {other:?}."),
	}
}

#[test]
fn loads_sample_config() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML);
	let cfg = estate_config::load(&path).expect("Sample config must load.");

	fs::remove_file(&path).ok();

	assert_eq!(cfg.service.http_bind, "127.0.0.1:8080");
	assert_eq!(cfg.storage.backend, "postgres");
	assert_eq!(cfg.storage.postgres.as_ref().map(|pg| pg.pool_max_conns), Some(8));
	assert!(cfg.seed.enabled);
	assert_eq!(cfg.seed.path, "data/seed/properties.json");
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("estate_config_does_not_exist.toml");
	let err = estate_config::load(&path).expect_err("Missing config must fail.");

	assert!(matches!(err, Error::ReadConfig { path: ref p, .. } if *p == path));
}

#[test]
fn parse_error_reports_path() {
	let path = write_temp_config("[service\nhttp_bind = ");
	let err = estate_config::load(&path).expect_err("Broken TOML must fail.");

	fs::remove_file(&path).ok();

	assert!(matches!(err, Error::ParseConfig { path: ref p, .. } if *p == path));
}

#[test]
fn seed_section_defaults_to_disabled() {
	let raw = sample_with(|root| {
		root.remove("seed");
	});
	let cfg = estate_config::parse(&raw).expect("Config without [seed] must load.");

	assert!(!cfg.seed.enabled);
	assert_eq!(cfg.seed.path, "data/seed/properties.json");
}

#[test]
fn blank_log_level_falls_back_to_info() {
	let raw = sample_with(|root| {
		section(root, "service").insert("log_level".to_string(), Value::String("  ".to_string()));
	});
	let cfg = estate_config::parse(&raw).expect("Config must load.");

	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn rejects_unparseable_http_bind() {
	let raw = sample_with(|root| {
		section(root, "service")
			.insert("http_bind".to_string(), Value::String("localhost".to_string()));
	});

	assert!(validation_message(estate_config::parse(&raw)).contains("service.http_bind"));
}

#[test]
fn rejects_unknown_backend() {
	let raw = sample_with(|root| {
		section(root, "storage").insert("backend".to_string(), Value::String("mongo".to_string()));
	});

	assert_eq!(
		validation_message(estate_config::parse(&raw)),
		"storage.backend must be one of postgres or memory."
	);
}

#[test]
fn postgres_backend_requires_postgres_section() {
	let raw = sample_with(|root| {
		section(root, "storage").remove("postgres");
	});

	assert!(validation_message(estate_config::parse(&raw)).contains("storage.postgres"));
}

#[test]
fn memory_backend_does_not_need_postgres() {
	let raw = sample_with(|root| {
		let storage = section(root, "storage");

		storage.remove("postgres");
		storage.insert("backend".to_string(), Value::String("Memory".to_string()));
	});
	let cfg = estate_config::parse(&raw).expect("Memory backend must load.");

	assert!(cfg.storage.is_memory());
}

#[test]
fn rejects_zero_pool_size() {
	let raw = sample_with(|root| {
		let storage = section(root, "storage");
		let postgres = section(storage, "postgres");

		postgres.insert("pool_max_conns".to_string(), Value::Integer(0));
	});

	assert_eq!(
		validation_message(estate_config::parse(&raw)),
		"storage.postgres.pool_max_conns must be greater than zero."
	);
}

#[test]
fn rejects_blank_seed_path_when_enabled() {
	let raw = sample_with(|root| {
		section(root, "seed").insert("path".to_string(), Value::String(" ".to_string()));
	});

	assert_eq!(
		validation_message(estate_config::parse(&raw)),
		"seed.path must be non-empty when seed.enabled is true."
	);
}
