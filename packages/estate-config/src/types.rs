use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub seed: Seed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	/// Either "postgres" or "memory".
	#[serde(default = "default_backend")]
	pub backend: String,
	pub postgres: Option<Postgres>,
}
impl Storage {
	pub fn is_memory(&self) -> bool {
		self.backend == BACKEND_MEMORY
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Seed {
	pub enabled: bool,
	/// JSON array of listing records, read on every seed request.
	pub path: String,
}
impl Default for Seed {
	fn default() -> Self {
		Self { enabled: false, path: "data/seed/properties.json".to_string() }
	}
}

pub const BACKEND_POSTGRES: &str = "postgres";
pub const BACKEND_MEMORY: &str = "memory";

pub(crate) fn default_log_level() -> String {
	"info".to_string()
}

fn default_backend() -> String {
	BACKEND_POSTGRES.to_string()
}
