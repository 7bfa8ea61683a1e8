mod error;
mod types;

pub use error::{Error, Result};
pub use types::{BACKEND_MEMORY, BACKEND_POSTGRES, Config, Postgres, Seed, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address such as 127.0.0.1:8080."
				.to_string(),
		});
	}
	if !matches!(cfg.storage.backend.as_str(), BACKEND_POSTGRES | BACKEND_MEMORY) {
		return Err(Error::Validation {
			message: "storage.backend must be one of postgres or memory.".to_string(),
		});
	}

	if cfg.storage.backend == BACKEND_POSTGRES {
		let Some(postgres) = cfg.storage.postgres.as_ref() else {
			return Err(Error::Validation {
				message: "storage.postgres is required when storage.backend is postgres."
					.to_string(),
			});
		};

		if postgres.dsn.trim().is_empty() {
			return Err(Error::Validation {
				message: "storage.postgres.dsn must be non-empty.".to_string(),
			});
		}
		if postgres.pool_max_conns == 0 {
			return Err(Error::Validation {
				message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
			});
		}
	}

	if cfg.seed.enabled && cfg.seed.path.is_empty() {
		return Err(Error::Validation {
			message: "seed.path must be non-empty when seed.enabled is true.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.seed.path = cfg.seed.path.trim().to_string();

	let log_level = cfg.service.log_level.trim();

	cfg.service.log_level =
		if log_level.is_empty() { types::default_log_level() } else { log_level.to_string() };
	cfg.storage.backend = cfg.storage.backend.trim().to_ascii_lowercase();
}
