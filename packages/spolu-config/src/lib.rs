mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Cache, Config, History, PlaceProviderConfig, ProviderConfig, Providers, Search, Suggest,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.search.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "search.debounce_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.provider_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.provider_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.min_query_chars == 0 {
		return Err(Error::Validation {
			message: "search.min_query_chars must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.min_similarity.is_finite() {
		return Err(Error::Validation {
			message: "search.min_similarity must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.min_similarity) {
		return Err(Error::Validation {
			message: "search.min_similarity must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.history.max_entries == 0 {
		return Err(Error::Validation {
			message: "history.max_entries must be greater than zero.".to_string(),
		});
	}
	if cfg.history.suggest_count == 0 {
		return Err(Error::Validation {
			message: "history.suggest_count must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.popular_count == 0 {
		return Err(Error::Validation {
			message: "suggest.popular_count must be greater than zero.".to_string(),
		});
	}
	if cfg.cache.ttl_secs <= 0 {
		return Err(Error::Validation {
			message: "cache.ttl_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.cache.max_entries == 0 {
		return Err(Error::Validation {
			message: "cache.max_entries must be greater than zero.".to_string(),
		});
	}

	for (label, provider_base, timeout_ms) in [
		("rides", &cfg.providers.rides.api_base, cfg.providers.rides.timeout_ms),
		("users", &cfg.providers.users.api_base, cfg.providers.users.timeout_ms),
	] {
		if provider_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.{label}.api_base must be non-empty."),
			});
		}
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("providers.{label}.timeout_ms must be greater than zero."),
			});
		}
	}

	// The place capability is optional; when configured its timeout must still
	// be usable.
	if cfg.providers.place.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.place.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
