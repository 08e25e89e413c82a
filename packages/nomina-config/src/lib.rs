mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Browser, Config, Gateway, Service};

use std::{fs, path::Path};

/// Reads, normalizes and validates the TOML file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Config> {
	let path = path.as_ref();
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::ReadConfig { path: path.to_path_buf(), source })?;
	let mut cfg = toml::from_str::<Config>(&raw)
		.map_err(|source| Error::ParseConfig { path: path.to_path_buf(), source })?;

	normalize(&mut cfg);
	validate(&cfg).map(|()| cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.gateway.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "gateway.api_base must be non-empty.".to_string() });
	}

	for (label, path) in [
		("gateway.surname_path", &cfg.gateway.surname_path),
		("gateway.institution_path", &cfg.gateway.institution_path),
	] {
		if path.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
		if !path.starts_with('/') {
			return Err(Error::Validation { message: format!("{label} must start with '/'.") });
		}
	}

	if cfg.gateway.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "gateway.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.gateway.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("gateway.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.browser.page_size == 0 {
		return Err(Error::Validation {
			message: "browser.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.browser.initial_batch == 0 {
		return Err(Error::Validation {
			message: "browser.initial_batch must be greater than zero.".to_string(),
		});
	}
	if cfg.browser.bulk_batch < cfg.browser.initial_batch {
		return Err(Error::Validation {
			message: "browser.bulk_batch must be greater than or equal to browser.initial_batch."
				.to_string(),
		});
	}
	if cfg.browser.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "browser.debounce_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.gateway.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.gateway.api_key = None;
	}

	let trimmed = cfg.gateway.api_base.trim().trim_end_matches('/');

	if trimmed.len() != cfg.gateway.api_base.len() {
		cfg.gateway.api_base = trimmed.to_string();
	}
}
