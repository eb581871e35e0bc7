// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the docman client.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`DOCMAN_*`)
//! 2. Config file (`~/.config/docman/config.toml`, or an explicit path)
//! 3. Built-in defaults
//!
//! # Usage
//!
//! ```ignore
//! let config = docman_config::load_config()?;
//! println!("policy backend at {}", config.api.base_url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

use std::path::PathBuf;

pub use error::ConfigError;
pub use layer::DocmanConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocmanConfig {
	pub api: ApiConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from the user config file and the environment.
pub fn load_config() -> Result<DocmanConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource), Box::new(EnvSource)];
	if let Some(user) = TomlSource::user() {
		sources.push(Box::new(user));
	}
	load_from_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<DocmanConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<DocmanConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = DocmanConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize a merged layer into resolved config.
pub fn finalize(layer: DocmanConfigLayer) -> Result<DocmanConfig, ConfigError> {
	let api = layer.api.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_api(&api)?;

	info!(
		base_url = %api.base_url,
		timeout_secs = api.timeout_secs,
		log_level = %logging.level,
		"Client configuration loaded"
	);

	Ok(DocmanConfig { api, logging })
}

fn validate_api(api: &ApiConfig) -> Result<(), ConfigError> {
	if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
		return Err(ConfigError::Validation(format!(
			"api.base_url must be an http(s) URL, got '{}'",
			api.base_url
		)));
	}
	if api.timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"api.timeout_secs must be greater than zero".to_string(),
		));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_finalize_defaults() {
		let config = finalize(DocmanConfigLayer::default()).unwrap();
		assert_eq!(config, DocmanConfig::default());
	}

	#[test]
	fn test_rejects_non_http_base_url() {
		let layer = DocmanConfigLayer {
			api: Some(ApiConfigLayer {
				base_url: Some("ftp://example.com".to_string()),
				timeout_secs: None,
			}),
			logging: None,
		};
		let err = finalize(layer).unwrap_err();
		assert!(err.to_string().contains("http(s)"));
	}

	#[test]
	fn test_rejects_zero_timeout() {
		let layer = DocmanConfigLayer {
			api: Some(ApiConfigLayer {
				base_url: None,
				timeout_secs: Some(0),
			}),
			logging: None,
		};
		assert!(matches!(finalize(layer), Err(ConfigError::Validation(_))));
	}
}
