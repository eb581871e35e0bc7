// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::DocmanConfigLayer;
use crate::sections::{ApiConfigLayer, LogFormat, LoggingConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<DocmanConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<DocmanConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(DocmanConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `$XDG_CONFIG_HOME/docman/config.toml`, if a config directory can be determined.
	pub fn user() -> Option<Self> {
		dirs::config_dir().map(|dir| Self::new(dir.join("docman").join("config.toml")))
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<DocmanConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(DocmanConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: DocmanConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: DOCMAN_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<DocmanConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_lookup(|name| std::env::var(name).ok())
	}
}

fn load_from_lookup<F>(lookup: F) -> Result<DocmanConfigLayer, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let timeout_secs = match var("DOCMAN_API_TIMEOUT_SECS") {
		Some(v) => Some(v.parse::<u64>().map_err(|_| {
			ConfigError::invalid_value("DOCMAN_API_TIMEOUT_SECS", format!("invalid u64 value '{v}'"))
		})?),
		None => None,
	};

	let format = var("DOCMAN_LOG_FORMAT")
		.map(|v| v.parse::<LogFormat>())
		.transpose()?;

	Ok(DocmanConfigLayer {
		api: Some(ApiConfigLayer {
			base_url: var("DOCMAN_API_BASE_URL"),
			timeout_secs,
		}),
		logging: Some(LoggingConfigLayer {
			level: var("DOCMAN_LOG_LEVEL"),
			format,
		}),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| map.get(name).cloned()
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.api.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let layer = TomlSource::new("/nonexistent/docman.toml").load().unwrap();
		assert!(layer.api.is_none());
	}

	#[test]
	fn test_toml_source_reads_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[api]\nbase_url = \"https://docs.example.com\"\ntimeout_secs = 5\n\n[logging]\nformat = \"json\""
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		let api = layer.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("https://docs.example.com"));
		assert_eq!(api.timeout_secs, Some(5));
		assert_eq!(layer.logging.unwrap().format, Some(LogFormat::Json));
	}

	#[test]
	fn test_toml_source_reports_parse_errors() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[api\nbase_url = ").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_values_are_read() {
		let layer = load_from_lookup(lookup(&[
			("DOCMAN_API_BASE_URL", "https://policy.internal"),
			("DOCMAN_API_TIMEOUT_SECS", "12"),
			("DOCMAN_LOG_LEVEL", "debug"),
		]))
		.unwrap();

		let api = layer.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("https://policy.internal"));
		assert_eq!(api.timeout_secs, Some(12));
		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("debug"));
	}

	#[test]
	fn test_env_empty_values_are_ignored() {
		let layer = load_from_lookup(lookup(&[("DOCMAN_API_BASE_URL", "")])).unwrap();
		assert!(layer.api.unwrap().base_url.is_none());
	}

	#[test]
	fn test_env_invalid_timeout_is_rejected() {
		let err = load_from_lookup(lookup(&[("DOCMAN_API_TIMEOUT_SECS", "soon")])).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}
}
