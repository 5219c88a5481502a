//! Configuration loading utilities

use crate::{settings::ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Default config file, relative to the working directory, without extension
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Prefix of environment overrides, e.g. `LP_AUM__SUPPLY__PRE_MINED_TOKEN_TOTAL_SUPPLY`
pub const ENV_PREFIX: &str = "LP_AUM";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to load configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from `CONFIG_PATH` (or `config/config`) plus environment overrides
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

/// Load and validate configuration from a specific file
///
/// The file is optional; any value it (or the environment) does not set keeps
/// its default.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("__")
				.separator("__"),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
