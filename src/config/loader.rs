//! Configuration loading and command line merging.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file. Validation happens in [`resolve`].
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    ProxyConfig::from_toml(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the effective configuration: defaults, then file, then flags.
pub fn resolve(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(port) = cli.port {
        config.listener.port = Some(port);
    }
    if let Some(origin) = &cli.origin {
        config.origin = Some(origin.clone());
    }
    if let Some(ttl) = cli.ttl {
        config.cache.ttl_secs = ttl;
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    config.clear_cache = cli.clear_cache;

    if !config.clear_cache {
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}
