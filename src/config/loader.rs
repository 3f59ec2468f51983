//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GuardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Overrides applied on top of the file, highest precedence last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Raw value of the `PORT` environment variable.
    pub port_env: Option<String>,
    /// Explicit `--port`.
    pub port: Option<u16>,
    /// Explicit `--log-level`.
    pub log_level: Option<String>,
}

impl Overrides {
    /// Capture overrides from the process environment.
    pub fn from_env() -> Self {
        Self {
            port_env: std::env::var(PORT_ENV).ok(),
            ..Default::default()
        }
    }
}

/// Interpret a `PORT` value. Unparseable or zero values select nothing.
pub fn parse_port(raw: &str) -> Option<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GuardConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Build the effective configuration: defaults, optional file, overrides.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<GuardConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            parse_config(&content)?
        }
        None => GuardConfig::default(),
    };

    if let Some(raw) = overrides.port_env.as_deref() {
        match parse_port(raw) {
            Some(port) => config.listener.port = port,
            None => tracing::warn!(value = %raw, "Ignoring invalid {} value", PORT_ENV),
        }
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    if let Some(level) = &overrides.log_level {
        config.observability.log_level = level.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
