//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Keep the listener on loopback
//! - Validate value ranges and the log filter
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: GuardConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::GuardConfig;
use crate::observability::logging::default_directive;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("listener.bind_address {0} is not a loopback address")]
    NotLoopback(String),

    #[error("observability.log_level {value:?} is invalid: {reason}")]
    LogLevel { value: String, reason: String },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if !config.listener.bind_address.is_loopback() {
        errors.push(ValidationError::NotLoopback(
            config.listener.bind_address.to_string(),
        ));
    }

    // Validate the directive logging::init installs, not the raw value.
    if let Err(e) = EnvFilter::try_new(default_directive(&config.observability)) {
        errors.push(ValidationError::LogLevel {
            value: config.observability.log_level.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv6Addr};

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GuardConfig::default()), Ok(()));
    }

    #[test]
    fn ipv6_loopback_allowed() {
        let mut config = GuardConfig::default();
        config.listener.bind_address = IpAddr::V6(Ipv6Addr::LOCALHOST);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn reports_every_error() {
        let mut config = GuardConfig::default();
        config.listener.port = 0;
        config.listener.bind_address = "192.168.0.10".parse().unwrap();
        config.observability.log_level = "metadata_guard=loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], ValidationError::ZeroPort);
        assert_eq!(
            errors[1],
            ValidationError::NotLoopback("192.168.0.10".to_string())
        );
        assert!(matches!(errors[2], ValidationError::LogLevel { .. }));
    }

    #[test]
    fn unknown_bare_level_rejected() {
        for level in ["verbose", "loud"] {
            let mut config = GuardConfig::default();
            config.observability.log_level = level.to_string();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(&errors[..], [ValidationError::LogLevel { value, .. }] if value == level),
                "{} should be rejected, got {:?}",
                level,
                errors
            );
        }
    }

    #[test]
    fn known_levels_and_directives_accepted() {
        for level in ["trace", "debug", "info", "warn", "error", "metadata_guard=debug,hyper=warn"] {
            let mut config = GuardConfig::default();
            config.observability.log_level = level.to_string();
            assert_eq!(validate_config(&config), Ok(()), "{}", level);
        }
    }
}
