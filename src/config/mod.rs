//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → PORT environment variable
//!     → command-line flags
//!     → validation.rs (semantic checks)
//!     → GuardConfig (validated, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup; no reload
//! - All fields have defaults to allow running with no file at all
//! - The upstream target never comes from a file or the environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, Overrides};
pub use schema::{GuardConfig, ListenerConfig, ObservabilityConfig, DEFAULT_PORT};
pub use validation::{validate_config, ValidationError};
