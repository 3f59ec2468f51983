//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gateway       → one admission event per request (decision, target, user agent)
//! relay         → upstream failures
//! tower_http    → request spans
//!     → logging.rs (tracing subscriber, stdout)
//! ```

pub mod logging;
