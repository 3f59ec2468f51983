//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (loopback address, port)
//!     → listener.rs (bind, fatal on failure)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Loopback only: the guard must not be reachable from other hosts
//! - No connection cap; each connection is an independent Tokio task

pub mod listener;

pub use listener::{bind, ListenerError};
