//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request headers:
//!     → admission.rs (forwarded-for, metadata-flavor, user-agent rules)
//!     → Allow: hand to gateway
//!     → Deny:  400, upstream never contacted
//!
//! Outbound / returning messages:
//!     → headers.rs (strip hop-by-hop)
//! ```
//!
//! # Design Decisions
//! - Fail closed: anything not explicitly allowed is denied
//! - No trust in client input across requests; every request re-evaluated

pub mod admission;
pub mod headers;

pub use admission::{evaluate, Decision, Reason, KNOWN_CLIENT_PREFIXES};
