//! Metadata Guard
//!
//! A loopback reverse proxy in front of the instance metadata service that
//! only lets SDK and CLI tooling through.
//!
//! ```text
//!  Client ──▶ net::listener ──▶ http::server ──▶ security::admission
//!  (loopback)                                        │
//!                                   Deny ◀───────────┤
//!                                   400              │ Allow
//!                                                    ▼
//!                                   gateway (re-address, strip hop-by-hop)
//!                                                    │
//!                                                    ▼
//!  Client ◀──────────────── response stream ◀── gateway::relay ◀──▶ 169.254.169.254
//! ```

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;

pub use config::GuardConfig;
pub use gateway::{Gateway, UpstreamTarget};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
