//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (loopback only)
//!     → server.rs (Axum setup, HTTP/1.1 parsing, tracing span)
//!     → gateway (admission decision, relay or 400)
//!     → Send to client
//! ```
//!
//! Malformed HTTP never reaches the gateway; hyper rejects it first.

pub mod server;

pub use server::HttpServer;
