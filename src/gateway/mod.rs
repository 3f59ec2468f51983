//! Forwarding gateway subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → security::admission (decide)
//!     → one INFO event: decision, target, user agent
//!     → Deny:  400, empty body, upstream untouched
//!     → Allow: target.rs (re-address to upstream)
//!              → strip hop-by-hop headers, downgrade to HTTP/1.1
//!              → relay.rs (stream to upstream and back)
//!              → strip hop-by-hop headers from the response
//! ```
//!
//! # Design Decisions
//! - Target is fixed per gateway and shared read-only; no locks
//! - Request and response bodies are streamed, never buffered
//! - No retries, caching or timeouts beyond transport defaults

pub mod relay;
pub mod target;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, Version},
    response::{IntoResponse, Response},
};

use crate::security::{admission, headers::strip_hop_by_hop};

pub use relay::{HyperRelay, Relay, RelayError};
pub use target::{TargetError, UpstreamTarget};

/// Guards a single upstream target.
#[derive(Clone)]
pub struct Gateway {
    target: UpstreamTarget,
    relay: Arc<dyn Relay>,
}

impl Gateway {
    pub fn new(target: UpstreamTarget, relay: Arc<dyn Relay>) -> Self {
        Self { target, relay }
    }

    /// Gateway backed by a [`HyperRelay`].
    pub fn with_hyper(target: UpstreamTarget) -> Self {
        Self::new(target, Arc::new(HyperRelay::new()))
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Admit or reject `request`, forwarding it when admitted.
    pub async fn handle(&self, peer: SocketAddr, request: Request<Body>) -> Response {
        let decision = admission::evaluate(request.headers());
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        tracing::info!(
            decision = decision.label(),
            url = %target,
            user_agent = %admission::user_agent_of(request.headers()),
            reason = %decision.reason(),
            peer = %peer,
            "Admission decision"
        );

        if !decision.is_allowed() {
            return StatusCode::BAD_REQUEST.into_response();
        }

        match self.forward(request).await {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }

    async fn forward(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let (mut parts, body) = request.into_parts();
        parts.uri = self
            .target
            .rewrite(&parts.uri)
            .map_err(|e| RelayError::Request(e.to_string()))?;
        strip_hop_by_hop(&mut parts.headers);

        // The upstream speaks HTTP/1.1 whatever the caller used (h2c included).
        let inbound_version = std::mem::replace(&mut parts.version, Version::HTTP_11);

        let mut response = self.relay.relay(Request::from_parts(parts, body)).await?;
        strip_hop_by_hop(response.headers_mut());
        *response.version_mut() = inbound_version;
        Ok(response)
    }
}
