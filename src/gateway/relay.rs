//! Relay capability: send a prepared request upstream and stream the answer back.
//!
//! # Design Decisions
//! - The gateway only depends on [`Relay`]; tests swap in an in-memory one
//! - [`HyperRelay`] streams both bodies, no buffering, no retries
//! - Relay failures become `502 Bad Gateway` with an empty body

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    response::IntoResponse,
};
use futures_util::future::BoxFuture;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

/// Errors surfaced by a [`Relay`].
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connecting to or exchanging with the upstream failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The outbound request could not be built.
    #[error("invalid outbound request: {0}")]
    Request(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        StatusCode::BAD_GATEWAY.into_response()
    }
}

/// Sends a request whose URI already names the upstream.
pub trait Relay: Send + Sync {
    fn relay(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, RelayError>>;
}

/// [`Relay`] over a pooled hyper-util HTTP client with transport defaults.
#[derive(Clone)]
pub struct HyperRelay {
    client: Client<HttpConnector, Body>,
}

impl HyperRelay {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HyperRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Relay for HyperRelay {
    fn relay(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, RelayError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let uri = request.uri().clone();
            match client.request(request).await {
                Ok(response) => {
                    let (parts, body) = response.into_parts();
                    Ok(Response::from_parts(parts, Body::new(body)))
                }
                Err(e) => {
                    tracing::error!(upstream = %uri, error = %e, "Upstream error");
                    Err(RelayError::Upstream(e))
                }
            }
        })
    }
}
