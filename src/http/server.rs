//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router: every method and path hits one handler
//! - Wire up request tracing
//! - Serve a bound listener until shutdown
//! - Hand each request to the [`Gateway`]

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GuardConfig;
use crate::gateway::{Gateway, UpstreamTarget};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

/// HTTP server for the metadata guard.
pub struct HttpServer {
    router: Router,
    gateway: Arc<Gateway>,
}

impl HttpServer {
    /// Create a server forwarding to the configured upstream over hyper.
    pub fn new(config: &GuardConfig) -> Self {
        Self::with_gateway(Gateway::with_hyper(config.upstream.clone()))
    }

    /// Create a server forwarding to an explicit target.
    pub fn for_target(target: UpstreamTarget) -> Self {
        Self::with_gateway(Gateway::with_hyper(target))
    }

    pub fn with_gateway(gateway: Gateway) -> Self {
        let gateway = Arc::new(gateway);
        let state = AppState {
            gateway: gateway.clone(),
        };
        Self {
            router: Self::build_router(state),
            gateway,
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(guard_handler))
            .route("/", any(guard_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.gateway.target(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: admission check, then forward or reject.
async fn guard_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    state.gateway.handle(addr, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn every_path_and_method_is_guarded() {
        let server = HttpServer::for_target(UpstreamTarget::metadata_service());
        let app = server
            .router()
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 5555))));

        for (method, path) in [("GET", "/"), ("POST", "/latest/api/token"), ("DELETE", "/a/b/c?d=e")] {
            let request = Request::builder()
                .method(method)
                .uri(path)
                .header("user-agent", "Mozilla/5.0")
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", method, path);
        }
    }
}
