//! Loopback TCP listener.
//!
//! # Responsibilities
//! - Bind to the configured loopback address
//! - Report bind failures with the address that failed

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Refused to bind outside loopback.
    #[error("refusing to bind non-loopback address {0}")]
    NotLoopback(SocketAddr),

    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the listener described by `config`.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr = config.socket_addr();
    if !addr.ip().is_loopback() {
        return Err(ListenerError::NotLoopback(addr));
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    let local_addr = listener
        .local_addr()
        .map_err(|source| ListenerError::Bind { addr, source })?;

    tracing::info!(address = %local_addr, "Listener bound");

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn config(ip: IpAddr, port: u16) -> ListenerConfig {
        ListenerConfig {
            bind_address: ip,
            port,
        }
    }

    #[tokio::test]
    async fn binds_loopback() {
        let listener = bind(&config(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn port_in_use_is_bind_error() {
        let first = bind(&config(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)).await.unwrap();
        let port = first.local_addr().unwrap().port();

        let err = bind(&config(IpAddr::V4(Ipv4Addr::LOCALHOST), port)).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }));
        assert!(err.to_string().contains(&port.to_string()));
    }

    #[tokio::test]
    async fn rejects_wildcard_address() {
        let err = bind(&config(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)).await.unwrap_err();
        assert!(matches!(err, ListenerError::NotLoopback(_)));
    }
}
