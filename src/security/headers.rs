//! Header names and hop-by-hop header handling.
//!
//! # Responsibilities
//! - Name the headers the admission filter inspects
//! - Strip hop-by-hop headers before a message crosses the proxy
//!
//! # Design Decisions
//! - End-to-end headers pass through untouched, including `Host`
//! - Headers listed in a `Connection` value are hop-by-hop for that message

use axum::http::{header, HeaderMap, HeaderName};

/// Records the relay chain of a request that went through another proxy.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Self-identification header sent by some metadata-service clients.
pub const METADATA_FLAVOR: &str = "metadata-flavor";

/// Hop-by-hop headers (RFC 9110 §7.6.1 plus the legacy `Proxy-Connection`
/// and `Keep-Alive`).
const HOP_BY_HOP: [HeaderName; 9] = [
    header::CONNECTION,
    HeaderName::from_static("proxy-connection"),
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Remove hop-by-hop headers in place.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Collect first: the Connection header itself is removed below.
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}
