//! Upstream target address.

use std::fmt;
use std::str::FromStr;

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::Uri;
use thiserror::Error;
use url::Url;

/// Link-local instance metadata service address.
pub const DEFAULT_UPSTREAM: &str = "http://169.254.169.254";

/// Errors raised while parsing an upstream target.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid upstream url {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("upstream {0} must use plain http")]
    Scheme(String),

    #[error("upstream {0} has no host")]
    MissingHost(String),

    #[error("upstream {0} must not carry a path, query or fragment")]
    NotBaseUrl(String),

    #[error("invalid upstream authority {0}")]
    Authority(String),

    #[error("could not build upstream uri: {0}")]
    Uri(#[from] axum::http::Error),
}

/// Base URL (scheme, host, port) that admitted requests are sent to.
///
/// Immutable once built; requests are re-addressed by swapping scheme and
/// authority while keeping their own path and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    authority: Authority,
}

impl UpstreamTarget {
    /// Parse a base URL such as `http://169.254.169.254` or `http://127.0.0.1:8080`.
    pub fn parse(url: &str) -> Result<Self, TargetError> {
        let parsed = Url::parse(url).map_err(|source| TargetError::Parse {
            url: url.to_string(),
            source,
        })?;

        if parsed.scheme() != "http" {
            return Err(TargetError::Scheme(url.to_string()));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| TargetError::MissingHost(url.to_string()))?;
        if !matches!(parsed.path(), "" | "/")
            || parsed.query().is_some()
            || parsed.fragment().is_some()
            || !parsed.username().is_empty()
            || parsed.password().is_some()
        {
            return Err(TargetError::NotBaseUrl(url.to_string()));
        }

        let port = parsed.port_or_known_default().unwrap_or(80);
        let authority = Authority::from_str(&format!("{}:{}", host, port))
            .map_err(|_| TargetError::Authority(format!("{}:{}", host, port)))?;

        Ok(Self { authority })
    }

    /// The metadata service target used by the binary.
    pub fn metadata_service() -> Self {
        Self {
            authority: Authority::from_static("169.254.169.254:80"),
        }
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Address `uri` at this target, keeping its path and query.
    pub fn rewrite(&self, uri: &Uri) -> Result<Uri, TargetError> {
        let path_and_query = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?)
    }
}

impl Default for UpstreamTarget {
    fn default() -> Self {
        Self::metadata_service()
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}", self.authority)
    }
}
