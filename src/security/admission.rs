//! Request admission filter.
//!
//! Decides whether a request may reach the metadata service. Rules are
//! evaluated in order and the first match wins:
//!
//! 1. any non-empty `X-Forwarded-For` value → deny (request already crossed
//!    another proxy hop)
//! 2. `Metadata-Flavor: Amazon` → allow
//! 3. `User-Agent` absent or empty → deny
//! 4. `User-Agent` starting with a [`KNOWN_CLIENT_PREFIXES`] entry → allow
//! 5. anything else → deny
//!
//! # Design Decisions
//! - Pure function of the header map: no state, no I/O, never fails
//! - Values are compared as raw bytes; non-UTF-8 input just fails to match
//! - Literal prefix matching only; no patterns

use std::fmt;

use axum::http::{header, HeaderMap};

use crate::security::headers::{METADATA_FLAVOR, X_FORWARDED_FOR};

/// `User-Agent` prefixes of SDK and CLI tooling allowed through.
pub const KNOWN_CLIENT_PREFIXES: [&str; 5] = [
    "aws-chalice/",
    "aws-cli/",
    "aws-sdk-",
    "Boto3/",
    "Botocore/",
];

/// `Metadata-Flavor` value that marks a trusted automated caller.
///
/// Compared byte for byte: `amazon` or `Amazon ` do not match.
pub const TRUSTED_METADATA_FLAVOR: &str = "Amazon";

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Reason),
    Deny(Reason),
}

/// The rule that produced a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// `X-Forwarded-For` carried a non-empty value.
    ForwardedFor,
    /// `Metadata-Flavor` matched [`TRUSTED_METADATA_FLAVOR`].
    MetadataFlavor,
    /// No usable `User-Agent`.
    MissingUserAgent,
    /// `User-Agent` starts with one of [`KNOWN_CLIENT_PREFIXES`].
    KnownClient { prefix: &'static str },
    /// `User-Agent` present but not on the allowlist.
    UnknownClient,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    pub fn reason(&self) -> Reason {
        match *self {
            Decision::Allow(reason) | Decision::Deny(reason) => reason,
        }
    }

    /// Short label used in the per-request log line.
    pub fn label(&self) -> &'static str {
        if self.is_allowed() {
            "proxied"
        } else {
            "blocked"
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::ForwardedFor => write!(f, "forwarded-for header present"),
            Reason::MetadataFlavor => write!(f, "metadata-flavor marker"),
            Reason::MissingUserAgent => write!(f, "missing user-agent"),
            Reason::KnownClient { prefix } => write!(f, "known client prefix {}", prefix),
            Reason::UnknownClient => write!(f, "unknown user-agent"),
        }
    }
}

/// Evaluate the admission rules against a request's headers.
pub fn evaluate(headers: &HeaderMap) -> Decision {
    let forwarded = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .any(|v| !v.as_bytes().is_empty());
    if forwarded {
        return Decision::Deny(Reason::ForwardedFor);
    }

    let flavor = headers.get(METADATA_FLAVOR).map(|v| v.as_bytes());
    if flavor == Some(TRUSTED_METADATA_FLAVOR.as_bytes()) {
        return Decision::Allow(Reason::MetadataFlavor);
    }

    let user_agent = match headers.get(header::USER_AGENT) {
        Some(v) if !v.as_bytes().is_empty() => v.as_bytes(),
        _ => return Decision::Deny(Reason::MissingUserAgent),
    };

    KNOWN_CLIENT_PREFIXES
        .iter()
        .find(|prefix| user_agent.starts_with(prefix.as_bytes()))
        .map(|&prefix| Decision::Allow(Reason::KnownClient { prefix }))
        .unwrap_or(Decision::Deny(Reason::UnknownClient))
}

/// Declared identity string for logging. Empty when absent.
pub fn user_agent_of(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}
