//! LibBuddy client session library.
//!
//! The application-side counterpart to the backend's session controller:
//! stores the token pair, decodes access-token expiry, proactively renews the
//! access token shortly before it expires, and cancels superseded search
//! requests so stale results never overwrite fresher ones.

pub mod api;
pub mod search;
pub mod session;
pub mod token;

use thiserror::Error;

/// Errors surfaced by the client session library.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("malformed token")]
    MalformedToken,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected the request: {0}")]
    Rejected(String),
}
