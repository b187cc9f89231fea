//! Unified error handling for the client data layer.
//!
//! Every operation returns `Result<T, AppError>`. Failures are additionally
//! folded into the owning slice's lifecycle state, so view code can observe
//! `error` flags instead of handling raw errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type for the client layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// The server returned a well-formed error response; the message is
    /// surfaced verbatim as the rejection reason.
    #[error("{0}")]
    Api(String),

    /// The request never produced a response (connection refused, DNS
    /// failure, and so on).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response body did not match the endpoint's schema. Kept distinct
    /// from [`AppError::Api`] so decode bugs are never mistaken for
    /// server-reported errors.
    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A credentialed operation was invoked without a session. Fails fast;
    /// the network is never reached.
    #[error("not signed in")]
    NotAuthenticated,

    /// A precondition local to this layer failed (empty cart, missing
    /// shipping address).
    #[error("{0}")]
    Invalid(String),

    /// Durable storage read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// The human-readable rejection reason recorded on the lifecycle slice.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
