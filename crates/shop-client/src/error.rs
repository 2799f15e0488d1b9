//! Client error taxonomy.

use shop_cache::CacheError;
use shop_core::CoreError;
use thiserror::Error;

/// Errors surfaced by the storefront client.
///
/// `Clone` so that every reader joined on one de-duplicated fetch receives
/// the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("request failed ({status}): {message}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Backend-supplied message, response body, or reason phrase.
        message: String,
    },

    /// A 2xx body that could not be read, is not JSON, or is not the
    /// expected shape. The server did answer.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Rejected before sending.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Signed in, but the session could not be persisted. The in-memory
    /// session is active; it will not survive a restart.
    #[error("session could not be saved: {0}")]
    Session(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Whether the request reached the server.
    pub(crate) const fn reached_server(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Decode(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<shop_auth::AuthError> for ApiError {
    fn from(err: shop_auth::AuthError) -> Self {
        Self::Session(err.to_string())
    }
}
