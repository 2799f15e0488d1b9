//! Cross-cutting error types for the storefront client.
//!
//! Transport and cache errors live in their own crates (`ApiError` in
//! `shop-client`, `CacheError` in `shop-cache`). This enum covers failures
//! that any crate can hit while handling domain values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A string could not be parsed into a domain enum.
    #[error("invalid {kind}: '{value}' (expected one of: {expected})")]
    InvalidValue {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A request payload failed client-side validation.
    #[error("validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a required field left empty.
    #[must_use]
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("'{field}' is required"))
    }
}
