use thiserror::Error;

/// Errors raised by the cache itself (as opposed to the fetches it runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The cache was disposed and accepts no more queries.
    #[error("resource cache has been disposed")]
    Closed,
}
