//! Resource cache expiry settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Serve entries older than this as stale. Unset: entries only go stale
    /// through invalidation.
    #[serde(default)]
    pub max_age_secs: Option<u64>,

    /// Drop unsubscribed entries idle for this long during garbage collection.
    #[serde(default)]
    pub keep_unused_secs: Option<u64>,
}

impl CacheConfig {
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn keep_unused_for(&self) -> Option<Duration> {
        self.keep_unused_secs.map(Duration::from_secs)
    }
}
