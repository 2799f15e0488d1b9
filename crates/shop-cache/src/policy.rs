//! Expiry knobs. Both are off by default: entries only go stale through
//! invalidation, and unused entries are only dropped once stale.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Fresh entries older than this are served as stale and refetched.
    pub max_age: Option<Duration>,
    /// Unsubscribed fresh entries idle longer than this are dropped by
    /// [`ResourceCache::collect_garbage`](crate::ResourceCache::collect_garbage).
    pub keep_unused_for: Option<Duration>,
}

impl CachePolicy {
    pub(crate) fn is_expired(&self, fetched_at: Option<Instant>, now: Instant) -> bool {
        match (self.max_age, fetched_at) {
            (Some(max_age), Some(fetched_at)) => now.saturating_duration_since(fetched_at) >= max_age,
            _ => false,
        }
    }

    pub(crate) fn is_idle(&self, last_used: Instant, now: Instant) -> bool {
        self.keep_unused_for
            .is_some_and(|keep| now.saturating_duration_since(last_used) >= keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_never_expires() {
        let policy = CachePolicy::default();
        let now = Instant::now();
        assert!(!policy.is_expired(Some(now), now));
        assert!(!policy.is_idle(now, now));
    }

    #[test]
    fn zero_max_age_expires_immediately() {
        let policy = CachePolicy {
            max_age: Some(Duration::ZERO),
            ..CachePolicy::default()
        };
        let now = Instant::now();
        assert!(policy.is_expired(Some(now), now));
        assert!(!policy.is_expired(None, now));
    }

    #[test]
    fn long_keep_is_not_idle() {
        let policy = CachePolicy {
            keep_unused_for: Some(Duration::from_secs(3600)),
            ..CachePolicy::default()
        };
        let now = Instant::now();
        assert!(!policy.is_idle(now, now));
    }
}
