use serde::Serialize;
use serde_json::Value;
use shop_core::resource::Tag;
use std::sync::Arc;
use std::time::Instant;

use crate::key::CacheKey;

/// Lifecycle state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// First fetch still in flight; no value yet.
    Loading,
    /// Value matches the server as far as the cache knows.
    Fresh,
    /// Value is known to be outdated. Still servable through `peek`, refetched on the next query.
    Stale,
}

/// Point-in-time view of an entry, for inspection and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub key: CacheKey,
    pub status: EntryStatus,
    pub tags: Vec<Tag>,
    pub subscribers: usize,
    pub value: Option<Arc<Value>>,
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub value: Option<Arc<Value>>,
    pub tags: Vec<Tag>,
    pub status: EntryStatus,
    pub fetched_at: Option<Instant>,
    pub last_used: Instant,
    /// Sequence number of the fetch that produced `value`.
    pub seq: u64,
    /// Clock value of the last invalidation that hit this entry.
    pub invalidated_at: u64,
}

impl Entry {
    pub fn loading(now: Instant) -> Self {
        Self {
            value: None,
            tags: Vec::new(),
            status: EntryStatus::Loading,
            fetched_at: None,
            last_used: now,
            seq: 0,
            invalidated_at: 0,
        }
    }

    pub fn provides_any(&self, invalidated: &[Tag]) -> bool {
        self.tags
            .iter()
            .any(|provided| invalidated.iter().any(|tag| tag.invalidates(provided)))
    }
}
