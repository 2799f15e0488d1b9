use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde_json::Value;
use shop_core::resource::{SessionScoped, Tag};

use crate::entry::{Entry, EntrySnapshot, EntryStatus};
use crate::error::CacheError;
use crate::key::CacheKey;
use crate::policy::CachePolicy;

type SharedFetch<E> = Shared<BoxFuture<'static, Result<Arc<Value>, E>>>;

struct InFlight<E> {
    seq: u64,
    fetch: SharedFetch<E>,
    /// Tags invalidated while this fetch was running. The result's tags are
    /// not known until it lands, so they are checked against these at settle.
    invalidated: Vec<Tag>,
}

struct State<E> {
    entries: HashMap<CacheKey, Entry>,
    in_flight: HashMap<CacheKey, InFlight<E>>,
    subscribers: HashMap<CacheKey, usize>,
    /// Monotonic counter shared by fetch sequence numbers and invalidation marks.
    clock: u64,
    generation: u64,
    closed: bool,
}

impl<E> State<E> {
    const fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn snapshot(&self, key: &CacheKey, entry: &Entry) -> EntrySnapshot {
        EntrySnapshot {
            key: key.clone(),
            status: entry.status,
            tags: entry.tags.clone(),
            subscribers: self.subscribers.get(key).copied().unwrap_or(0),
            value: entry.value.clone(),
        }
    }
}

/// Tag-invalidated cache of JSON query results.
///
/// `E` is the error type of the fetches the cache runs. It must be cloneable
/// because every reader joined onto an in-flight fetch receives the same
/// outcome.
pub struct ResourceCache<E> {
    state: Arc<Mutex<State<E>>>,
    policy: CachePolicy,
}

impl<E> ResourceCache<E>
where
    E: Clone + Send + Sync + From<CacheError> + 'static,
{
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
                subscribers: HashMap::new(),
                clock: 0,
                generation: 0,
                closed: false,
            })),
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Read `key` through the cache.
    ///
    /// - Fresh entry: returned without calling `fetch`.
    /// - Fetch already in flight for `key`: joins it.
    /// - Missing, stale, or expired entry: runs `fetch`, stores the result
    ///   with the tags `provides` derives from it, and returns it.
    ///
    /// Invalidation applied while a fetch is in flight wins: the result is
    /// stored but stays stale.
    ///
    /// # Errors
    ///
    /// Returns the fetch error (shared by every joined reader), or
    /// [`CacheError::Closed`] after [`dispose`](Self::dispose).
    pub async fn query<F, Fut, P>(&self, key: CacheKey, provides: P, fetch: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        P: FnOnce(&Value) -> Vec<Tag>,
    {
        let (seq, shared) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if state.closed {
                return Err(CacheError::Closed.into());
            }

            if let Some(flight) = state.in_flight.get(&key) {
                tracing::trace!(%key, seq = flight.seq, "joining in-flight fetch");
                (flight.seq, flight.fetch.clone())
            } else {
                let now = Instant::now();
                if let Some(entry) = state.entries.get_mut(&key) {
                    if entry.status == EntryStatus::Fresh
                        && self.policy.is_expired(entry.fetched_at, now)
                    {
                        tracing::debug!(%key, "cache entry expired");
                        entry.status = EntryStatus::Stale;
                    }
                    if entry.status == EntryStatus::Fresh
                        && let Some(value) = &entry.value
                    {
                        tracing::trace!(%key, "cache hit");
                        entry.last_used = now;
                        return Ok(Arc::clone(value));
                    }
                }

                let seq = state.tick();
                state
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Entry::loading(now))
                    .last_used = now;

                tracing::debug!(%key, seq, "fetching");
                let shared = fetch().map(|result| result.map(Arc::new)).boxed().shared();
                state.in_flight.insert(
                    key.clone(),
                    InFlight {
                        seq,
                        fetch: shared.clone(),
                        invalidated: Vec::new(),
                    },
                );
                (seq, shared)
            }
        };

        let outcome = shared.await;
        self.settle(&key, seq, &outcome, provides);
        outcome
    }

    /// Record the outcome of fetch `seq`. Only the first reader to get here
    /// writes; later readers of the same fetch find it already settled.
    fn settle<P>(&self, key: &CacheKey, seq: u64, outcome: &Result<Arc<Value>, E>, provides: P)
    where
        P: FnOnce(&Value) -> Vec<Tag>,
    {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let flight = match state.in_flight.remove(key) {
            Some(flight) if flight.seq == seq => flight,
            Some(other) => {
                state.in_flight.insert(key.clone(), other);
                return;
            }
            // Already settled, or orphaned by a reset.
            None => return,
        };

        match outcome {
            Ok(value) => {
                let now = Instant::now();
                let entry = state
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Entry::loading(now));
                if seq < entry.seq {
                    tracing::debug!(%key, seq, current = entry.seq, "discarding superseded response");
                    return;
                }
                let tags = provides(value);
                let hit_in_flight = tags
                    .iter()
                    .any(|tag| flight.invalidated.iter().any(|inv| inv.invalidates(tag)));
                entry.value = Some(Arc::clone(value));
                entry.tags = tags;
                entry.seq = seq;
                entry.fetched_at = Some(now);
                entry.last_used = now;
                entry.status = if hit_in_flight || entry.invalidated_at > seq {
                    EntryStatus::Stale
                } else {
                    EntryStatus::Fresh
                };
            }
            Err(_) => {
                let drop_entry = match state.entries.get_mut(key) {
                    Some(entry) if entry.value.is_some() => {
                        entry.status = EntryStatus::Stale;
                        false
                    }
                    Some(_) => true,
                    None => false,
                };
                if drop_entry {
                    state.entries.remove(key);
                }
                tracing::debug!(%key, seq, "fetch failed");
            }
        }
    }

    /// Mark every entry providing a tag that `tags` invalidates as stale.
    ///
    /// Returns the number of entries that matched. Entries that match nothing
    /// are left untouched.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        if tags.is_empty() {
            return 0;
        }
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let mark = state.tick();

        let mut matched = 0;
        for entry in state.entries.values_mut() {
            if entry.provides_any(tags) {
                entry.invalidated_at = mark;
                if entry.status == EntryStatus::Fresh {
                    entry.status = EntryStatus::Stale;
                }
                matched += 1;
            }
        }
        for flight in state.in_flight.values_mut() {
            flight.invalidated.extend_from_slice(tags);
        }

        tracing::debug!(
            tags = %tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            matched,
            "invalidated"
        );
        matched
    }

    /// Last known value for `key`, fresh or stale. Never fetches.
    #[must_use]
    pub fn peek(&self, key: &CacheKey) -> Option<Arc<Value>> {
        self.state
            .lock()
            .entries
            .get(key)
            .and_then(|entry| entry.value.clone())
    }

    #[must_use]
    pub fn entry(&self, key: &CacheKey) -> Option<EntrySnapshot> {
        let state = self.state.lock();
        state.entries.get(key).map(|entry| state.snapshot(key, entry))
    }

    /// Snapshots of all entries, ordered by key.
    #[must_use]
    pub fn entries(&self) -> Vec<EntrySnapshot> {
        let state = self.state.lock();
        let mut snapshots: Vec<_> = state
            .entries
            .iter()
            .map(|(key, entry)| state.snapshot(key, entry))
            .collect();
        snapshots.sort_by(|a, b| a.key.cmp(&b.key));
        snapshots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a fetch for `key` is currently in flight.
    #[must_use]
    pub fn is_fetching(&self, key: &CacheKey) -> bool {
        self.state.lock().in_flight.contains_key(key)
    }

    /// Register interest in `key`. Entries with subscribers survive
    /// [`collect_garbage`](Self::collect_garbage); dropping the last
    /// subscription of a stale entry drops the entry.
    #[must_use]
    pub fn subscribe(&self, key: CacheKey) -> Subscription<E> {
        *self.state.lock().subscribers.entry(key.clone()).or_insert(0) += 1;
        Subscription {
            state: Arc::clone(&self.state),
            key,
        }
    }

    /// Drop stale entries nobody subscribes to, plus idle fresh ones when
    /// `keep_unused_for` is set. In-flight keys are kept.
    ///
    /// Returns the number of entries dropped.
    pub fn collect_garbage(&self) -> usize {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let now = Instant::now();
        let before = state.entries.len();

        let subscribers = &state.subscribers;
        let in_flight = &state.in_flight;
        let policy = &self.policy;
        state.entries.retain(|key, entry| {
            if in_flight.contains_key(key) || subscribers.get(key).copied().unwrap_or(0) > 0 {
                return true;
            }
            match entry.status {
                EntryStatus::Stale => false,
                EntryStatus::Fresh => !policy.is_idle(entry.last_used, now),
                EntryStatus::Loading => true,
            }
        });

        let dropped = before - state.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, "collected unused cache entries");
        }
        dropped
    }

    /// Drop every entry regardless of subscribers. Fetches still in flight
    /// are orphaned and their results discarded.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        state.in_flight.clear();
        state.generation += 1;
        tracing::debug!(dropped, generation = state.generation, "resource cache reset");
    }

    /// Reset and refuse further queries.
    pub fn dispose(&self) {
        self.reset();
        self.state.lock().closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of resets so far. Useful to tell whether a session boundary
    /// happened between two observations.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}

impl<E> Default for ResourceCache<E>
where
    E: Clone + Send + Sync + From<CacheError> + 'static,
{
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl<E> SessionScoped for ResourceCache<E>
where
    E: Clone + Send + Sync + From<CacheError> + 'static,
{
    fn reset(&self) {
        Self::reset(self);
    }
}

/// RAII subscriber handle returned by [`ResourceCache::subscribe`].
pub struct Subscription<E> {
    state: Arc<Mutex<State<E>>>,
    key: CacheKey,
}

impl<E> Subscription<E> {
    #[must_use]
    pub const fn key(&self) -> &CacheKey {
        &self.key
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let remaining = match state.subscribers.get_mut(&self.key) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => return,
        };
        if remaining > 0 {
            return;
        }
        state.subscribers.remove(&self.key);

        let stale = state
            .entries
            .get(&self.key)
            .is_some_and(|entry| entry.status == EntryStatus::Stale);
        if stale && !state.in_flight.contains_key(&self.key) {
            state.entries.remove(&self.key);
            tracing::trace!(key = %self.key, "dropped stale entry with no subscribers");
        }
    }
}
