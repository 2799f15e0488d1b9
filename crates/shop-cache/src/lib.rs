//! # shop-cache
//!
//! Client-side cache of server responses, keyed per query and invalidated by
//! resource tags.
//!
//! - Each query result is stored under a [`CacheKey`] and records the
//!   [`Tag`](shop_core::resource::Tag)s it provides.
//! - Mutations call [`ResourceCache::invalidate`] with the tags they touch;
//!   intersecting entries go stale and are refetched on the next read.
//! - Concurrent reads of one key share a single in-flight fetch.
//! - [`ResourceCache::reset`] drops everything at a login/logout boundary.
//!
//! The cache is an explicit instance (usually behind an `Arc`) handed to the
//! HTTP layer and the views. Nothing here is global.

mod cache;
mod entry;
mod error;
mod key;
mod policy;

pub use cache::{ResourceCache, Subscription};
pub use entry::{EntrySnapshot, EntryStatus};
pub use error::CacheError;
pub use key::{CacheKey, Selector};
pub use policy::CachePolicy;
