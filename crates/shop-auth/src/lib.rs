//! # shop-auth
//!
//! Authentication state for the storefront client.
//!
//! - [`store`]: durable session persistence (`token` + `user` keys) over the
//!   OS keychain (`keyring`), a private file directory, or memory.
//! - [`state`]: the in-memory [`AuthState`] that every request reads its bearer
//!   token from, and that resets session-scoped caches on login/logout.
//! - [`guard`]: the [`can_access`] capability predicate and the route guard
//!   built on it.

pub mod error;
pub mod guard;
pub mod state;
pub mod store;

pub use error::AuthError;
pub use guard::{Access, GuardDecision, Route, RouteGuard, can_access, guard};
pub use state::AuthState;
pub use store::SessionStore;
