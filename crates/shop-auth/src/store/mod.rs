//! Durable session persistence.
//!
//! The session is stored as two entries under fixed keys: [`TOKEN_KEY`]
//! holds the bearer token, [`USER_KEY`] the user summary as JSON. Both are
//! written on login and removed together on logout.
//!
//! Loading never fails: missing, unreadable, or corrupt entries are logged
//! and treated as absent.

mod fallback;
mod file;
mod keyring;
mod memory;

pub use fallback::FallbackBackend;
pub use file::FileBackend;
pub use keyring::KeyringBackend;
pub use memory::MemoryBackend;

use shop_core::entities::{Session, UserSummary};

use crate::error::AuthError;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// A durable string key-value store.
pub trait KeyValueBackend: Send + Sync {
    /// Short name for logs and status output.
    fn name(&self) -> &'static str;

    /// Read `key`. A missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the entry exists but cannot be removed.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// Session persistence on top of a [`KeyValueBackend`].
pub struct SessionStore {
    backend: Box<dyn KeyValueBackend>,
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// An ephemeral store, for tests and one-off sessions.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Load the persisted session. Returns the empty session when nothing
    /// usable is stored.
    #[must_use]
    pub fn load(&self) -> Session {
        let Some(token) = self.read(TOKEN_KEY) else {
            return Session::default();
        };

        let user = self
            .read(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<UserSummary>(&raw) {
                Ok(user) => Some(user),
                Err(error) => {
                    tracing::warn!(%error, "stored session user is corrupt; ignoring it");
                    None
                }
            });

        Session {
            token: Some(token),
            user,
        }
    }

    /// Persist `session`. An unauthenticated session clears the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the backend rejects a write.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let Some(token) = &session.token else {
            return self.clear();
        };

        self.backend.set(TOKEN_KEY, token)?;
        match &session.user {
            Some(user) => self.backend.set(USER_KEY, &serde_json::to_string(user)?),
            None => self.backend.remove(USER_KEY),
        }
    }

    /// Remove both session entries. Both removals are attempted; the first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if an existing entry cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        let token = self.backend.remove(TOKEN_KEY);
        let user = self.backend.remove(USER_KEY);
        token.and(user)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(Some(value)) if !value.trim().is_empty() => Some(value),
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(%error, key, backend = self.backend.name(), "failed to read session entry");
                None
            }
        }
    }
}
