use std::sync::Arc;

use shop_core::entities::{Session, UserSummary};
use shop_core::resource::SessionScoped;
use tokio::sync::watch;

use crate::error::AuthError;
use crate::store::SessionStore;

/// In-memory authentication state, loaded from and written through to a
/// [`SessionStore`].
///
/// The current session lives in a `watch` channel: reads are synchronous
/// (the HTTP client takes the bearer token from here on every request) and
/// route guards can await changes.
///
/// Every identity change (login, registration, logout) resets the attached
/// [`SessionScoped`] components so cached data never leaks across accounts.
pub struct AuthState {
    store: SessionStore,
    session: watch::Sender<Session>,
    scoped: Vec<Arc<dyn SessionScoped>>,
}

impl AuthState {
    /// Build the state from whatever `store` has persisted.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let session = store.load();
        tracing::debug!(
            authenticated = session.is_authenticated(),
            backend = store.backend_name(),
            "loaded session"
        );
        let (session, _) = watch::channel(session);
        Self {
            store,
            session,
            scoped: Vec::new(),
        }
    }

    /// Attach a component to reset on every session change.
    #[must_use]
    pub fn with_scoped(mut self, component: Arc<dyn SessionScoped>) -> Self {
        self.scoped.push(component);
        self
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserSummary> {
        let session = self.session.borrow();
        if session.is_authenticated() {
            session.user.clone()
        } else {
            None
        }
    }

    /// Recomputed from the current token on every call.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Name of the backend the session is persisted to.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Receiver that observes every session replacement.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Sign in as `user`: replace the session, reset scoped state, persist.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the session cannot be persisted. The
    /// in-memory session and the reset still take effect.
    pub fn set_credentials(&self, token: impl Into<String>, user: UserSummary) -> Result<(), AuthError> {
        let session = Session::authenticated(token, user);
        tracing::info!(
            user_id = session.user.as_ref().map(|u| u.id.as_str()),
            "session started"
        );
        self.session.send_replace(session.clone());
        self.reset_scoped();
        self.store.save(&session)
    }

    /// Sign out: clear the session, reset scoped state, clear the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if persisted entries cannot be removed. The
    /// in-memory session is cleared regardless.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.send_replace(Session::default());
        self.end_session()
    }

    /// Sign out only if `token` is still the current one.
    ///
    /// For rejections that arrive late: a 401 for a token that has since
    /// been replaced must not end the newer session. Returns whether the
    /// session was cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if persisted entries cannot be removed.
    pub fn logout_if_token(&self, token: &str) -> Result<bool, AuthError> {
        let cleared = self.session.send_if_modified(|session| {
            if session.token.as_deref() == Some(token) {
                *session = Session::default();
                true
            } else {
                false
            }
        });
        if !cleared {
            tracing::debug!("rejected token is no longer current, keeping session");
            return Ok(false);
        }
        self.end_session().map(|()| true)
    }

    fn end_session(&self) -> Result<(), AuthError> {
        self.reset_scoped();
        tracing::info!("session cleared");
        self.store.clear().inspect_err(|error| {
            tracing::warn!(%error, "failed to clear persisted session");
        })
    }

    /// Require an authenticated session, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no token is present.
    pub fn require(&self) -> Result<Session, AuthError> {
        let session = self.session();
        if session.is_authenticated() {
            Ok(session)
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }

    fn reset_scoped(&self) {
        for component in &self.scoped {
            component.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueBackend, MemoryBackend, TOKEN_KEY};
    use pretty_assertions::assert_eq;
    use shop_core::enums::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ResetCounter(AtomicUsize);

    impl SessionScoped for ResetCounter {
        fn reset(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn bob() -> UserSummary {
        UserSummary {
            id: "u-2".into(),
            username: "bob".into(),
            email: "bob@example.com".into(),
            role: Role::User,
        }
    }

    #[test]
    fn loads_persisted_session_on_construction() {
        let backend = MemoryBackend::default();
        SessionStore::new(backend.clone())
            .save(&Session::authenticated("jwt", bob()))
            .unwrap();

        let auth = AuthState::new(SessionStore::new(backend));
        assert!(auth.is_authenticated());
        assert_eq!(auth.token().as_deref(), Some("jwt"));
        assert_eq!(auth.user(), Some(bob()));
    }

    #[test]
    fn set_credentials_writes_through_and_resets() {
        let backend = MemoryBackend::default();
        let counter = Arc::new(ResetCounter::default());
        let auth = AuthState::new(SessionStore::new(backend.clone())).with_scoped(counter.clone());

        auth.set_credentials("jwt-2", bob()).unwrap();

        assert!(auth.is_authenticated());
        assert_eq!(backend.get(TOKEN_KEY).unwrap().as_deref(), Some("jwt-2"));
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn logout_clears_everything() {
        let backend = MemoryBackend::default();
        let counter = Arc::new(ResetCounter::default());
        let auth = AuthState::new(SessionStore::new(backend.clone())).with_scoped(counter.clone());
        auth.set_credentials("jwt-2", bob()).unwrap();

        auth.logout().unwrap();

        assert!(!auth.is_authenticated());
        assert_eq!(auth.user(), None);
        assert!(backend.is_empty());
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
        assert!(matches!(auth.require(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn watchers_observe_changes() {
        let auth = AuthState::new(SessionStore::in_memory());
        let mut rx = auth.watch();
        assert!(!rx.borrow_and_update().is_authenticated());

        auth.set_credentials("jwt", bob()).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());

        auth.logout().unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_authenticated());
    }

    #[test]
    fn logout_if_token_ignores_replaced_token() {
        let backend = MemoryBackend::default();
        let counter = Arc::new(ResetCounter::default());
        let auth = AuthState::new(SessionStore::new(backend.clone())).with_scoped(counter.clone());
        auth.set_credentials("old-jwt", bob()).unwrap();
        auth.set_credentials("new-jwt", bob()).unwrap();

        assert!(!auth.logout_if_token("old-jwt").unwrap());
        assert_eq!(auth.token().as_deref(), Some("new-jwt"));
        assert_eq!(backend.get(TOKEN_KEY).unwrap().as_deref(), Some("new-jwt"));
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);

        assert!(auth.logout_if_token("new-jwt").unwrap());
        assert!(!auth.is_authenticated());
        assert!(backend.is_empty());
        assert_eq!(counter.0.load(Ordering::SeqCst), 3);
    }
}
