//! Sign-in, registration, and sign-out.

use reqwest::Method;
use shop_core::entities::{User, UserSummary};
use shop_core::requests::{AuthResponse, LoginRequest, RegisterRequest};

use crate::{ApiError, NO_PARAMS, Storefront, decode, encode};

impl Storefront {
    /// `POST /auth/login`, then replace the session with the returned one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for empty credentials without sending a
    /// request, the transport/status error from the backend, or
    /// [`ApiError::Session`] if the new session could not be saved (it is
    /// still active in memory).
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let req = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        req.validate()?;
        self.authenticate("auth/login", encode(&req)?).await
    }

    /// `POST /auth/register`; the new account is signed in on success.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] when a field is empty, the
    /// transport/status error from the backend, or [`ApiError::Session`].
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let req = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        req.validate()?;
        self.authenticate("auth/register", encode(&req)?).await
    }

    /// Clear the session and every cached response. Local only; the
    /// backend keeps no session to end.
    pub fn logout(&self) {
        // AuthState already logs a store failure; the in-memory session is gone either way.
        let _ = self.auth.logout();
    }

    async fn authenticate(&self, path: &str, body: serde_json::Value) -> Result<User, ApiError> {
        let value = self
            .http
            .request(Method::POST, path, Some(&body), NO_PARAMS)
            .await?;
        let AuthResponse { access_token, user } = decode(&value)?;
        self.auth
            .set_credentials(access_token, UserSummary::from(&user))
            .inspect_err(|error| {
                tracing::warn!(%error, "signed in but the session could not be persisted");
            })?;
        Ok(user)
    }
}
