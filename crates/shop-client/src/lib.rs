//! # shop-client
//!
//! HTTP resource client and typed API for the storefront backend.
//!
//! [`Storefront`] wires the three moving parts together:
//! - an [`AuthState`] that owns the session and resets the cache whenever
//!   the signed-in identity changes,
//! - a [`ResourceCache`] that de-duplicates reads and tracks the tags each
//!   result provides,
//! - an [`HttpClient`] that attaches the current bearer token to every request.
//!
//! Reads go through the cache; mutations go straight to the backend and
//! invalidate the tags they touch before returning.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

mod error;
mod http;

pub use error::ApiError;
pub use http::{HttpClient, NO_PARAMS};

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shop_auth::{AuthState, SessionStore};
use shop_cache::{CacheKey, CachePolicy, ResourceCache};
use shop_config::ShopConfig;
use shop_core::resource::{ResourceType, Tag, list_tags};

/// Typed client for the storefront REST API.
pub struct Storefront {
    http: HttpClient,
    cache: Arc<ResourceCache<ApiError>>,
    auth: Arc<AuthState>,
}

impl Storefront {
    /// Build a client from configuration and an already-opened session store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ShopConfig, store: SessionStore) -> Result<Self, ApiError> {
        let policy = CachePolicy {
            max_age: config.cache.max_age(),
            keep_unused_for: config.cache.keep_unused_for(),
        };
        let cache = Arc::new(ResourceCache::new(policy));
        let auth = Arc::new(AuthState::new(store).with_scoped(cache.clone()));
        let http = HttpClient::new(&config.api, Arc::clone(&auth))?
            .with_logout_on_unauthorized(config.auth.logout_on_unauthorized);
        tracing::debug!(base_url = http.base_url(), "storefront client ready");
        Ok(Self { http, cache, auth })
    }

    #[must_use]
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    #[must_use]
    pub fn cache(&self) -> &ResourceCache<ApiError> {
        &self.cache
    }

    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Cached `GET`: served from the cache when fresh, otherwise fetched once
    /// no matter how many callers are waiting.
    async fn read<T, P>(
        &self,
        key: CacheKey,
        path: String,
        params: Vec<(&'static str, String)>,
        provides: P,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: FnOnce(&Value) -> Vec<Tag>,
    {
        let http = self.http.clone();
        let value = self
            .cache
            .query(key, provides, move || async move {
                http.request(Method::GET, &path, None, &params).await
            })
            .await?;
        decode(&value)
    }

    /// Uncached request that invalidates `tags` once the backend has
    /// answered, returning the decoded body.
    async fn write(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        tags: &[Tag],
    ) -> Result<Value, ApiError> {
        let text = self.mutate(method, path, body, tags).await?;
        http::parse_body(&text)
    }

    /// Like [`Storefront::write`] for endpoints whose body is irrelevant:
    /// any 2xx counts as success.
    async fn write_discarding(&self, method: Method, path: &str, tags: &[Tag]) -> Result<(), ApiError> {
        self.mutate(method, path, None, tags).await.map(drop)
    }

    /// Tags are invalidated on error responses as well: the server may have
    /// applied part of the change. Requests that never reached the server
    /// leave the cache alone.
    async fn mutate(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        tags: &[Tag],
    ) -> Result<String, ApiError> {
        let result = self.http.send(method, path, body.as_ref(), NO_PARAMS).await;
        let answered = match &result {
            Ok(_) => true,
            Err(error) => error.reached_server(),
        };
        if answered {
            let stale = self.cache.invalidate(tags);
            tracing::debug!(%path, stale, "invalidated after mutation");
        }
        result
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    T::deserialize(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode<T: Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Tags for a collection body: a JSON array, or a page envelope whose items
/// sit under `data`.
fn collection_tags(resource: ResourceType, value: &Value) -> Vec<Tag> {
    let items = value
        .as_array()
        .or_else(|| value.get("data").and_then(Value::as_array));
    let ids = items
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("id").and_then(Value::as_str));
    list_tags(resource, ids)
}
