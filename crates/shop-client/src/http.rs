//! Bearer-authenticated JSON transport.
//!
//! Centralizes URL building, token injection, and status mapping so the
//! resource modules only deal with paths, payloads, and cache tags.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use shop_auth::AuthState;
use shop_config::ApiConfig;

use crate::error::ApiError;

/// Empty query-parameter list for requests without parameters.
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// HTTP client bound to one backend and one [`AuthState`].
///
/// Cheap to clone: clones share the connection pool and the auth state.
#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<AuthState>,
    logout_on_unauthorized: bool,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &ApiConfig, auth: Arc<AuthState>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
            logout_on_unauthorized: true,
        })
    }

    /// Whether a 401 on a token-bearing request clears the session.
    #[must_use]
    pub const fn with_logout_on_unauthorized(mut self, enabled: bool) -> Self {
        self.logout_on_unauthorized = enabled;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one JSON request and return the decoded body.
    ///
    /// A 2xx response with an empty body yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::send`], plus [`ApiError::Decode`] for a 2xx
    /// body that is not JSON.
    pub async fn request<K, V>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &[(K, V)],
    ) -> Result<Value, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let text = self.send(method, path, body, params).await?;
        parse_body(&text)
    }

    /// Send one request and return the raw 2xx body.
    ///
    /// The bearer token is read from the auth state at call time. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request never completes,
    /// [`ApiError::Status`] for non-2xx responses, and [`ApiError::Decode`]
    /// if a 2xx body cannot be read.
    pub async fn send<K, V>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &[(K, V)],
    ) -> Result<String, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = self.url(path, params);
        let token = self.auth.token();
        tracing::debug!(%method, %url, authenticated = token.is_some(), "sending request");

        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = &token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.inspect_err(|error| {
            tracing::warn!(%method, %url, %error, "request did not reach the server");
        })?;
        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(error) if status.is_success() => {
                return Err(ApiError::Decode(format!("failed to read response body: {error}")));
            }
            Err(error) => {
                tracing::debug!(%error, "failed to read error body");
                String::new()
            }
        };

        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::warn!(%method, %url, status = status.as_u16(), %message, "request failed");
            // Only the token that was sent may be cleared; a newer login survives.
            // A store failure is already logged by the auth state.
            if status == StatusCode::UNAUTHORIZED
                && self.logout_on_unauthorized
                && let Some(sent) = &token
                && let Ok(true) = self.auth.logout_if_token(sent)
            {
                tracing::info!("token rejected by backend, signed out");
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(text)
    }

    fn url<K, V>(&self, path: &str, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}={}",
                        urlencoding::encode(k.as_ref()),
                        urlencoding::encode(v.as_ref())
                    )
                })
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

/// Decode a 2xx body; empty means [`Value::Null`].
pub(crate) fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Human-readable message for a failed response.
///
/// Prefers the backend's JSON `message` field (a string, or an array of
/// strings joined with `; `), then the raw body, then the reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("message") {
            Some(Value::String(message)) if !message.is_empty() => return message.clone(),
            Some(Value::Array(parts)) if !parts.is_empty() => {
                return parts
                    .iter()
                    .map(|part| part.as_str().map_or_else(|| part.to_string(), str::to_string))
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            _ => {}
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_auth::SessionStore;

    fn client(base_url: &str) -> HttpClient {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        HttpClient::new(&config, Arc::new(AuthState::new(SessionStore::in_memory()))).unwrap()
    }

    #[test]
    fn message_from_json_string() {
        let body = r#"{"statusCode":404,"message":"Product not found"}"#;
        assert_eq!(error_message(StatusCode::NOT_FOUND, body), "Product not found");
    }

    #[test]
    fn message_from_json_array() {
        let body = r#"{"message":["email must be an email","password is too short"]}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "email must be an email; password is too short"
        );
    }

    #[test]
    fn message_falls_back_to_body_then_reason() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(error_message(StatusCode::SERVICE_UNAVAILABLE, ""), "Service Unavailable");
        assert_eq!(error_message(StatusCode::CONFLICT, r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn empty_body_is_null_and_text_is_a_decode_error() {
        assert_eq!(parse_body("  \n").unwrap(), Value::Null);
        assert!(matches!(parse_body("Deleted"), Err(ApiError::Decode(_))));
        assert_eq!(parse_body(r#"{"id":"p-1"}"#).unwrap()["id"], "p-1");
    }

    #[test]
    fn url_joins_base_and_path() {
        let http = client("http://localhost:3000/");
        assert_eq!(http.url("/products", NO_PARAMS), "http://localhost:3000/products");
        assert_eq!(http.url("cart/c-1", NO_PARAMS), "http://localhost:3000/cart/c-1");
    }

    #[test]
    fn url_encodes_params_in_order() {
        let http = client("http://api.test/v1");
        let url = http.url("products", &[("page", "2"), ("brand", "lg & co")]);
        assert_eq!(url, "http://api.test/v1/products?page=2&brand=lg%20%26%20co");
    }
}
