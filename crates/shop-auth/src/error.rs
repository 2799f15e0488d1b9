use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `shop auth login`")]
    NotAuthenticated,

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("failed to encode session user: {0}")]
    Encode(#[from] serde_json::Error),
}
