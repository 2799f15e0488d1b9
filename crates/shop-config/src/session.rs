//! Where the signed-in session is persisted.

use serde::{Deserialize, Serialize};

/// Which session store backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackendKind {
    /// OS keychain, falling back to files when the keychain is unavailable.
    #[default]
    Auto,
    Keyring,
    File,
    /// Nothing survives the process.
    Memory,
}

fn default_keyring_service() -> String {
    "storefront-cli".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackendKind,

    /// Directory for the file backend. Empty means `~/.storefront/session`.
    #[serde(default)]
    pub dir: String,

    /// Keychain service name. Override for tests to avoid touching real credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackendKind::default(),
            dir: String::new(),
            keyring_service: default_keyring_service(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SessionConfig::default();
        assert_eq!(config.backend, SessionBackendKind::Auto);
        assert!(config.dir.is_empty());
        assert_eq!(config.keyring_service, "storefront-cli");
    }
}
