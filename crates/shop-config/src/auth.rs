//! Auth behaviour settings.

use serde::{Deserialize, Serialize};

const fn default_logout_on_unauthorized() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Clear the session when an authenticated request comes back 401.
    #[serde(default = "default_logout_on_unauthorized")]
    pub logout_on_unauthorized: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            logout_on_unauthorized: default_logout_on_unauthorized(),
        }
    }
}
