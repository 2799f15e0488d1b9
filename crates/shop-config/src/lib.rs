//! Settings for the storefront client: where the backend lives, where the
//! session is kept, how long cached responses stay fresh, and what a 401 does.
//!
//! [`ShopConfig::figment`] starts from the built-in defaults and merges, in
//! order, `storefront/config.toml` under the platform config directory, then
//! `.storefront/config.toml` in the working directory, then any `STOREFRONT_*`
//! variable. Double underscores nest, so `STOREFRONT_CACHE__MAX_AGE_SECS=30`
//! sets `cache.max_age_secs`. Later sources win key by key.
//!
//! ```no_run
//! let config = shop_config::ShopConfig::load_with_dotenv()?;
//! assert!(config.api.base_url.starts_with("http"));
//! # Ok::<(), shop_config::ConfigError>(())
//! ```

mod api;
mod auth;
mod cache;
mod error;
mod session;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use error::ConfigError;
pub use session::{SessionBackendKind, SessionConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "STOREFRONT_";
const PROJECT_CONFIG: &str = ".storefront/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl ShopConfig {
    /// Load from [`Self::figment`] and validate. `.env` is not read here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// [`Self::load`] after exporting `.env` into the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Defaults, then each existing config file, then the environment.
    pub fn figment() -> Figment {
        Self::config_files()
            .into_iter()
            .filter(|path| path.is_file())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Candidate files, lowest priority first.
    fn config_files() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("storefront").join("config.toml"))
            .into_iter()
            .chain(std::iter::once(PathBuf::from(PROJECT_CONFIG)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ShopConfig::default();
        assert!(config.api.validate().is_ok());
        assert!(config.auth.logout_on_unauthorized);
        assert!(config.cache.max_age_secs.is_none());
        assert_eq!(config.session.backend, SessionBackendKind::Auto);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: ShopConfig = Figment::from(Serialized::defaults(ShopConfig::default()))
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.api.base_url, "http://localhost:3000/");
    }

    #[test]
    fn project_file_outranks_user_file() {
        let files = ShopConfig::config_files();
        assert_eq!(files.last(), Some(&PathBuf::from(PROJECT_CONFIG)));
        if let [user, _project] = files.as_slice() {
            assert!(user.ends_with("storefront/config.toml"));
            assert!(user.is_absolute());
        }
    }
}
