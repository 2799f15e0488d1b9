use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueBackend;
use crate::error::AuthError;

const DEFAULT_DIR_NAME: &str = ".storefront";
const SESSION_DIR_NAME: &str = "session";

/// One file per key inside a private directory (`0700` dir, `0600` files on Unix).
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.storefront/session`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] if the home directory is unknown.
    pub fn in_home() -> Result<Self, AuthError> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(DEFAULT_DIR_NAME).join(SESSION_DIR_NAME)))
            .ok_or_else(|| {
                AuthError::SessionStore("home directory not found, cannot store session".into())
            })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn ensure_dir(&self) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AuthError::SessionStore(format!("mkdir {}: {e}", self.dir.display()))
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::SessionStore(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.ensure_dir()?;
        let path = self.path(key);
        fs::write(&path, value)
            .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStore(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionStore(format!(
                "failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}
