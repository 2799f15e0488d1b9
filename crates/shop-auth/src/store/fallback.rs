use super::KeyValueBackend;
use crate::error::AuthError;

/// Prefer `primary`, fall back to `secondary` when it is unavailable.
///
/// Writes go to the primary; if that fails the value lands in the secondary
/// and any older primary copy is dropped, since reads try the primary first. Removals hit both so nothing lingers in
/// whichever backend was used last time.
pub struct FallbackBackend {
    primary: Box<dyn KeyValueBackend>,
    secondary: Box<dyn KeyValueBackend>,
}

impl FallbackBackend {
    #[must_use]
    pub fn new(
        primary: impl KeyValueBackend + 'static,
        secondary: impl KeyValueBackend + 'static,
    ) -> Self {
        Self {
            primary: Box::new(primary),
            secondary: Box::new(secondary),
        }
    }
}

impl KeyValueBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        match self.primary.get(key) {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => self.secondary.get(key),
            Err(error) => {
                tracing::debug!(%error, backend = self.primary.name(), "primary read failed");
                self.secondary.get(key)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        match self.primary.set(key, value) {
            Ok(()) => {
                // Drop any copy an earlier fallback write left behind.
                if let Err(error) = self.secondary.remove(key) {
                    tracing::debug!(%error, "failed to clear fallback copy");
                }
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    backend = self.primary.name(),
                    "session store failed; falling back to {}",
                    self.secondary.name()
                );
                if let Err(error) = self.primary.remove(key) {
                    tracing::debug!(%error, backend = self.primary.name(), "failed to drop stale primary copy");
                }
                self.secondary.set(key, value)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        if let Err(error) = self.primary.remove(key) {
            tracing::debug!(%error, backend = self.primary.name(), "primary removal failed");
        }
        self.secondary.remove(key)
    }
}
