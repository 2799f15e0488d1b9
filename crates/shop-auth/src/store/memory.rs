use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::KeyValueBackend;
use crate::error::AuthError;

/// Process-local backend. Clones share the same map, so a test can keep a
/// handle to inspect what a [`SessionStore`](super::SessionStore) wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
