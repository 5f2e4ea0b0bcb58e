//! In-process store backed by a `HashMap`.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::RegistrationError;

/// Volatile store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> RegistrationError {
        RegistrationError::Internal("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RegistrationError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RegistrationError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").ok().flatten(), None);

        assert!(store.set("k", "v1").is_ok());
        assert!(store.set("k", "v2").is_ok());
        assert_eq!(store.get("k").ok().flatten().as_deref(), Some("v2"));

        assert!(store.remove("k").is_ok());
        assert!(store.remove("k").is_ok());
        assert_eq!(store.get("k").ok().flatten(), None);
    }
}
