//! In-memory persistence backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{KeyValueStore, PersistError};

/// A [`KeyValueStore`] backed by a process-local map.
///
/// State does not survive the process; intended for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map; recover rather than propagate
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.locked().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.locked().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.locked().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("k").expect("get").is_none());

        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));

        store.set("k", "v2").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v2"));

        store.remove("k").expect("remove");
        assert!(store.get("k").expect("get").is_none());
    }

    #[test]
    fn test_remove_absent_key_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("never-set").is_ok());
    }
}
