//! Key-value persistence abstraction.
//!
//! Stores persist their state through [`KeyValueStore`], a minimal
//! `get`/`set`/`remove` interface over string keys and JSON-serialized values.
//! This keeps store logic independent of any particular backing medium:
//! [`MemoryStore`] backs tests, [`FileStore`] backs the CLI, and alternate
//! implementations (encrypted, remote) can be dropped in without touching the
//! stores.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Persistence keys for client state.
pub mod keys {
    /// Key for the session access credential.
    pub const AUTH_TOKEN: &str = "authToken";

    /// Key for the session refresh credential.
    pub const AUTH_REFRESH_TOKEN: &str = "authRefreshToken";

    /// Key for the session user record.
    pub const AUTH_USER: &str = "authUser";

    /// Key for the cart contents.
    pub const CART: &str = "shoppingCart";
}

/// Errors that can occur in a persistence backend.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Key contains characters the backend cannot represent.
    #[error("invalid persistence key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A minimal key-value store holding JSON-serialized values.
///
/// Implementations must make `set` durable before returning; stores rely on
/// this to guarantee persisted state matches memory after every mutation.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, or `None` if never set or removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write the value for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove the value for `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

/// Load and deserialize a persisted value.
///
/// Unreadable or corrupt values are treated as absent (with a warning) so a
/// damaged persistence layer degrades to a fresh start, never a crash.
pub(crate) fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(key, %error, "Failed to read persisted value, treating as absent");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "Corrupt persisted value, treating as absent");
            None
        }
    }
}

/// Serialize and persist a value.
///
/// Failures are logged and swallowed: losing a persisted write degrades to
/// stale state on the next start, which callers accept (there is no
/// write-ahead log).
pub(crate) fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(key, %error, "Failed to serialize value for persistence");
            return;
        }
    };

    if let Err(error) = store.set(key, &raw) {
        tracing::warn!(key, %error, "Failed to persist value");
    }
}

/// Remove a persisted value, logging (not propagating) failures.
pub(crate) fn discard(store: &dyn KeyValueStore, key: &str) {
    if let Err(error) = store.remove(key) {
        tracing::warn!(key, %error, "Failed to remove persisted value");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_absent_key() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<u32>> = load_json(&store, keys::CART);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_json_corrupt_value_treated_as_absent() {
        let store = MemoryStore::new();
        store
            .set(keys::CART, "{not json")
            .expect("memory set cannot fail");
        let loaded: Option<Vec<u32>> = load_json(&store, keys::CART);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = MemoryStore::new();
        save_json(&store, keys::CART, &vec![1u32, 2, 3]);
        let loaded: Option<Vec<u32>> = load_json(&store, keys::CART);
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_discard_absent_key_is_noop() {
        let store = MemoryStore::new();
        discard(&store, keys::AUTH_TOKEN);
        assert!(store.get(keys::AUTH_TOKEN).expect("get").is_none());
    }
}
