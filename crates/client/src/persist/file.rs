//! File-backed persistence backend.
//!
//! One file per key under a data directory, each holding the JSON value for
//! that key. This is the CLI's stand-in for a browser's local storage: state
//! survives process restarts until explicitly cleared.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::{KeyValueStore, PersistError};

/// A [`KeyValueStore`] writing each key to `<dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a file store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        // Keys name files directly; anything that could escape the data
        // directory is rejected rather than sanitized
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PersistError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let id = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("shopfront-filestore-{}-{id}", std::process::id()))
    }

    #[test]
    fn test_set_get_remove_roundtrip() {
        let store = FileStore::open(scratch_dir()).expect("open");

        assert!(store.get("authToken").expect("get").is_none());
        store.set("authToken", "\"abc\"").expect("set");
        assert_eq!(
            store.get("authToken").expect("get").as_deref(),
            Some("\"abc\"")
        );

        store.remove("authToken").expect("remove");
        assert!(store.get("authToken").expect("get").is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = scratch_dir();
        {
            let store = FileStore::open(&dir).expect("open");
            store.set("shoppingCart", "[]").expect("set");
        }
        let reopened = FileStore::open(&dir).expect("reopen");
        assert_eq!(
            reopened.get("shoppingCart").expect("get").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_remove_absent_key_ok() {
        let store = FileStore::open(scratch_dir()).expect("open");
        assert!(store.remove("authUser").is_ok());
    }

    #[test]
    fn test_path_traversal_key_rejected() {
        let store = FileStore::open(scratch_dir()).expect("open");
        assert!(matches!(
            store.set("../escape", "{}"),
            Err(PersistError::InvalidKey(_))
        ));
        assert!(matches!(
            store.get(""),
            Err(PersistError::InvalidKey(_))
        ));
    }
}
