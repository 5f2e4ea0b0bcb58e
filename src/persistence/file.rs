//! Directory-backed store: one file per key.
//!
//! Writes go to a temporary sibling file that is flushed to disk and then
//! renamed over the target, so a reader never sees a half-written value and
//! an acknowledged write survives a crash.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::RegistrationError;

/// Durable store keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the directory cannot
    /// be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, RegistrationError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            RegistrationError::Persistence(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, RegistrationError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(RegistrationError::Persistence(format!(
                "invalid store key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RegistrationError::Persistence(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RegistrationError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        write_synced(&tmp, value.as_bytes()).map_err(|e| {
            RegistrationError::Persistence(format!("cannot write {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            RegistrationError::Persistence(format!("cannot replace {}: {e}", path.display()))
        })?;
        // Persist the rename itself.
        if let Ok(dir) = File::open(&self.dir) {
            let _ = dir.sync_all();
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RegistrationError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RegistrationError::Persistence(format!(
                "cannot remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_store() -> (TempDir, FileStore) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("cannot create temp dir");
        };
        let Ok(store) = FileStore::open(dir.path()) else {
            panic!("cannot open temp store");
        };
        (dir, store)
    }

    #[test]
    fn values_survive_reopening() {
        let (dir, store) = temp_store();
        assert!(store.set("snapshot", "{\"a\":1}").is_ok());
        assert_eq!(store.dir(), dir.path());

        let Ok(reopened) = FileStore::open(store.dir()) else {
            panic!("cannot reopen");
        };
        assert_eq!(
            reopened.get("snapshot").ok().flatten().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn overwrite_replaces_whole_value() {
        let (_dir, store) = temp_store();
        assert!(store.set("k", "a much longer first value").is_ok());
        assert!(store.set("k", "short").is_ok());
        assert_eq!(store.get("k").ok().flatten().as_deref(), Some("short"));
    }

    #[test]
    fn missing_key_reads_as_none_and_removes_cleanly() {
        let (_dir, store) = temp_store();
        assert!(matches!(store.get("missing"), Ok(None)));
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let (_dir, store) = temp_store();
        assert!(store.set("../outside", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn no_temp_file_left_after_write() {
        let (dir, store) = temp_store();
        assert!(store.set("k", "v").is_ok());
        assert!(!dir.path().join("k.json.tmp").exists());
        assert!(dir.path().join("k.json").exists());
    }

    #[test]
    fn synced_write_produces_full_file() {
        let (dir, _store) = temp_store();
        let path = dir.path().join("raw.json");
        assert!(write_synced(&path, b"{\"version\":1}").is_ok());
        assert_eq!(
            fs::read_to_string(&path).ok().as_deref(),
            Some("{\"version\":1}")
        );
    }
}
