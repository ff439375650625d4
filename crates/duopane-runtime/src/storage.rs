#![forbid(unsafe_code)]

//! Persistence channels for layout snapshots.
//!
//! A [`StorageChannel`] is a string key/value store: browser `localStorage`
//! on the web host, a directory of JSON files on native hosts, or plain
//! memory in tests. Writes are synchronous and expected to be fast; every
//! failure is reported as a [`StorageError`] and treated as non-fatal by the
//! store.

use std::collections::HashMap;
use std::fmt;

/// Errors from a persistence channel.
#[derive(Debug)]
pub enum StorageError {
    /// Backend is disabled or not reachable in this environment.
    Unavailable(String),
    /// Backend refused the write for lack of space.
    QuotaExceeded { key: String, bytes: usize },
    /// Filesystem error.
    Io(std::io::Error),
    /// Any other backend-reported failure.
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(why) => write!(f, "storage unavailable: {why}"),
            Self::QuotaExceeded { key, bytes } => {
                write!(f, "storage quota exceeded writing {bytes} bytes to {key:?}")
            }
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Backend(msg) => write!(f, "storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Key/value persistence channel.
pub trait StorageChannel {
    /// Read the value stored under `key`. `Ok(None)` means nothing stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: StorageChannel + ?Sized> StorageChannel for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory channel. State lives for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: u64,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a value, as if persisted by an earlier session.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of successful `set` calls.
    #[must_use]
    pub const fn write_count(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StorageChannel for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes = self.writes.saturating_add(1);
        Ok(())
    }
}

/// Channel that stores each key as `<dir>/<key>.json`.
#[cfg(feature = "file-storage")]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(feature = "file-storage")]
impl FileStorage {
    /// Use `dir` as the storage root. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<std::path::PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Backend(format!(
                "key {key:?} is not a safe file name"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(feature = "file-storage")]
impl StorageChannel for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write-then-rename so a crash never leaves a truncated snapshot.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_counts_writes() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").expect("get"), None);
        storage.set("k", "v1").expect("set");
        storage.set("k", "v2").expect("set");
        assert_eq!(storage.get("k").expect("get").as_deref(), Some("v2"));
        assert_eq!(storage.write_count(), 2);
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn file_storage_round_trips_and_reports_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("panelLayoutState").expect("get"), None);
        storage.set("panelLayoutState", "{}").expect("set");
        assert_eq!(
            storage.get("panelLayoutState").expect("get").as_deref(),
            Some("{}")
        );
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.set(key, "{}"),
                Err(StorageError::Backend(_))
            ));
        }
    }
}
