use std::{
    collections::HashMap,
    fs, io,
    io::Write,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Durable key-value storage underneath [`super::Store`].
pub trait Backend: Send + Sync {
    /// Fetch the bytes stored under `key`, `None` when absent.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the bytes stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process backend. Can be told to fail writes to exercise retry paths.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes and removals fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a raw value, bypassing failure injection.
    pub fn insert_raw(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.entries.lock().insert(key.to_string(), bytes.into());
    }

    /// Whether a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                key: key.to_string(),
                source: io::Error::other("writes disabled"),
            });
        }
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_component(key)))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let mut staged = NamedTempFile::new_in(&self.root)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.write_atomic(&self.path_for(key), bytes)
            .map_err(|source| StoreError::Write {
                key: key.to_string(),
                source,
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

fn sanitize_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
            result.push(ch);
        }
    }
    if result.is_empty() {
        "value".to_string()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_backend_round_trip() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let backend = FileBackend::new(dir.path().join("state"));

        assert_eq!(backend.read("gameStats")?, None);
        backend.write("gameStats", b"{\"total_games\":1}")?;
        assert!(backend.path_for("gameStats").exists());
        assert_eq!(
            backend.read("gameStats")?.as_deref(),
            Some(&b"{\"total_games\":1}"[..])
        );

        backend.write("gameStats", b"{}")?;
        assert_eq!(backend.read("gameStats")?.as_deref(), Some(&b"{}"[..]));

        backend.remove("gameStats")?;
        backend.remove("gameStats")?;
        assert_eq!(backend.read("gameStats")?, None);
        Ok(())
    }

    #[test]
    fn memory_backend_can_fail_writes() -> anyhow::Result<()> {
        let backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        assert!(backend.write("k", b"v").is_err());
        assert!(!backend.contains("k"));
        backend.set_fail_writes(false);
        backend.write("k", b"v")?;
        assert_eq!(backend.read("k")?.as_deref(), Some(&b"v"[..]));
        Ok(())
    }

    #[test]
    fn sanitize_creates_safe_filenames() {
        assert_eq!(sanitize_component("../current Game!"), "currentGame");
        assert_eq!(sanitize_component("///"), "value");
    }
}
