// Durable token storage
//
// One named slot holding the raw bearer token string; absence means logged
// out. FileTokenStorage is the production implementation, MemoryTokenStorage
// backs tests and hosts without a filesystem.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Persistence seam for the session token
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn store(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Stores the token in a single file. The parent directory is created on
/// first write; a missing file reads as logged out.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory slot for tests and embedded hosts
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "token slot poisoned"))?
            .clone())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "token slot poisoned"))? =
            Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "token slot poisoned"))? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("token"));

        assert_eq!(storage.load().unwrap(), None);
        storage.store("abc.def.ghi").unwrap();
        assert_eq!(storage.load().unwrap(), Some("abc.def.ghi".to_string()));
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("token"));
        storage.clear().unwrap();
        storage.clear().unwrap();
    }

    #[test]
    fn test_file_storage_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested/state/token"));
        storage.store("tok").unwrap();
        assert_eq!(storage.load().unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryTokenStorage::new();
        assert_eq!(storage.load().unwrap(), None);
        storage.store("tok").unwrap();
        assert_eq!(storage.load().unwrap(), Some("tok".to_string()));
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }
}
