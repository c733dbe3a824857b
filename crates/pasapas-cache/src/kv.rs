//! Key-Value store wrapper with automatic serialization.

use crate::CacheError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const ENTRY_EXT: &str = "json";

/// Type-safe JSON cache.
///
/// Two backends: an in-process map, and a directory holding one JSON file
/// per key so state survives between runs. Clones share the same store.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<Backend>,
}

enum Backend {
    Memory(Mutex<BTreeMap<String, Vec<u8>>>),
    Directory(PathBuf),
}

impl Cache {
    /// Open an empty in-memory store.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(Mutex::new(BTreeMap::new()))),
        }
    }

    /// Open a directory-backed store, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("/home/me/.local/share/pasapas")?;
    /// ```
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        tracing::debug!(dir = %dir.display(), "opened cache directory");
        Ok(Self {
            backend: Arc::new(Backend::Directory(dir.to_path_buf())),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let token: Option<String> = cache.get("auth:token")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.read(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        match self.backend.as_ref() {
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes);
            }
            Backend::Directory(dir) => {
                let path = entry_path(dir, key);
                let tmp = path.with_extension("tmp");
                fs::write(&tmp, &bytes)?;
                fs::rename(&tmp, &path)?;
            }
        }
        Ok(())
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        match self.backend.as_ref() {
            Backend::Memory(map) => {
                lock(map)?.remove(key);
                Ok(())
            }
            Backend::Directory(dir) => match fs::remove_file(entry_path(dir, key)) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            },
        }
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match self.backend.as_ref() {
            Backend::Memory(map) => Ok(lock(map)?.contains_key(key)),
            Backend::Directory(dir) => Ok(entry_path(dir, key).is_file()),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        match self.backend.as_ref() {
            Backend::Memory(map) => Ok(lock(map)?.keys().cloned().collect()),
            Backend::Directory(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
                        continue;
                    }
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        keys.push(decode_key(stem)?);
                    }
                }
                keys.sort();
                Ok(keys)
            }
        }
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match self.backend.as_ref() {
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
            Backend::Directory(dir) => match fs::read(entry_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.backend.as_ref() {
            Backend::Memory(_) => f.write_str("Cache(memory)"),
            Backend::Directory(dir) => write!(f, "Cache({})", dir.display()),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, CacheError> {
    m.lock()
        .map_err(|_| CacheError::StoreError("cache lock poisoned".to_string()))
}

// Keys contain ':' and other characters that are not portable in file names.
fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{}", URL_SAFE_NO_PAD.encode(key), ENTRY_EXT))
}

fn decode_key(stem: &str) -> Result<String, CacheError> {
    URL_SAFE_NO_PAD
        .decode(stem)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| CacheError::InvalidKey(stem.to_string()))
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cart", user_id);
/// // Returns "cart:42"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(cache: &Cache) {
        assert_eq!(cache.get::<String>("auth:token").unwrap(), None);
        cache.set("auth:token", &"abc".to_string()).unwrap();
        cache.set("cart:main", &vec![1, 2, 3]).unwrap();

        assert_eq!(cache.get::<String>("auth:token").unwrap().as_deref(), Some("abc"));
        assert!(cache.exists("cart:main").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["auth:token", "cart:main"]);

        cache.delete("auth:token").unwrap();
        cache.delete("auth:token").unwrap();
        assert!(!cache.exists("auth:token").unwrap());
    }

    #[test]
    fn test_memory_backend() {
        exercise(&Cache::memory());
    }

    #[test]
    fn test_directory_backend() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&Cache::open_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_directory_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        Cache::open_dir(dir.path())
            .unwrap()
            .set("auth:token", &"persisted")
            .unwrap();
        let reopened = Cache::open_dir(dir.path()).unwrap();
        assert_eq!(
            reopened.get::<String>("auth:token").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn test_clones_share_state() {
        let a = Cache::memory();
        let b = a.clone();
        a.set("k", &1).unwrap();
        assert_eq!(b.get::<i32>("k").unwrap(), Some(1));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let cache = Cache::memory();
        cache.set("k", &"text").unwrap();
        assert!(matches!(
            cache.get::<i32>("k"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(crate::cache_key!("cart", 42), "cart:42");
        assert_eq!(crate::cache_key!("orders", "client", 7), "orders:client:7");
    }
}
