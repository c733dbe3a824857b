//! Typed single-key records.
//!
//! A [`Slot`] owns one key of a [`Cache`] and stores one value there,
//! wrapped with a write counter and timestamp. The auth token and the cart
//! each live in a slot.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

/// Stored envelope around a slot's value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// User data.
    pub data: T,
    /// Incremented on every write.
    pub version: u64,
    /// Unix timestamp of the last write.
    pub saved_at: u64,
}

/// A typed handle to one cache key.
///
/// # Example
///
/// ```rust,ignore
/// let slot = Slot::<Cart>::new(cache.clone(), cache_key!("cart", "current"));
/// let mut cart = slot.load_or_default()?;
/// cart.clear();
/// slot.save(&cart)?;
/// ```
pub struct Slot<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a slot to `key` in `cache`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The key this slot writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the value, if one was saved.
    pub fn load(&self) -> Result<Option<T>, CacheError> {
        Ok(self.load_versioned()?.map(|v| v.data))
    }

    /// Read the value with its envelope.
    pub fn load_versioned(&self) -> Result<Option<Versioned<T>>, CacheError> {
        self.cache.get::<Versioned<T>>(&self.key)
    }

    /// Write the value, bumping the version.
    pub fn save(&self, data: &T) -> Result<u64, CacheError> {
        let version = self
            .cache
            .get::<Versioned<serde_json::Value>>(&self.key)?
            .map_or(1, |v| v.version + 1);
        self.cache.set(
            &self.key,
            &Versioned {
                data,
                version,
                saved_at: now(),
            },
        )?;
        tracing::trace!(key = %self.key, version, "slot saved");
        Ok(version)
    }

    /// Remove the value.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Read the value, or the default when nothing was saved.
    pub fn load_or_default(&self) -> Result<T, CacheError> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Read, modify with `f`, and write back. Returns the written value.
    pub fn update<F>(&self, f: F) -> Result<T, CacheError>
    where
        F: FnOnce(&mut T),
    {
        let mut data = self.load_or_default()?;
        f(&mut data);
        self.save(&data)?;
        Ok(data)
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
