//! Typed JSON key-value store for Pas à Pas.
//!
//! Stands in for browser local storage: the auth token and the cart are
//! kept here between runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use pasapas_cache::{cache_key, Cache, Slot};
//!
//! let cache = Cache::open_dir(data_dir)?;
//!
//! // Store a value
//! cache.set("auth:token", &token)?;
//!
//! // Retrieve a value
//! let token: Option<String> = cache.get("auth:token")?;
//!
//! // Or bind a typed slot to one key
//! let cart = Slot::<Cart>::new(cache.clone(), cache_key!("cart", "current"));
//! ```

mod error;
mod kv;
mod slot;

pub use error::CacheError;
pub use kv::Cache;
pub use slot::{Slot, Versioned};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError, Slot};
}
