//! Type-safe key-value store for session state.
//!
//! Values are stored as JSON text under string keys. Two backends are
//! provided: [`MemoryStore`] for tests and short-lived processes, and
//! [`FileStore`], which keeps every key in one JSON document on disk.
//!
//! # Example
//!
//! ```
//! use pos_store::{Cache, MemoryStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Company {
//!     name: String,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("pos-company", &Company { name: "Mi Tienda".into() }).unwrap();
//!
//! let company: Option<Company> = cache.get("pos-company").unwrap();
//! assert_eq!(company.unwrap().name, "Mi Tienda");
//!
//! cache.delete("pos-company").unwrap();
//! assert!(!cache.exists("pos-company").unwrap());
//! ```

mod cache;
mod error;
mod kv;

pub use cache::Cache;
pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KeyValueStore, MemoryStore, StoreError};
}
