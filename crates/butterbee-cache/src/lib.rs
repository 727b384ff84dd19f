//! Type-safe key-value persistence layer for the ButterBee storefront.
//!
//! The storefront keeps shopper state (the cart) in a key-value store keyed by
//! a session-scoped key. This crate provides the store port, two backends and
//! a JSON-serializing [`Cache`] wrapper on top of them.
//!
//! # Example
//!
//! ```rust
//! use butterbee_cache::{Cache, MemoryStore, SessionId};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Default)]
//! struct Cart {
//!     items: Vec<String>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = SessionId::new("sess_abc").key("butterbee.cart");
//!
//! cache.set(&key, &Cart { items: vec!["idli".into()] }).unwrap();
//! let cart: Option<Cart> = cache.get(&key).unwrap();
//! assert_eq!(cart.unwrap().items.len(), 1);
//!
//! cache.delete(&key).unwrap();
//! ```

mod error;
mod kv;
mod session;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use session::SessionId;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, SessionId};
}
