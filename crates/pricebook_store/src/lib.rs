//! # Pricebook Store
//!
//! Durable local storage for the Pricebook core.
//!
//! This crate provides the lowest layer of the offline-first design: a
//! plain key-value text store plus the collection wrapper the core reads
//! and writes through.
//!
//! ## Design Principles
//!
//! - Stores are **opaque text stores** keyed by simple names; they do not
//!   interpret what they hold
//! - The whole item collection lives under a single fixed key
//! - A failed write is a hard error: local storage is the durability
//!   floor, so the caller must treat the mutation as failed
//! - Malformed stored content degrades to an empty collection instead of
//!   propagating an error
//!
//! ## Available Stores
//!
//! - [`MemoryStore`] - For tests and ephemeral sessions
//! - [`FileStore`] - Persistent storage, one file per key
//!
//! ## Example
//!
//! ```rust
//! use pricebook_store::{ItemStore, MemoryStore};
//! use std::sync::Arc;
//!
//! let store = ItemStore::new(Arc::new(MemoryStore::new()));
//! assert!(store.load_all().unwrap().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod items;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use items::{ItemStore, ITEMS_KEY};
pub use memory::MemoryStore;
pub use store::LocalStore;
