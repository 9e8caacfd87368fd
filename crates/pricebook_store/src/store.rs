//! Local store trait definition.

use crate::error::StorageResult;

/// A durable key-value text store.
///
/// Local stores are **opaque text stores**: they persist and return text
/// under simple string keys and do not interpret the content. The
/// collection wrapper ([`crate::ItemStore`]) owns all serialization.
///
/// # Invariants
///
/// - `get` returns exactly the text previously passed to `set` for the
///   same key, or `None` if the key was never set or was removed
/// - `set` fully overwrites prior content and is durable once it returns
/// - Stores must be `Send + Sync` for shared access
///
/// # Implementors
///
/// - [`crate::MemoryStore`] - For testing
/// - [`crate::FileStore`] - For persistent storage
pub trait LocalStore: Send + Sync {
    /// Reads the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, overwriting prior content.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable. The caller
    /// must treat the surrounding mutation as failed.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the entry under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails. Removing an absent key is
    /// not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
