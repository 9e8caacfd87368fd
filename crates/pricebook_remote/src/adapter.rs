//! Remote store trait definition.

use crate::error::RemoteResult;
use crate::event::Subscription;
use async_trait::async_trait;
use pricebook_model::PriceItem;
use uuid::Uuid;

/// The remote table the collection is opportunistically synchronized to.
///
/// This trait abstracts the remote data store, allowing different
/// backends (a hosted relational service, an in-process mock, etc.). The
/// core treats every method as fallible and decides per operation whether
/// a failure is fatal; implementations only report what happened.
///
/// # Invariants
///
/// - Records are keyed by [`PriceItem::id`] in the remote table
/// - `fetch_all` returns the full table ordered by creation time,
///   newest first
/// - Uniqueness violations surface as [`crate::RemoteError::Conflict`],
///   distinct from transport failures
/// - `replace_all` clears the whole table and inserts the given set as
///   one logical step; it propagates every field, gross price included
///
/// # Implementors
///
/// - [`crate::MockRemoteStore`] - For testing
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches the full table, ordered by creation time descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    async fn fetch_all(&self) -> RemoteResult<Vec<PriceItem>>;

    /// Inserts one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RemoteError::Conflict`] for uniqueness
    /// violations, a transport error otherwise.
    async fn insert(&self, item: &PriceItem) -> RemoteResult<()>;

    /// Updates the record matching `item.id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn update(&self, item: &PriceItem) -> RemoteResult<()>;

    /// Deletes the record with the given id.
    ///
    /// Deleting an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn delete(&self, id: Uuid) -> RemoteResult<()>;

    /// Clears the entire table and inserts the given set.
    ///
    /// Used only by import; the caller treats any error as "nothing
    /// happened" and keeps its own state untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if either the clear or an insert fails.
    async fn replace_all(&self, items: &[PriceItem]) -> RemoteResult<()>;

    /// Opens the change-notification stream.
    ///
    /// One subscription per session; the consumer closes it on teardown.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be established.
    fn subscribe(&self) -> RemoteResult<Subscription>;
}
