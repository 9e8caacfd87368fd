//! Error taxonomy for the synchronization core.

use pricebook_remote::RemoteError;
use pricebook_store::StorageError;
use thiserror::Error;
use uuid::Uuid;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the state surface.
///
/// Propagation policy: validation and not-found errors are surfaced
/// immediately and never retried; storage errors abort the operation
/// with the in-memory change rolled back; remote errors are swallowed
/// (logged) for single-item mutations and fatal only for import.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad name, price, or gross price input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mutation referenced an unknown item id.
    #[error("no item with id {0}")]
    NotFound(Uuid),

    /// The local durability write failed.
    #[error("local storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Remote propagation failed where it matters (import).
    #[error("remote store failure: {0}")]
    Remote(#[from] RemoteError),
}

impl CoreError {
    /// Returns true if the error came from user input rather than a store.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::NotFound(_))
    }
}
