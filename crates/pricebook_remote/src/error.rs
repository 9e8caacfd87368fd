//! Error types for remote store operations.

use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur talking to the remote store.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Network or transport failure.
    #[error("remote transport error: {0}")]
    Transport(String),

    /// The remote store rejected a write because of a uniqueness conflict.
    #[error("remote uniqueness conflict: {0}")]
    Conflict(String),

    /// The bounded request deadline elapsed.
    #[error("remote request timed out")]
    Timeout,

    /// The change-notification stream could not be opened or broke.
    #[error("subscription error: {0}")]
    Subscription(String),
}

impl RemoteError {
    /// Returns true if retrying the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, RemoteError::Transport(_) | RemoteError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(RemoteError::Transport("connection reset".into()).is_retryable());
        assert!(RemoteError::Timeout.is_retryable());
        assert!(!RemoteError::Conflict("duplicate name".into()).is_retryable());
        assert!(!RemoteError::Subscription("channel closed".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            RemoteError::Timeout.to_string(),
            "remote request timed out"
        );
        assert!(RemoteError::Conflict("Tea".into())
            .to_string()
            .contains("Tea"));
    }
}
