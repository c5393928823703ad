//! Error types for the Ledger.

use thiserror::Error;

use warble_core::{ContentError, UserId};
use warble_store::StoreError;

/// Errors that can occur during Ledger operations.
///
/// Every error is an immediate, local, non-retryable rejection of the
/// single requested operation; none leave partial state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller identity has no valid profile at call time.
    #[error("identity {0} is not registered")]
    NotRegistered(UserId),

    /// Content exceeds the current maximum length.
    #[error("content is {chars} characters, maximum is {max}")]
    ContentTooLong { chars: usize, max: usize },

    /// Referenced (author, id) pair does not exist.
    #[error("tweet {id} not found in timeline of {author}")]
    TweetNotFound { author: UserId, id: u64 },

    /// Unlike requested on a tweet with a zero like count.
    #[error("tweet {id} of {author} has no likes to remove")]
    NoLikesToRemove { author: UserId, id: u64 },

    /// Privileged configuration change attempted by a non-owner identity.
    #[error("identity {0} is not the ledger owner")]
    Unauthorized(UserId),

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::TweetNotFound { author, id } => LedgerError::TweetNotFound { author, id },
            StoreError::NoLikesToRemove { author, id } => {
                LedgerError::NoLikesToRemove { author, id }
            }
            other => LedgerError::Store(other),
        }
    }
}

impl From<ContentError> for LedgerError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::TooLong { chars, max } => LedgerError::ContentTooLong { chars, max },
        }
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
