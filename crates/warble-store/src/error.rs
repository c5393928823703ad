//! Error types for the store module.

use thiserror::Error;

use warble_core::UserId;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Referenced tweet does not exist.
    #[error("tweet {id} not found in timeline of {author}")]
    TweetNotFound { author: UserId, id: u64 },

    /// Unlike requested on a tweet with a zero like count.
    #[error("tweet {id} of {author} has no likes to remove")]
    NoLikesToRemove { author: UserId, id: u64 },

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
