//! Store trait: the abstract interface for timeline persistence.
//!
//! This trait allows the ledger to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;

use warble_core::{Tweet, UserId};

use crate::error::Result;

/// The Store trait: async interface for timeline persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Id assignment is the store's job**: `append_tweet` assigns the next
///   sequential id inside the same critical section as the insert, so
///   `(author, id)` pairs are unique even under concurrent appends.
/// - **Counter updates are atomic**: `like_tweet` / `unlike_tweet` perform
///   the read-check-write as one operation; the zero floor is enforced
///   here, never clamped.
/// - **Implicit timelines**: an author's timeline exists as soon as their
///   first tweet is appended; no explicit creation step.
#[async_trait]
pub trait Store: Send + Sync {
    /// Append a tweet to `author`'s timeline.
    ///
    /// The new tweet's id is the timeline length at append time (0-based).
    /// Returns the stored tweet.
    async fn append_tweet(&self, author: &UserId, content: &str, timestamp: i64)
        -> Result<Tweet>;

    /// Increment the like counter of `(author, id)`.
    ///
    /// Returns the new count. Fails with `TweetNotFound` if the id is out
    /// of range.
    async fn like_tweet(&self, author: &UserId, id: u64) -> Result<u64>;

    /// Decrement the like counter of `(author, id)`.
    ///
    /// Returns the new count. Fails with `TweetNotFound` if the id is out
    /// of range, or `NoLikesToRemove` if the counter is already zero.
    async fn unlike_tweet(&self, author: &UserId, id: u64) -> Result<u64>;

    /// Get the tweet at `(author, id)`, if it exists.
    async fn get_tweet(&self, author: &UserId, id: u64) -> Result<Option<Tweet>>;

    /// Get `author`'s full timeline, ordered by id. Empty if the author has
    /// never tweeted.
    async fn get_timeline(&self, author: &UserId) -> Result<Vec<Tweet>>;

    /// Number of tweets in `author`'s timeline.
    async fn timeline_len(&self, author: &UserId) -> Result<u64>;

    /// Sum of likes across `author`'s timeline. Zero if the author has
    /// never tweeted.
    async fn total_likes(&self, author: &UserId) -> Result<u64>;

    /// List all authors with at least one tweet.
    async fn list_authors(&self) -> Result<Vec<UserId>>;
}
