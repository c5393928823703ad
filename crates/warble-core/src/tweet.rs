//! Tweet: the immutable unit of the ledger.
//!
//! A tweet is created once and never edited or deleted. The like counter is
//! its only mutable field, and it moves only through [`Tweet::like`] and
//! [`Tweet::unlike`].

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::types::UserId;

/// Default maximum tweet content length, in characters.
pub const DEFAULT_MAX_TWEET_CHARS: usize = 280;

/// One post in an author's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// The identity that created this tweet. Immutable.
    pub author: UserId,

    /// Position in the author's timeline (0-based). Immutable, never reused.
    pub id: u64,

    /// The text content. Immutable.
    pub content: String,

    /// Creation time (Unix milliseconds). Immutable.
    pub timestamp: i64,

    /// Like counter. The only mutable field.
    pub likes: u64,
}

impl Tweet {
    /// Create a new tweet with zero likes.
    pub fn new(author: UserId, id: u64, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            author,
            id,
            content: content.into(),
            timestamp,
            likes: 0,
        }
    }

    /// Increment the like counter. Returns the new count.
    pub fn like(&mut self) -> u64 {
        self.likes += 1;
        self.likes
    }

    /// Decrement the like counter. Returns the new count.
    ///
    /// A tweet with zero likes rejects the unlike; the counter is never
    /// clamped below zero.
    pub fn unlike(&mut self) -> Result<u64, TimelineError> {
        if self.likes == 0 {
            return Err(TimelineError::NoLikesToRemove(self.id));
        }
        self.likes -= 1;
        Ok(self.likes)
    }
}
