//! Events emitted by the ledger as observable side effects.
//!
//! Every successful mutation produces exactly one event. Transport is an
//! integration choice; the core only defines the payloads.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// An observable ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A tweet was appended to an author's timeline.
    TweetCreated {
        author: UserId,
        id: u64,
        content: String,
        timestamp: i64,
    },

    /// A registered user liked a tweet.
    TweetLiked {
        liker: UserId,
        author: UserId,
        id: u64,
        /// The like count after the increment.
        likes: u64,
    },

    /// A registered user removed a like from a tweet.
    TweetUnliked {
        unliker: UserId,
        author: UserId,
        id: u64,
        /// The like count after the decrement.
        likes: u64,
    },
}

impl LedgerEvent {
    /// The author of the tweet this event concerns.
    pub fn author(&self) -> &UserId {
        match self {
            LedgerEvent::TweetCreated { author, .. }
            | LedgerEvent::TweetLiked { author, .. }
            | LedgerEvent::TweetUnliked { author, .. } => author,
        }
    }

    /// The id of the tweet this event concerns.
    pub fn tweet_id(&self) -> u64 {
        match self {
            LedgerEvent::TweetCreated { id, .. }
            | LedgerEvent::TweetLiked { id, .. }
            | LedgerEvent::TweetUnliked { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = LedgerEvent::TweetLiked {
            liker: UserId::from_bytes([1; 32]),
            author: UserId::from_bytes([2; 32]),
            id: 4,
            likes: 9,
        };
        let json = serde_json::to_string(&event).unwrap();
        let recovered: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, recovered);
    }

    #[test]
    fn test_event_accessors() {
        let author = UserId::from_bytes([2; 32]);
        let event = LedgerEvent::TweetCreated {
            author,
            id: 7,
            content: "hello".into(),
            timestamp: 1000,
        };
        assert_eq!(event.author(), &author);
        assert_eq!(event.tweet_id(), 7);
    }
}
