//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing and embedded use. It has the same
//! semantics as SQLite but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use warble_core::{Timeline, TimelineError, Tweet, UserId};

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock:
/// mutations serialize behind the write lock, reads snapshot behind the
/// read lock.
pub struct MemoryStore {
    timelines: RwLock<HashMap<UserId, Timeline>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            timelines: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn timeline_error(author: &UserId, e: TimelineError) -> StoreError {
    match e {
        TimelineError::TweetNotFound(id) => StoreError::TweetNotFound {
            author: *author,
            id,
        },
        TimelineError::NoLikesToRemove(id) => StoreError::NoLikesToRemove {
            author: *author,
            id,
        },
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn append_tweet(
        &self,
        author: &UserId,
        content: &str,
        timestamp: i64,
    ) -> Result<Tweet> {
        let mut timelines = self.timelines.write().unwrap();
        let timeline = timelines
            .entry(*author)
            .or_insert_with(|| Timeline::new(*author));
        Ok(timeline.append(content, timestamp).clone())
    }

    async fn like_tweet(&self, author: &UserId, id: u64) -> Result<u64> {
        let mut timelines = self.timelines.write().unwrap();
        let timeline = timelines
            .get_mut(author)
            .ok_or(StoreError::TweetNotFound { author: *author, id })?;
        timeline.like(id).map_err(|e| timeline_error(author, e))
    }

    async fn unlike_tweet(&self, author: &UserId, id: u64) -> Result<u64> {
        let mut timelines = self.timelines.write().unwrap();
        let timeline = timelines
            .get_mut(author)
            .ok_or(StoreError::TweetNotFound { author: *author, id })?;
        timeline.unlike(id).map_err(|e| timeline_error(author, e))
    }

    async fn get_tweet(&self, author: &UserId, id: u64) -> Result<Option<Tweet>> {
        let timelines = self.timelines.read().unwrap();
        Ok(timelines.get(author).and_then(|t| t.get(id)).cloned())
    }

    async fn get_timeline(&self, author: &UserId) -> Result<Vec<Tweet>> {
        let timelines = self.timelines.read().unwrap();
        Ok(timelines
            .get(author)
            .map(|t| t.tweets().to_vec())
            .unwrap_or_default())
    }

    async fn timeline_len(&self, author: &UserId) -> Result<u64> {
        let timelines = self.timelines.read().unwrap();
        Ok(timelines.get(author).map(|t| t.len()).unwrap_or(0))
    }

    async fn total_likes(&self, author: &UserId) -> Result<u64> {
        let timelines = self.timelines.read().unwrap();
        Ok(timelines.get(author).map(|t| t.total_likes()).unwrap_or(0))
    }

    async fn list_authors(&self) -> Result<Vec<UserId>> {
        let timelines = self.timelines.read().unwrap();
        let mut authors: Vec<UserId> = timelines
            .values()
            .filter(|t| !t.is_empty())
            .map(|t| *t.author())
            .collect();
        authors.sort();
        Ok(authors)
    }
}
