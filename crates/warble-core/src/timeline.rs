//! Timeline: an ordered, append-only sequence of one author's tweets.
//!
//! Each identity exclusively owns one timeline. Tweets are indexed by their
//! id, which is the position at which they were appended: `tweets[i].id == i`
//! always holds, and the sequence only grows.

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::tweet::Tweet;
use crate::types::UserId;

/// The append-only tweet sequence of a single author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    author: UserId,
    tweets: Vec<Tweet>,
}

impl Timeline {
    /// Create an empty timeline for an author.
    pub fn new(author: UserId) -> Self {
        Self {
            author,
            tweets: Vec::new(),
        }
    }

    /// The identity that owns this timeline.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Append a new tweet, assigning the next sequential id.
    ///
    /// Ids are the timeline length at creation time: `0, 1, 2, ...` with no
    /// gaps or reuse.
    pub fn append(&mut self, content: impl Into<String>, timestamp: i64) -> &Tweet {
        let id = self.tweets.len() as u64;
        self.tweets.push(Tweet::new(self.author, id, content, timestamp));
        &self.tweets[id as usize]
    }

    /// Increment the like counter of the tweet at `id`. Returns the new count.
    pub fn like(&mut self, id: u64) -> Result<u64, TimelineError> {
        let tweet = self
            .tweets
            .get_mut(id as usize)
            .ok_or(TimelineError::TweetNotFound(id))?;
        Ok(tweet.like())
    }

    /// Decrement the like counter of the tweet at `id`. Returns the new count.
    pub fn unlike(&mut self, id: u64) -> Result<u64, TimelineError> {
        let tweet = self
            .tweets
            .get_mut(id as usize)
            .ok_or(TimelineError::TweetNotFound(id))?;
        tweet.unlike()
    }

    /// Get the tweet at `id`, if it exists.
    pub fn get(&self, id: u64) -> Option<&Tweet> {
        self.tweets.get(id as usize)
    }

    /// All tweets, in append order.
    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    /// Number of tweets in this timeline.
    pub fn len(&self) -> u64 {
        self.tweets.len() as u64
    }

    /// Whether the timeline has no tweets.
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// Sum of likes across all tweets in this timeline.
    pub fn total_likes(&self) -> u64 {
        self.tweets.iter().map(|t| t.likes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_timeline() -> Timeline {
        Timeline::new(UserId::from_bytes([0x11; 32]))
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut timeline = make_timeline();

        for i in 0..5u64 {
            let tweet = timeline.append(format!("tweet {}", i), 1000 + i as i64);
            assert_eq!(tweet.id, i);
        }

        assert_eq!(timeline.len(), 5);
        for (i, tweet) in timeline.tweets().iter().enumerate() {
            assert_eq!(tweet.id, i as u64);
        }
    }

    #[test]
    fn test_like_and_unlike() {
        let mut timeline = make_timeline();
        timeline.append("hello", 1000);

        assert_eq!(timeline.like(0), Ok(1));
        assert_eq!(timeline.like(0), Ok(2));
        assert_eq!(timeline.unlike(0), Ok(1));
        assert_eq!(timeline.unlike(0), Ok(0));
        assert_eq!(timeline.unlike(0), Err(TimelineError::NoLikesToRemove(0)));
    }

    #[test]
    fn test_like_out_of_range() {
        let mut timeline = make_timeline();
        timeline.append("hello", 1000);

        assert_eq!(timeline.like(1), Err(TimelineError::TweetNotFound(1)));
        assert_eq!(timeline.unlike(7), Err(TimelineError::TweetNotFound(7)));
    }

    #[test]
    fn test_get() {
        let mut timeline = make_timeline();
        timeline.append("first", 1000);
        timeline.append("second", 1001);

        assert_eq!(timeline.get(1).unwrap().content, "second");
        assert!(timeline.get(2).is_none());
    }

    #[test]
    fn test_total_likes_sums_all_tweets() {
        let mut timeline = make_timeline();
        timeline.append("a", 1000);
        timeline.append("b", 1001);
        timeline.append("c", 1002);

        timeline.like(0).unwrap();
        timeline.like(0).unwrap();
        timeline.like(2).unwrap();

        assert_eq!(timeline.total_likes(), 3);

        let summed: u64 = timeline.tweets().iter().map(|t| t.likes).sum();
        assert_eq!(timeline.total_likes(), summed);
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = make_timeline();
        assert!(timeline.is_empty());
        assert_eq!(timeline.total_likes(), 0);
        assert!(timeline.get(0).is_none());
    }

    #[test]
    fn test_ids_stable_across_likes() {
        let mut timeline = make_timeline();
        timeline.append("a", 1000);
        timeline.like(0).unwrap();
        let tweet = timeline.append("b", 1001);
        assert_eq!(tweet.id, 1);
    }
}
