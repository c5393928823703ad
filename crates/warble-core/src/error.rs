//! Error types for the warble core.

use thiserror::Error;

/// Errors from operations on a single timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("tweet {0} does not exist in this timeline")]
    TweetNotFound(u64),

    #[error("tweet {0} has no likes to remove")]
    NoLikesToRemove(u64),
}

/// Content validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("content is {chars} characters, maximum is {max}")]
    TooLong { chars: usize, max: usize },
}
