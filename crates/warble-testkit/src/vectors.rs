//! Replayable behavior vectors.
//!
//! Each vector is a JSON-serializable sequence of operations with expected
//! outcomes, replayed against a fresh ledger. They pin the observable
//! behavior of the ledger independently of the storage backend: every
//! implementation of [`Store`] must produce identical outcomes.
//!
//! Actors are referred to by short names; each name maps to a fixed
//! identity, and the reserved name [`OWNER`] is the ledger owner.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use warble::{Ledger, LedgerConfig, LedgerError};
use warble_core::UserId;
use warble_registry::MemoryRegistry;
use warble_store::Store;

/// Reserved actor name for the ledger owner.
pub const OWNER: &str = "owner";

/// A single replayable scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVector {
    pub name: String,
    pub description: String,

    /// Initial maximum tweet length; `None` means the default.
    pub max_tweet_chars: Option<usize>,

    /// The operations to replay, in order.
    pub steps: Vec<Step>,
}

/// One operation and its expected outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub op: Op,
    pub expect: Expect,
}

/// An operation against the registry or the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    Register { user: String, display_name: String },
    Unregister { user: String },
    Create { caller: String, content: String },
    Like { caller: String, author: String, id: u64 },
    Unlike { caller: String, author: String, id: u64 },
    SetMax { caller: String, max: usize },
    TotalLikes { author: String },
    TimelineLen { author: String },
}

/// The expected outcome of a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Expect {
    /// The operation succeeds with no interesting value.
    Ok,
    /// A creation succeeds and assigns this tweet id.
    TweetId(u64),
    /// A like/unlike succeeds and returns this count.
    Likes(u64),
    /// A totals query returns this sum.
    Total(u64),
    /// A timeline length query returns this count.
    Len(u64),
    /// The operation fails with this error kind.
    Error(ErrorKind),
}

/// Ledger error kinds, as they appear in vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NotRegistered,
    ContentTooLong,
    TweetNotFound,
    NoLikesToRemove,
    Unauthorized,
}

/// Map an actor name to its fixed identity.
pub fn actor_id(name: &str) -> UserId {
    let mut bytes = [0u8; 32];
    let src = name.as_bytes();
    let n = src.len().min(32);
    bytes[..n].copy_from_slice(&src[..n]);
    UserId::from_bytes(bytes)
}

fn kind_of(e: &LedgerError) -> Option<ErrorKind> {
    match e {
        LedgerError::NotRegistered(_) => Some(ErrorKind::NotRegistered),
        LedgerError::ContentTooLong { .. } => Some(ErrorKind::ContentTooLong),
        LedgerError::TweetNotFound { .. } => Some(ErrorKind::TweetNotFound),
        LedgerError::NoLikesToRemove { .. } => Some(ErrorKind::NoLikesToRemove),
        LedgerError::Unauthorized(_) => Some(ErrorKind::Unauthorized),
        LedgerError::Store(_) => None,
    }
}

fn outcome<T>(result: Result<T, LedgerError>, on_ok: impl FnOnce(T) -> Expect) -> Result<Expect, String> {
    match result {
        Ok(value) => Ok(on_ok(value)),
        Err(e) => match kind_of(&e) {
            Some(kind) => Ok(Expect::Error(kind)),
            None => Err(format!("backend failure: {}", e)),
        },
    }
}

/// Replay a vector against a fresh ledger over `store`.
///
/// Returns a description of the first mismatching step, if any.
pub async fn run_vector<S: Store>(vector: &ScenarioVector, store: S) -> Result<(), String> {
    let registry = Arc::new(MemoryRegistry::new());
    let mut config = LedgerConfig::default();
    if let Some(max) = vector.max_tweet_chars {
        config.max_tweet_chars = max;
    }
    let ledger = Ledger::new(registry.clone(), store, actor_id(OWNER), config);

    for (i, step) in vector.steps.iter().enumerate() {
        let actual = match &step.op {
            Op::Register { user, display_name } => registry
                .register(actor_id(user), display_name.clone(), 0)
                .map(|_| Expect::Ok)
                .map_err(|e| format!("registration failed: {}", e))?,
            Op::Unregister { user } => {
                registry.unregister(&actor_id(user));
                Expect::Ok
            }
            Op::Create { caller, content } => outcome(
                ledger.create_tweet(&actor_id(caller), content).await,
                |t| Expect::TweetId(t.id),
            )?,
            Op::Like { caller, author, id } => outcome(
                ledger
                    .like_tweet(&actor_id(caller), &actor_id(author), *id)
                    .await,
                Expect::Likes,
            )?,
            Op::Unlike { caller, author, id } => outcome(
                ledger
                    .unlike_tweet(&actor_id(caller), &actor_id(author), *id)
                    .await,
                Expect::Likes,
            )?,
            Op::SetMax { caller, max } => outcome(
                ledger.set_max_tweet_chars(&actor_id(caller), *max),
                |_| Expect::Ok,
            )?,
            Op::TotalLikes { author } => outcome(
                ledger.total_likes(&actor_id(author)).await,
                Expect::Total,
            )?,
            Op::TimelineLen { author } => outcome(
                ledger.get_all_tweets(&actor_id(author)).await,
                |tweets| Expect::Len(tweets.len() as u64),
            )?,
        };

        if actual != step.expect {
            return Err(format!(
                "{}: step {}: expected {:?}, got {:?}",
                vector.name, i, step.expect, actual
            ));
        }
    }

    Ok(())
}

/// The built-in behavior vectors.
pub fn builtin_vectors() -> Vec<ScenarioVector> {
    vec![
        ScenarioVector {
            name: "alice_round_trip".into(),
            description: "Create, like, unlike, and reject the unlike at zero".into(),
            max_tweet_chars: None,
            steps: vec![
                step(
                    Op::Register {
                        user: "alice".into(),
                        display_name: "Alice".into(),
                    },
                    Expect::Ok,
                ),
                step(
                    Op::Create {
                        caller: "alice".into(),
                        content: "hello".into(),
                    },
                    Expect::TweetId(0),
                ),
                step(
                    Op::Like {
                        caller: "alice".into(),
                        author: "alice".into(),
                        id: 0,
                    },
                    Expect::Likes(1),
                ),
                step(
                    Op::Unlike {
                        caller: "alice".into(),
                        author: "alice".into(),
                        id: 0,
                    },
                    Expect::Likes(0),
                ),
                step(
                    Op::Unlike {
                        caller: "alice".into(),
                        author: "alice".into(),
                        id: 0,
                    },
                    Expect::Error(ErrorKind::NoLikesToRemove),
                ),
            ],
        },
        ScenarioVector {
            name: "unregistered_caller".into(),
            description: "An unregistered identity cannot post, and no state changes".into(),
            max_tweet_chars: None,
            steps: vec![
                step(
                    Op::Create {
                        caller: "bob".into(),
                        content: "hi".into(),
                    },
                    Expect::Error(ErrorKind::NotRegistered),
                ),
                step(
                    Op::TimelineLen {
                        author: "bob".into(),
                    },
                    Expect::Len(0),
                ),
            ],
        },
        ScenarioVector {
            name: "owner_shrinks_maximum".into(),
            description: "The new maximum gates future creations at the exact boundary".into(),
            max_tweet_chars: None,
            steps: vec![
                step(
                    Op::Register {
                        user: "alice".into(),
                        display_name: "Alice".into(),
                    },
                    Expect::Ok,
                ),
                step(
                    Op::SetMax {
                        caller: "owner".into(),
                        max: 10,
                    },
                    Expect::Ok,
                ),
                step(
                    Op::Create {
                        caller: "alice".into(),
                        content: "12345678901".into(),
                    },
                    Expect::Error(ErrorKind::ContentTooLong),
                ),
                step(
                    Op::Create {
                        caller: "alice".into(),
                        content: "1234567890".into(),
                    },
                    Expect::TweetId(0),
                ),
            ],
        },
        ScenarioVector {
            name: "non_owner_cannot_configure".into(),
            description: "Configuration is gated to the owner identity".into(),
            max_tweet_chars: None,
            steps: vec![
                step(
                    Op::Register {
                        user: "alice".into(),
                        display_name: "Alice".into(),
                    },
                    Expect::Ok,
                ),
                step(
                    Op::SetMax {
                        caller: "alice".into(),
                        max: 50,
                    },
                    Expect::Error(ErrorKind::Unauthorized),
                ),
                // The maximum is unchanged: 280 characters still fit.
                step(
                    Op::Create {
                        caller: "alice".into(),
                        content: "x".repeat(280),
                    },
                    Expect::TweetId(0),
                ),
            ],
        },
        ScenarioVector {
            name: "totals_track_likes".into(),
            description: "Total likes always equal the sum over the timeline".into(),
            max_tweet_chars: None,
            steps: vec![
                step(
                    Op::Register {
                        user: "alice".into(),
                        display_name: "Alice".into(),
                    },
                    Expect::Ok,
                ),
                step(
                    Op::Register {
                        user: "bob".into(),
                        display_name: "Bob".into(),
                    },
                    Expect::Ok,
                ),
                step(
                    Op::Create {
                        caller: "alice".into(),
                        content: "first".into(),
                    },
                    Expect::TweetId(0),
                ),
                step(
                    Op::Create {
                        caller: "alice".into(),
                        content: "second".into(),
                    },
                    Expect::TweetId(1),
                ),
                step(
                    Op::Like {
                        caller: "bob".into(),
                        author: "alice".into(),
                        id: 0,
                    },
                    Expect::Likes(1),
                ),
                step(
                    Op::Like {
                        caller: "bob".into(),
                        author: "alice".into(),
                        id: 1,
                    },
                    Expect::Likes(1),
                ),
                step(
                    Op::Like {
                        caller: "bob".into(),
                        author: "alice".into(),
                        id: 1,
                    },
                    Expect::Likes(2),
                ),
                step(
                    Op::Unlike {
                        caller: "bob".into(),
                        author: "alice".into(),
                        id: 0,
                    },
                    Expect::Likes(0),
                ),
                step(
                    Op::TotalLikes {
                        author: "alice".into(),
                    },
                    Expect::Total(2),
                ),
                step(
                    Op::Like {
                        caller: "bob".into(),
                        author: "alice".into(),
                        id: 5,
                    },
                    Expect::Error(ErrorKind::TweetNotFound),
                ),
                step(
                    Op::TotalLikes {
                        author: "nobody".into(),
                    },
                    Expect::Total(0),
                ),
            ],
        },
    ]
}

fn step(op: Op, expect: Expect) -> Step {
    Step { op, expect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warble_store::{MemoryStore, SqliteStore};

    #[tokio::test]
    async fn test_builtin_vectors_over_memory() {
        for vector in builtin_vectors() {
            run_vector(&vector, MemoryStore::new()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_builtin_vectors_over_sqlite() {
        for vector in builtin_vectors() {
            run_vector(&vector, SqliteStore::open_memory().unwrap())
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_vectors_json_roundtrip() {
        let vectors = builtin_vectors();
        let json = serde_json::to_string_pretty(&vectors).unwrap();
        let recovered: Vec<ScenarioVector> = serde_json::from_str(&json).unwrap();
        assert_eq!(vectors, recovered);
    }

    #[test]
    fn test_actor_ids_are_stable_and_distinct() {
        assert_eq!(actor_id("alice"), actor_id("alice"));
        assert_ne!(actor_id("alice"), actor_id("bob"));
        assert_ne!(actor_id("alice"), actor_id(OWNER));
    }
}
