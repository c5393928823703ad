//! The Ledger: unified API for the warble system.
//!
//! The Ledger brings together identity registration, timeline storage,
//! configuration, and event emission into a cohesive interface.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::{debug, info};

use warble_core::{validate_content, LedgerEvent, Tweet, UserId, DEFAULT_MAX_TWEET_CHARS};
use warble_registry::IdentityRegistry;
use warble_store::Store;

use crate::error::{LedgerError, Result};

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Maximum tweet content length, in characters. Mutable at runtime by
    /// the owner; affects only future creations.
    pub max_tweet_chars: usize,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_tweet_chars: DEFAULT_MAX_TWEET_CHARS,
            event_capacity: 128,
        }
    }
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Creating tweets on registered identities' timelines
/// - Like/unlike accounting
/// - Querying timelines
/// - Owner-gated configuration
///
/// Every mutating operation checks the caller's registration against the
/// injected [`IdentityRegistry`] at call time, before any state change.
/// Operations are atomic single-step transitions; a failed call leaves no
/// partial state.
pub struct Ledger<S: Store> {
    /// The registration capability, injected at construction.
    registry: Arc<dyn IdentityRegistry>,
    /// The storage backend.
    store: Arc<S>,
    /// The single identity allowed to change configuration.
    owner: UserId,
    /// Current maximum tweet length.
    max_tweet_chars: RwLock<usize>,
    /// Event fan-out to subscribers.
    events: broadcast::Sender<LedgerEvent>,
}

impl<S: Store> Ledger<S> {
    /// Create a new ledger instance.
    ///
    /// `owner` is fixed for the lifetime of the ledger; there is no
    /// ownership transfer.
    pub fn new(
        registry: Arc<dyn IdentityRegistry>,
        store: S,
        owner: UserId,
        config: LedgerConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity);
        Self {
            registry,
            store: Arc::new(store),
            owner,
            max_tweet_chars: RwLock::new(config.max_tweet_chars),
            events,
        }
    }

    /// The owner identity.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The maximum tweet length currently in force.
    pub fn max_tweet_chars(&self) -> usize {
        *self.max_tweet_chars.read().unwrap()
    }

    /// Subscribe to ledger events.
    ///
    /// Every successful mutation emits exactly one event. Subscribers that
    /// lag or disconnect never affect the mutation's outcome.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a tweet on the caller's own timeline.
    ///
    /// The new tweet's id is the caller's current timeline length; ids are
    /// `0, 1, 2, ...` in creation order and are never reused. Content is
    /// validated against the maximum in force right now; raising or
    /// lowering the maximum later never revalidates stored tweets.
    pub async fn create_tweet(&self, caller: &UserId, content: &str) -> Result<Tweet> {
        self.ensure_registered(caller)?;
        validate_content(content, self.max_tweet_chars())?;

        let tweet = self
            .store
            .append_tweet(caller, content, now_millis())
            .await?;

        info!(author = %tweet.author, id = tweet.id, chars = content.chars().count(), "tweet created");
        self.emit(LedgerEvent::TweetCreated {
            author: tweet.author,
            id: tweet.id,
            content: tweet.content.clone(),
            timestamp: tweet.timestamp,
        });

        Ok(tweet)
    }

    /// Like the tweet at `(author, id)`. Returns the new like count.
    ///
    /// Likes are not deduplicated: there is no per-liker ledger, so the
    /// same caller may like the same tweet any number of times, including
    /// their own. A hardened deployment would track (liker, author, id)
    /// tuples to make this idempotent.
    pub async fn like_tweet(&self, caller: &UserId, author: &UserId, id: u64) -> Result<u64> {
        self.ensure_registered(caller)?;

        let likes = self.store.like_tweet(author, id).await?;

        debug!(liker = %caller, author = %author, id, likes, "tweet liked");
        self.emit(LedgerEvent::TweetLiked {
            liker: *caller,
            author: *author,
            id,
            likes,
        });

        Ok(likes)
    }

    /// Remove one like from the tweet at `(author, id)`. Returns the new
    /// like count.
    ///
    /// A tweet with zero likes rejects the call; the counter is never
    /// clamped.
    pub async fn unlike_tweet(&self, caller: &UserId, author: &UserId, id: u64) -> Result<u64> {
        self.ensure_registered(caller)?;

        let likes = self.store.unlike_tweet(author, id).await?;

        debug!(unliker = %caller, author = %author, id, likes, "tweet unliked");
        self.emit(LedgerEvent::TweetUnliked {
            unliker: *caller,
            author: *author,
            id,
            likes,
        });

        Ok(likes)
    }

    /// Set the maximum tweet length for subsequent creations.
    ///
    /// Restricted to the owner identity fixed at construction. Takes
    /// effect immediately for future `create_tweet` calls only.
    pub fn set_max_tweet_chars(&self, caller: &UserId, max: usize) -> Result<()> {
        if caller != &self.owner {
            return Err(LedgerError::Unauthorized(*caller));
        }

        *self.max_tweet_chars.write().unwrap() = max;
        info!(owner = %caller, max, "maximum tweet length changed");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the tweet at `(author, id)`. Public read, no registration
    /// required.
    pub async fn get_tweet(&self, author: &UserId, id: u64) -> Result<Tweet> {
        self.store
            .get_tweet(author, id)
            .await?
            .ok_or(LedgerError::TweetNotFound { author: *author, id })
    }

    /// Get `author`'s full timeline, ordered by id. Public read; empty for
    /// an author with no tweets.
    pub async fn get_all_tweets(&self, author: &UserId) -> Result<Vec<Tweet>> {
        Ok(self.store.get_timeline(author).await?)
    }

    /// Sum of likes across `author`'s tweets. Public read; zero for an
    /// author with no tweets.
    pub async fn total_likes(&self, author: &UserId) -> Result<u64> {
        Ok(self.store.total_likes(author).await?)
    }

    /// List all identities with at least one tweet.
    pub async fn authors(&self) -> Result<Vec<UserId>> {
        Ok(self.store.list_authors().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    /// Registration is checked per call, at call time, never cached.
    fn ensure_registered(&self, caller: &UserId) -> Result<()> {
        if !self.registry.is_registered(caller) {
            return Err(LedgerError::NotRegistered(*caller));
        }
        Ok(())
    }

    fn emit(&self, event: LedgerEvent) {
        // No subscribers is fine; delivery never gates the mutation.
        let _ = self.events.send(event);
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
