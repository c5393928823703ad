//! # Warble
//!
//! The unified API for the warble system - a minimal social-posting ledger
//! with registered identities, append-only timelines, and like accounting.
//!
//! ## Overview
//!
//! The warble Ledger provides a small, embeddable library for:
//!
//! - **Tweets**: Immutable posts on a per-author, append-only timeline
//! - **Likes**: A per-tweet counter moved only by like/unlike, never negative
//! - **Registration**: Every mutation re-checks the caller against an
//!   injected identity registry
//! - **Configuration**: An owner-gated maximum tweet length
//!
//! ## Key Concepts
//!
//! - **Tweet**: Immutable. Never edited or deleted. Ids are the position in
//!   the author's timeline, assigned at creation.
//! - **Timeline**: Owned by a single author. Created implicitly on the first
//!   tweet. Only ever grows.
//! - **Owner**: The one identity allowed to change the maximum tweet length,
//!   fixed at construction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warble::{Ledger, LedgerConfig, MemoryRegistry, SqliteStore, UserId};
//!
//! async fn example() {
//!     // Identity management is external; the ledger only consumes the
//!     // registration predicate.
//!     let registry = Arc::new(MemoryRegistry::new());
//!
//!     // Open storage
//!     let store = SqliteStore::open("warble.db").unwrap();
//!
//!     // Create the ledger
//!     let owner = UserId::random();
//!     let ledger = Ledger::new(registry.clone(), store, owner, LedgerConfig::default());
//!
//!     // Register an identity and post
//!     let alice = UserId::random();
//!     registry.register(alice, "Alice", 0).unwrap();
//!
//!     let tweet = ledger.create_tweet(&alice, "hello world").await.unwrap();
//!     let likes = ledger.like_tweet(&alice, &tweet.author, tweet.id).await.unwrap();
//!     assert_eq!(likes, 1);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `warble::core` - Core primitives (Tweet, Timeline, UserId, etc.)
//! - `warble::registry` - The identity registry collaborator
//! - `warble::store` - Storage abstraction, SQLite and in-memory backends

pub mod error;
pub mod ledger;

// Re-export component crates
pub use warble_core as core;
pub use warble_registry as registry;
pub use warble_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};

// Re-export commonly used component types
pub use warble_core::{
    LedgerEvent, Timeline, Tweet, UserId, DEFAULT_MAX_TWEET_CHARS,
};
pub use warble_registry::{IdentityRegistry, MemoryRegistry, Profile};
pub use warble_store::{MemoryStore, SqliteStore, Store};
