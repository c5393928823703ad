//! # Warble Store
//!
//! Storage abstraction for the warble ledger. Provides a trait-based
//! interface for timeline persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The store module abstracts timeline storage behind the [`Store`] trait,
//! allowing the ledger to be storage-agnostic. The primary implementation
//! is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Design Notes
//!
//! - **Atomic id assignment**: `append_tweet` assigns the next sequential
//!   id inside the same critical section as the insert
//! - **Atomic counters**: like/unlike updates enforce the zero floor in
//!   one operation, never clamping
//! - **Implicit timelines**: an author's timeline exists once their first
//!   tweet is appended

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::Store;
