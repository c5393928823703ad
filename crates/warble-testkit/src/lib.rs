//! # Warble Testkit
//!
//! Testing utilities for the warble ledger: fixtures, proptest generators,
//! and replayable behavior vectors.
//!
//! ## Contents
//!
//! - [`fixtures`] - Pre-wired ledger/registry setups for integration tests
//! - [`generators`] - Proptest strategies for identities, content, and
//!   operation sequences
//! - [`vectors`] - JSON scenario vectors that pin observable behavior
//!   across storage backends

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{apply_ops, content, display_name, timeline_ops, user_id, TimelineOp};
pub use vectors::{builtin_vectors, run_vector, ScenarioVector};
