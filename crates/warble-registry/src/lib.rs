//! # Warble Registry
//!
//! The identity collaborator for the warble ledger: profile records and the
//! registration capability the ledger consumes.
//!
//! The ledger treats identity management as external. It only needs one
//! answer from this crate: "is this identity registered right now?" That
//! answer is the [`IdentityRegistry`] trait. [`MemoryRegistry`] is the
//! in-process implementation; deployments with an external profile service
//! implement the trait over that service instead.

pub mod error;
pub mod profile;
pub mod registry;

pub use error::{RegistryError, Result, MAX_DISPLAY_NAME_CHARS};
pub use profile::Profile;
pub use registry::{IdentityRegistry, MemoryRegistry};
