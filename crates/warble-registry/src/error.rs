//! Error types for the identity registry.

use thiserror::Error;

/// Maximum display name length, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("display name is {chars} characters, maximum is {max}")]
    DisplayNameTooLong { chars: usize, max: usize },
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
