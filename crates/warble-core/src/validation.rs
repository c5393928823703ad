//! Content validation for tweet creation.
//!
//! Validation happens once, at creation time, against the maximum in force
//! at that moment. Already-stored tweets are never revalidated when the
//! maximum changes.

use crate::error::ContentError;

/// Check that `content` fits within `max_chars` characters.
///
/// Length is counted in Unicode scalar values (`char`s), so a multi-byte
/// character counts as one.
pub fn validate_content(content: &str, max_chars: usize) -> Result<(), ContentError> {
    let chars = content.chars().count();
    if chars > max_chars {
        return Err(ContentError::TooLong {
            chars,
            max: max_chars,
        });
    }
    Ok(())
}
