//! Profile: the registration record of an identity.

use serde::{Deserialize, Serialize};

use warble_core::UserId;

/// A registered identity's profile.
///
/// Registration means having a profile with a non-empty display name. The
/// ledger itself never reads anything from a profile beyond its existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The identity this profile belongs to.
    pub user: UserId,

    /// Human-readable name. Non-empty for any registered identity.
    pub display_name: String,

    /// When the profile was registered (Unix milliseconds).
    pub registered_at: i64,
}

impl Profile {
    /// Create a new profile record.
    pub fn new(user: UserId, display_name: impl Into<String>, registered_at: i64) -> Self {
        Self {
            user,
            display_name: display_name.into(),
            registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serde_roundtrip() {
        let profile = Profile::new(UserId::from_bytes([3; 32]), "Alice", 1736870400000);
        let json = serde_json::to_string(&profile).unwrap();
        let recovered: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, recovered);
    }
}
