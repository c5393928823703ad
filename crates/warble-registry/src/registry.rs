//! The registration capability and its in-memory implementation.
//!
//! The ledger does not manage identities. It consumes a single capability
//! from this collaborator: resolve an identity to a registration status.
//! The capability is injected at ledger construction so authorization stays
//! explicit and testable with a fake.

use std::collections::HashMap;
use std::sync::RwLock;

use warble_core::UserId;

use crate::error::{RegistryError, Result, MAX_DISPLAY_NAME_CHARS};
use crate::profile::Profile;

/// The capability the ledger consumes.
///
/// `is_registered` is a pure, side-effect-free query. The ledger calls it
/// once per mutating operation, at call time; registration status is never
/// cached across calls.
pub trait IdentityRegistry: Send + Sync {
    /// Whether `user` currently has a profile with a non-empty display name.
    fn is_registered(&self, user: &UserId) -> bool;
}

/// In-memory profile store.
///
/// Thread-safe via RwLock. Registering an already-registered identity
/// replaces its profile.
pub struct MemoryRegistry {
    profiles: RwLock<HashMap<UserId, Profile>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Register `user` under `display_name`.
    ///
    /// The name must be non-empty and at most [`MAX_DISPLAY_NAME_CHARS`]
    /// characters.
    pub fn register(
        &self,
        user: UserId,
        display_name: impl Into<String>,
        now: i64,
    ) -> Result<Profile> {
        let display_name = display_name.into();
        if display_name.is_empty() {
            return Err(RegistryError::EmptyDisplayName);
        }
        let chars = display_name.chars().count();
        if chars > MAX_DISPLAY_NAME_CHARS {
            return Err(RegistryError::DisplayNameTooLong {
                chars,
                max: MAX_DISPLAY_NAME_CHARS,
            });
        }

        let profile = Profile::new(user, display_name, now);
        self.profiles
            .write()
            .unwrap()
            .insert(user, profile.clone());
        Ok(profile)
    }

    /// Remove an identity's profile, if present.
    pub fn unregister(&self, user: &UserId) -> Option<Profile> {
        self.profiles.write().unwrap().remove(user)
    }

    /// Look up a profile.
    pub fn profile(&self, user: &UserId) -> Option<Profile> {
        self.profiles.read().unwrap().get(user).cloned()
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.profiles.read().unwrap().len()
    }

    /// Whether no identities are registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.read().unwrap().is_empty()
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRegistry for MemoryRegistry {
    fn is_registered(&self, user: &UserId) -> bool {
        self.profiles
            .read()
            .unwrap()
            .get(user)
            .is_some_and(|p| !p.display_name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_is_registered() {
        let registry = MemoryRegistry::new();
        let alice = UserId::from_bytes([1; 32]);

        assert!(!registry.is_registered(&alice));
        registry.register(alice, "Alice", 1000).unwrap();
        assert!(registry.is_registered(&alice));
    }

    #[test]
    fn test_empty_display_name_rejected() {
        let registry = MemoryRegistry::new();
        let alice = UserId::from_bytes([1; 32]);

        assert_eq!(
            registry.register(alice, "", 1000),
            Err(RegistryError::EmptyDisplayName)
        );
        assert!(!registry.is_registered(&alice));
    }

    #[test]
    fn test_display_name_too_long_rejected() {
        let registry = MemoryRegistry::new();
        let alice = UserId::from_bytes([1; 32]);
        let name = "x".repeat(MAX_DISPLAY_NAME_CHARS + 1);

        assert!(matches!(
            registry.register(alice, name, 1000),
            Err(RegistryError::DisplayNameTooLong { .. })
        ));
    }

    #[test]
    fn test_display_name_at_limit_accepted() {
        let registry = MemoryRegistry::new();
        let alice = UserId::from_bytes([1; 32]);
        let name = "x".repeat(MAX_DISPLAY_NAME_CHARS);

        assert!(registry.register(alice, name, 1000).is_ok());
    }

    #[test]
    fn test_reregister_replaces_profile() {
        let registry = MemoryRegistry::new();
        let alice = UserId::from_bytes([1; 32]);

        registry.register(alice, "Alice", 1000).unwrap();
        registry.register(alice, "Alice B", 2000).unwrap();

        let profile = registry.profile(&alice).unwrap();
        assert_eq!(profile.display_name, "Alice B");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_revokes_registration() {
        let registry = MemoryRegistry::new();
        let alice = UserId::from_bytes([1; 32]);

        registry.register(alice, "Alice", 1000).unwrap();
        registry.unregister(&alice);
        assert!(!registry.is_registered(&alice));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_any_valid_name_registers(name in "[a-zA-Z0-9 ]{1,50}") {
                let registry = MemoryRegistry::new();
                let user = UserId::from_bytes([7; 32]);
                prop_assert!(registry.register(user, name, 0).is_ok());
                prop_assert!(registry.is_registered(&user));
            }
        }
    }
}
