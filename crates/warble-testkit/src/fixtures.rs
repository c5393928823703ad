//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use warble::{Ledger, LedgerConfig};
use warble_core::UserId;
use warble_registry::MemoryRegistry;
use warble_store::MemoryStore;

/// A test fixture with a registry, an in-memory ledger, and its owner.
pub struct TestFixture {
    pub registry: Arc<MemoryRegistry>,
    pub ledger: Ledger<MemoryStore>,
    pub owner: UserId,
}

impl TestFixture {
    /// Create a new fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a fixture with a specific ledger configuration.
    pub fn with_config(config: LedgerConfig) -> Self {
        let registry = Arc::new(MemoryRegistry::new());
        let owner = UserId::random();
        let ledger = Ledger::new(registry.clone(), MemoryStore::new(), owner, config);
        Self {
            registry,
            ledger,
            owner,
        }
    }

    /// Register a fresh random identity under `display_name`.
    pub fn register(&self, display_name: &str) -> UserId {
        let user = UserId::random();
        self.registry
            .register(user, display_name, now_millis())
            .expect("display name is valid");
        user
    }

    /// Register `count` identities named `user-0`, `user-1`, ...
    pub fn registered_users(&self, count: usize) -> Vec<UserId> {
        (0..count)
            .map(|i| self.register(&format!("user-{}", i)))
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
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

#[cfg(test)]
mod tests {
    use super::*;
    use warble_registry::IdentityRegistry;

    #[tokio::test]
    async fn test_fixture_register_and_post() {
        let fixture = TestFixture::new();
        let alice = fixture.register("Alice");

        assert!(fixture.registry.is_registered(&alice));
        let tweet = fixture.ledger.create_tweet(&alice, "hello").await.unwrap();
        assert_eq!(tweet.id, 0);
    }

    #[tokio::test]
    async fn test_fixture_users_are_distinct() {
        let fixture = TestFixture::new();
        let users = fixture.registered_users(3);

        assert_ne!(users[0], users[1]);
        assert_ne!(users[1], users[2]);
        assert_ne!(users[0], users[2]);
    }

    #[tokio::test]
    async fn test_fixture_with_config() {
        let fixture = TestFixture::with_config(LedgerConfig {
            max_tweet_chars: 5,
            ..LedgerConfig::default()
        });
        let alice = fixture.register("Alice");

        assert!(fixture.ledger.create_tweet(&alice, "12345").await.is_ok());
        assert!(fixture.ledger.create_tweet(&alice, "123456").await.is_err());
    }
}
