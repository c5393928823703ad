//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for the warble ledger. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use warble_core::{Tweet, UserId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::Store;

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex; the single connection serializes all
/// mutations. Operations run under spawn_blocking to avoid blocking the
/// async runtime, and read-modify-write sequences run inside transactions.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        debug!("opened sqlite store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|e| {
                StoreError::Database(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                    Some(format!("mutex poisoned: {}", e)),
                ))
            })?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some(format!("spawn_blocking failed: {}", e)),
            ))
        })?
    }
}

// Helper to convert a row to Tweet
fn row_to_tweet(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tweet> {
    let author_bytes: Vec<u8> = row.get("author")?;
    let author = UserId::try_from(author_bytes.as_slice()).map_err(|_| {
        rusqlite::Error::InvalidColumnType(0, "author".into(), rusqlite::types::Type::Blob)
    })?;

    Ok(Tweet {
        author,
        id: row.get::<_, i64>("tweet_id")? as u64,
        content: row.get("content")?,
        timestamp: row.get("timestamp")?,
        likes: row.get::<_, i64>("likes")? as u64,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn append_tweet(
        &self,
        author: &UserId,
        content: &str,
        timestamp: i64,
    ) -> Result<Tweet> {
        let author = *author;
        let content = content.to_string();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            // Next id is the current timeline length.
            let next_id: i64 = tx.query_row(
                "SELECT COUNT(*) FROM tweets WHERE author = ?1",
                params![author.as_bytes().as_slice()],
                |row| row.get(0),
            )?;

            tx.execute(
                "INSERT INTO tweets (author, tweet_id, content, timestamp, likes)
                 VALUES (?1, ?2, ?3, ?4, 0)",
                params![
                    author.as_bytes().as_slice(),
                    next_id,
                    &content,
                    timestamp
                ],
            )?;

            tx.commit()?;

            Ok(Tweet {
                author,
                id: next_id as u64,
                content,
                timestamp,
                likes: 0,
            })
        })
        .await
    }

    async fn like_tweet(&self, author: &UserId, id: u64) -> Result<u64> {
        let author = *author;

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            let likes: Option<i64> = tx
                .query_row(
                    "SELECT likes FROM tweets WHERE author = ?1 AND tweet_id = ?2",
                    params![author.as_bytes().as_slice(), id as i64],
                    |row| row.get(0),
                )
                .optional()?;

            let likes = likes.ok_or(StoreError::TweetNotFound { author, id })?;
            let new_count = likes + 1;

            tx.execute(
                "UPDATE tweets SET likes = ?3 WHERE author = ?1 AND tweet_id = ?2",
                params![author.as_bytes().as_slice(), id as i64, new_count],
            )?;

            tx.commit()?;
            Ok(new_count as u64)
        })
        .await
    }

    async fn unlike_tweet(&self, author: &UserId, id: u64) -> Result<u64> {
        let author = *author;

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            let likes: Option<i64> = tx
                .query_row(
                    "SELECT likes FROM tweets WHERE author = ?1 AND tweet_id = ?2",
                    params![author.as_bytes().as_slice(), id as i64],
                    |row| row.get(0),
                )
                .optional()?;

            let likes = likes.ok_or(StoreError::TweetNotFound { author, id })?;
            if likes == 0 {
                return Err(StoreError::NoLikesToRemove { author, id });
            }
            let new_count = likes - 1;

            tx.execute(
                "UPDATE tweets SET likes = ?3 WHERE author = ?1 AND tweet_id = ?2",
                params![author.as_bytes().as_slice(), id as i64, new_count],
            )?;

            tx.commit()?;
            Ok(new_count as u64)
        })
        .await
    }

    async fn get_tweet(&self, author: &UserId, id: u64) -> Result<Option<Tweet>> {
        let author = *author;

        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT author, tweet_id, content, timestamp, likes
                 FROM tweets WHERE author = ?1 AND tweet_id = ?2",
                params![author.as_bytes().as_slice(), id as i64],
                row_to_tweet,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn get_timeline(&self, author: &UserId) -> Result<Vec<Tweet>> {
        let author = *author;

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT author, tweet_id, content, timestamp, likes
                 FROM tweets WHERE author = ?1
                 ORDER BY tweet_id",
            )?;

            let tweets = stmt
                .query_map(params![author.as_bytes().as_slice()], row_to_tweet)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(tweets)
        })
        .await
    }

    async fn timeline_len(&self, author: &UserId) -> Result<u64> {
        let author = *author;

        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM tweets WHERE author = ?1",
                params![author.as_bytes().as_slice()],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
    }

    async fn total_likes(&self, author: &UserId) -> Result<u64> {
        let author = *author;

        self.with_conn(move |conn| {
            let total: i64 = conn.query_row(
                "SELECT COALESCE(SUM(likes), 0) FROM tweets WHERE author = ?1",
                params![author.as_bytes().as_slice()],
                |row| row.get(0),
            )?;
            Ok(total as u64)
        })
        .await
    }

    async fn list_authors(&self) -> Result<Vec<UserId>> {
        self.with_conn(move |conn| {
            let mut stmt =
                conn.prepare("SELECT DISTINCT author FROM tweets ORDER BY author")?;

            let authors = stmt
                .query_map([], |row| row.get::<_, Vec<u8>>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            authors
                .into_iter()
                .map(|bytes| {
                    UserId::try_from(bytes.as_slice())
                        .map_err(|_| StoreError::InvalidData("author is not 32 bytes".into()))
                })
                .collect()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_store_basic() {
        let store = SqliteStore::open_memory().unwrap();
        let alice = UserId::from_bytes([1; 32]);

        let tweet = store.append_tweet(&alice, "hello", 1000).await.unwrap();
        assert_eq!(tweet.id, 0);

        let retrieved = store.get_tweet(&alice, 0).await.unwrap().unwrap();
        assert_eq!(retrieved, tweet);
        assert!(store.get_tweet(&alice, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_store_sequential_ids() {
        let store = SqliteStore::open_memory().unwrap();
        let alice = UserId::from_bytes([1; 32]);

        for i in 0..4u64 {
            let tweet = store
                .append_tweet(&alice, &format!("tweet {}", i), 1000 + i as i64)
                .await
                .unwrap();
            assert_eq!(tweet.id, i);
        }

        let timeline = store.get_timeline(&alice).await.unwrap();
        assert_eq!(timeline.len(), 4);
        for (i, tweet) in timeline.iter().enumerate() {
            assert_eq!(tweet.id, i as u64);
        }
    }

    #[tokio::test]
    async fn test_sqlite_store_like_unlike() {
        let store = SqliteStore::open_memory().unwrap();
        let alice = UserId::from_bytes([1; 32]);
        store.append_tweet(&alice, "hello", 1000).await.unwrap();

        assert_eq!(store.like_tweet(&alice, 0).await.unwrap(), 1);
        assert_eq!(store.like_tweet(&alice, 0).await.unwrap(), 2);
        assert_eq!(store.unlike_tweet(&alice, 0).await.unwrap(), 1);
        assert_eq!(store.unlike_tweet(&alice, 0).await.unwrap(), 0);

        let err = store.unlike_tweet(&alice, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::NoLikesToRemove { id: 0, .. }));

        let err = store.like_tweet(&alice, 5).await.unwrap_err();
        assert!(matches!(err, StoreError::TweetNotFound { id: 5, .. }));
    }

    #[tokio::test]
    async fn test_sqlite_store_totals() {
        let store = SqliteStore::open_memory().unwrap();
        let alice = UserId::from_bytes([1; 32]);

        assert_eq!(store.total_likes(&alice).await.unwrap(), 0);

        store.append_tweet(&alice, "a", 1000).await.unwrap();
        store.append_tweet(&alice, "b", 1001).await.unwrap();
        store.like_tweet(&alice, 0).await.unwrap();
        store.like_tweet(&alice, 1).await.unwrap();
        store.like_tweet(&alice, 1).await.unwrap();

        assert_eq!(store.total_likes(&alice).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warble.db");
        let alice = UserId::from_bytes([1; 32]);

        {
            let store = SqliteStore::open(&path).unwrap();
            store.append_tweet(&alice, "durable", 1000).await.unwrap();
            store.like_tweet(&alice, 0).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let tweet = store.get_tweet(&alice, 0).await.unwrap().unwrap();
        assert_eq!(tweet.content, "durable");
        assert_eq!(tweet.likes, 1);

        // Ids keep counting from the persisted length.
        let next = store.append_tweet(&alice, "again", 2000).await.unwrap();
        assert_eq!(next.id, 1);
    }

    #[tokio::test]
    async fn test_sqlite_store_list_authors() {
        let store = SqliteStore::open_memory().unwrap();
        let alice = UserId::from_bytes([1; 32]);
        let bob = UserId::from_bytes([2; 32]);

        store.append_tweet(&bob, "yo", 1000).await.unwrap();
        store.append_tweet(&alice, "hi", 1001).await.unwrap();
        store.append_tweet(&alice, "hi again", 1002).await.unwrap();

        assert_eq!(store.list_authors().await.unwrap(), vec![alice, bob]);
    }
}
