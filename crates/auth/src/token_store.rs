//! Durable client-side key/value storage for the bearer token.
//!
//! The token is the only shared mutable resource in the admin panel. It is
//! read once at startup and written only by login/logout/expiry, so the store
//! needs no concurrent-writer discipline beyond what SQLite already gives.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("client storage unavailable: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for TokenStoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

/// Durable key/value storage abstraction (survives reloads).
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, TokenStoreError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;
    async fn remove(&self, key: &str) -> Result<(), TokenStoreError>;
}

#[async_trait::async_trait]
impl<S> TokenStore for Arc<S>
where
    S: TokenStore + ?Sized,
{
    async fn load(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        (**self).save(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        (**self).remove(key).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry (e.g. a token left by a previous run).
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.inner.write() {
            guard.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn poisoned() -> TokenStoreError {
        TokenStoreError::Storage("memory store lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        let guard = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(guard.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        guard.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite-backed durable storage.
///
/// The pool is opened lazily on first use so constructing the store never
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    url: String,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteTokenStore {
    /// Store backed by a database file (created if missing).
    pub fn open(path: &Path) -> Self {
        Self {
            url: format!("sqlite://{}", path.to_string_lossy()),
            pool: Arc::new(Mutex::new(None)),
        }
    }

    /// Private in-memory database, mostly useful for tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            pool: Arc::new(Mutex::new(None)),
        }
    }

    async fn get_pool(&self) -> anyhow::Result<SqlitePool> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        let options = SqliteConnectOptions::from_str(&self.url)
            .with_context(|| format!("invalid client storage url {}", self.url))?
            .create_if_missing(true);

        // One connection: an in-memory database lives only as long as it does.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open client storage at {}", self.url))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS client_storage (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create client_storage table")?;

        *guard = Some(pool.clone());
        Ok(pool)
    }
}

#[async_trait::async_trait]
impl TokenStore for SqliteTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        let pool = self.get_pool().await?;
        let row = sqlx::query("SELECT value FROM client_storage WHERE key = ?1")
            .bind(key)
            .fetch_optional(&pool)
            .await
            .context("failed to read client storage")?;

        match row {
            Some(row) => {
                let value: String = row.try_get("value").context("malformed storage row")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let pool = self.get_pool().await?;
        sqlx::query(
            r#"
            INSERT INTO client_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&pool)
        .await
        .context("failed to write client storage")?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        let pool = self.get_pool().await?;
        sqlx::query("DELETE FROM client_storage WHERE key = ?1")
            .bind(key)
            .execute(&pool)
            .await
            .context("failed to clear client storage")?;
        Ok(())
    }
}
