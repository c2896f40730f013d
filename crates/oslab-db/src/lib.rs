//! Durable record store on SQLite.
//!
//! One table, `osint_data`, keyed by a unique `url`. Writes are idempotent:
//! re-ingesting a known URL is a no-op, never an overwrite.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub mod records;

pub use records::{PlatformSentimentRow, RecordRow, UpsertOutcome};

const DEFAULT_MAX_CONNECTIONS: u32 = 4;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS osint_data (
    platform  TEXT NOT NULL,
    user      TEXT,
    timestamp TEXT,
    text      TEXT NOT NULL,
    url       TEXT NOT NULL UNIQUE CHECK (url <> ''),
    sentiment REAL NOT NULL CHECK (sentiment BETWEEN -1.0 AND 1.0)
)";

const CREATE_PLATFORM_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_osint_data_platform ON osint_data (platform)";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Where the store lives and how the pool is sized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `None` selects a private in-memory database.
    pub database_path: Option<PathBuf>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl StoreConfig {
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }

    /// An in-memory store. Pinned to one connection so every query sees the
    /// same database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_path: None,
            max_connections: 1,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn from_app_config(config: &oslab_core::AppConfig) -> Self {
        Self::at_path(config.database_path.clone())
    }
}

/// Handle to the `osint_data` table.
#[derive(Debug, Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Open (creating if absent) the database described by `config`.
    ///
    /// Does not create the schema; call [`RecordStore::init`] for that, or
    /// use [`RecordStore::open_and_init`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CreateDir`] if the parent directory cannot be
    /// created, or [`DbError::Sqlx`] if the connection cannot be established.
    pub async fn open(config: &StoreConfig) -> Result<Self, DbError> {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

        let pool = match &config.database_path {
            Some(path) => {
                ensure_parent_dir(path)?;
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(BUSY_TIMEOUT);
                let pool = pool_options.connect_with(options).await?;
                tracing::debug!(path = %path.display(), "opened record store");
                pool
            }
            None => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
                pool_options
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await?
            }
        };

        Ok(Self { pool })
    }

    /// Create the table and index if they do not exist. Safe to call on every run.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if a DDL statement fails.
    pub async fn init(&self) -> Result<(), DbError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_PLATFORM_INDEX_SQL)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// [`RecordStore::open`] followed by [`RecordStore::init`].
    ///
    /// # Errors
    ///
    /// Propagates any error from either step.
    pub async fn open_and_init(config: &StoreConfig) -> Result<Self, DbError> {
        let store = Self::open(config).await?;
        store.init().await?;
        Ok(store)
    }

    /// Send a `SELECT 1` to verify the pool has a live connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), DbError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| DbError::CreateDir {
                path: parent.display().to_string(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}
