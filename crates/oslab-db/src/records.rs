//! Writes and read-only queries for the `osint_data` table.

use oslab_core::{CleanedRecord, Platform};

use crate::{DbError, RecordStore};

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `osint_data` table. `id` is the SQLite rowid.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecordRow {
    pub id: i64,
    pub platform: String,
    pub user: Option<String>,
    pub timestamp: Option<String>,
    pub text: String,
    pub url: String,
    pub sentiment: f64,
}

/// Mean sentiment for one platform.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlatformSentimentRow {
    pub platform: String,
    pub record_count: i64,
    pub avg_sentiment: f64,
}

/// Only a `url` conflict is ignored. CHECK and NOT NULL violations still
/// fail the statement so they can be told apart from known URLs.
const INSERT_SQL: &str = "INSERT INTO osint_data \
     (platform, user, timestamp, text, url, sentiment) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
     ON CONFLICT (url) DO NOTHING";

/// Per-row result counts for one [`RecordStore::upsert_batch_outcome`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Rows newly written.
    pub inserted: u64,
    /// Rows whose `url` was already stored (or repeated earlier in the batch).
    pub already_stored: u64,
    /// Rows the database refused, e.g. an empty `url` or a score outside `[-1, 1]`.
    pub rejected: u64,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

impl RecordStore {
    /// Insert every record whose `url` is not already stored and return the
    /// number of rows newly inserted.
    ///
    /// See [`RecordStore::upsert_batch_outcome`] for the per-row rules.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] only if the transaction cannot be opened or
    /// committed.
    pub async fn upsert_batch(&self, records: &[CleanedRecord]) -> Result<u64, DbError> {
        Ok(self.upsert_batch_outcome(records).await?.inserted)
    }

    /// Insert a batch in one transaction and report what happened to each row.
    ///
    /// Known URLs are skipped without touching the existing row. A row the
    /// database refuses is logged at `warn` and skipped; the remaining rows
    /// still commit.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] only if the transaction cannot be opened or
    /// committed.
    pub async fn upsert_batch_outcome(
        &self,
        records: &[CleanedRecord],
    ) -> Result<UpsertOutcome, DbError> {
        let mut tx = self.pool.begin().await?;
        let mut outcome = UpsertOutcome::default();

        for record in records {
            let result = sqlx::query(INSERT_SQL)
                .bind(record.platform.as_str())
                .bind(&record.user)
                .bind(&record.timestamp)
                .bind(&record.text)
                .bind(&record.url)
                .bind(record.sentiment)
                .execute(&mut *tx)
                .await;

            match result {
                Ok(done) if done.rows_affected() == 1 => outcome.inserted += 1,
                Ok(_) => {
                    tracing::debug!(url = %record.url, "url already stored; skipping");
                    outcome.already_stored += 1;
                }
                Err(e) => {
                    tracing::warn!(url = %record.url, error = %e, "skipping record that failed to insert");
                    outcome.rejected += 1;
                }
            }
        }

        tx.commit().await?;

        tracing::debug!(
            batch = records.len(),
            inserted = outcome.inserted,
            already_stored = outcome.already_stored,
            rejected = outcome.rejected,
            "upsert batch committed"
        );
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

impl RecordStore {
    /// Total number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn count_records(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM osint_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Most recently inserted records, optionally filtered by platform.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_records(
        &self,
        platform: Option<Platform>,
        limit: i64,
    ) -> Result<Vec<RecordRow>, DbError> {
        let rows = match platform {
            Some(p) => {
                sqlx::query_as::<_, RecordRow>(
                    "SELECT rowid AS id, platform, user, timestamp, text, url, sentiment \
                     FROM osint_data \
                     WHERE platform = ?1 \
                     ORDER BY rowid DESC \
                     LIMIT ?2",
                )
                .bind(p.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, RecordRow>(
                    "SELECT rowid AS id, platform, user, timestamp, text, url, sentiment \
                     FROM osint_data \
                     ORDER BY rowid DESC \
                     LIMIT ?1",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Mean sentiment per platform, lowest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn sentiment_by_platform(&self) -> Result<Vec<PlatformSentimentRow>, DbError> {
        let rows = sqlx::query_as::<_, PlatformSentimentRow>(
            "SELECT platform, COUNT(*) AS record_count, AVG(sentiment) AS avg_sentiment \
             FROM osint_data \
             GROUP BY platform \
             ORDER BY avg_sentiment ASC, platform ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Stored texts, optionally filtered by platform.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn list_texts(&self, platform: Option<Platform>) -> Result<Vec<String>, DbError> {
        let texts = match platform {
            Some(p) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT text FROM osint_data WHERE platform = ?1 ORDER BY rowid",
                )
                .bind(p.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, String>("SELECT text FROM osint_data ORDER BY rowid")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(texts)
    }
}
