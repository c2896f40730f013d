//! Pipeline orchestration.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use oslab_core::{CleanedRecord, RawRecord};
use oslab_db::{RecordStore, StoreConfig};

use crate::dedup::Deduplicator;
use crate::error::PipelineError;
use crate::language::{LanguageFilter, Rejection};
use crate::normalize::normalize;
use crate::scorer::lexicon_score;
use crate::sources::SourceJob;

/// Why records were dropped between collection and scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub empty: usize,
    pub too_short: usize,
    pub not_english: usize,
    pub duplicate: usize,
}

impl FilterStats {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.empty + self.too_short + self.not_english + self.duplicate
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Raw records returned by all sources.
    pub collected: usize,
    /// Records that survived normalization, filtering and dedup.
    pub accepted: usize,
    /// Records newly written to the store.
    pub inserted: u64,
    pub filter: FilterStats,
}

/// One configured ingestion run: an ordered list of source jobs plus the
/// language model shared by every record in the run.
pub struct Pipeline {
    jobs: Vec<SourceJob>,
    filter: LanguageFilter,
}

impl Pipeline {
    #[must_use]
    pub fn new(jobs: Vec<SourceJob>) -> Self {
        Self {
            jobs,
            filter: LanguageFilter::new(),
        }
    }

    /// Invoke every job in order and concatenate the results.
    ///
    /// Jobs run one at a time. A job that panics is logged and contributes
    /// nothing; the remaining jobs still run.
    pub async fn collect(&self) -> Vec<RawRecord> {
        let mut records = Vec::new();

        for job in &self.jobs {
            let fetch = job.adapter.fetch(&job.query, job.limit);
            match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(batch) => records.extend(batch),
                Err(_) => {
                    tracing::error!(
                        platform = %job.adapter.platform(),
                        source = job.adapter.name(),
                        query = %job.query,
                        "source panicked; continuing without it"
                    );
                }
            }
        }

        records
    }

    /// Normalize every record's text, then drop empty, short, non-English and
    /// duplicate entries. Survivors keep their collection order.
    pub fn normalize_and_filter(&self, raw: Vec<RawRecord>) -> (Vec<RawRecord>, FilterStats) {
        let mut stats = FilterStats::default();
        let mut dedup = Deduplicator::new();
        let mut kept = Vec::with_capacity(raw.len());

        for mut record in raw {
            record.text = normalize(&record.text);

            match self.filter.check(&record.text) {
                Ok(()) => {}
                Err(Rejection::Empty) => {
                    stats.empty += 1;
                    continue;
                }
                Err(Rejection::TooShort) => {
                    stats.too_short += 1;
                    continue;
                }
                Err(Rejection::NotEnglish) => {
                    stats.not_english += 1;
                    continue;
                }
            }

            if !dedup.admit(&record.text) {
                tracing::debug!(url = %record.url, "duplicate text dropped");
                stats.duplicate += 1;
                continue;
            }

            kept.push(record);
        }

        tracing::debug!(
            kept = kept.len(),
            empty = stats.empty,
            too_short = stats.too_short,
            not_english = stats.not_english,
            duplicate = stats.duplicate,
            "filter stage complete"
        );

        (kept, stats)
    }

    /// Attach a lexicon polarity to each record.
    #[must_use]
    pub fn score(records: Vec<RawRecord>) -> Vec<CleanedRecord> {
        records
            .into_iter()
            .map(|raw| {
                let sentiment = lexicon_score(&raw.text);
                CleanedRecord::from_raw(raw, sentiment)
            })
            .collect()
    }

    /// Write the batch. A store failure here is logged and counts as zero
    /// inserts; only opening the store is fatal.
    pub async fn persist(store: &RecordStore, records: &[CleanedRecord]) -> u64 {
        if records.is_empty() {
            return 0;
        }
        match store.upsert_batch(records).await {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::error!(error = %e, count = records.len(), "batch write failed");
                0
            }
        }
    }

    /// Open and initialize the store, then run every stage against it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Store`] if the store cannot be opened or its
    /// schema cannot be created. No source is contacted in that case.
    pub async fn run(&self, store_config: &StoreConfig) -> Result<RunSummary, PipelineError> {
        let store = RecordStore::open_and_init(store_config).await?;
        let summary = self.run_with_store(&store).await;
        store.close().await;
        Ok(summary)
    }

    /// Run every stage against an already-initialized store.
    pub async fn run_with_store(&self, store: &RecordStore) -> RunSummary {
        let raw = self.collect().await;
        let collected = raw.len();

        let (accepted, filter) = self.normalize_and_filter(raw);
        let scored = Self::score(accepted);
        let inserted = Self::persist(store, &scored).await;

        let summary = RunSummary {
            collected,
            accepted: scored.len(),
            inserted,
            filter,
        };

        tracing::info!(
            collected = summary.collected,
            accepted = summary.accepted,
            dropped = summary.filter.dropped(),
            inserted = summary.inserted,
            "pipeline run complete"
        );

        summary
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("jobs", &self.jobs).finish()
    }
}
