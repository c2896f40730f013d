//! Ingestion pipeline for the OSINT lab collector.
//!
//! Pulls short texts from public platforms, normalizes them, keeps only
//! English text of useful length, drops in-run content duplicates, attaches a
//! lexicon sentiment score and writes the batch to the record store. Source
//! failures never abort a run; only an unavailable store does.

pub mod dedup;
pub mod error;
pub mod language;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod sources;

pub use dedup::Deduplicator;
pub use error::{PipelineError, SourceError};
pub use language::{LanguageFilter, Rejection, MIN_TEXT_CHARS};
pub use normalize::normalize;
pub use pipeline::{FilterStats, Pipeline, RunSummary};
pub use scorer::lexicon_score;
pub use sources::{build_jobs, SourceAdapter, SourceJob};
