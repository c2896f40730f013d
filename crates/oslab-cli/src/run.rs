//! One-shot pipeline run.

use oslab_core::AppConfig;
use oslab_db::StoreConfig;
use oslab_pipeline::{build_jobs, Pipeline, RunSummary};

/// Build the pipeline from the configured source plan.
///
/// A missing plan file falls back to the built-in default plan.
///
/// # Errors
///
/// Returns an error if the plan file exists but is invalid, or the HTTP
/// client cannot be built.
pub(crate) fn build_pipeline(config: &AppConfig) -> anyhow::Result<Pipeline> {
    let plan = oslab_core::load_source_plan_or_default(&config.sources_path)?;
    let jobs = build_jobs(config, &plan)?;
    tracing::info!(
        jobs = jobs.len(),
        plan = %config.sources_path.display(),
        "pipeline configured"
    );
    Ok(Pipeline::new(jobs))
}

/// Run every stage once and print the outcome.
///
/// # Errors
///
/// Returns an error if the pipeline cannot be built or the record store is
/// unavailable.
pub(crate) async fn run_once(config: &AppConfig) -> anyhow::Result<RunSummary> {
    let pipeline = build_pipeline(config)?;
    let summary = pipeline.run(&StoreConfig::from_app_config(config)).await?;
    println!("{}", describe(&summary));
    Ok(summary)
}

pub(crate) fn describe(summary: &RunSummary) -> String {
    format!(
        "collected {} | kept {} | dropped {} (empty {}, short {}, non-english {}, duplicate {}) | inserted {}",
        summary.collected,
        summary.accepted,
        summary.filter.dropped(),
        summary.filter.empty,
        summary.filter.too_short,
        summary.filter.not_english,
        summary.filter.duplicate,
        summary.inserted,
    )
}
