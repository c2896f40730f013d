//! Recurring pipeline runs.
//!
//! Runs once at startup, then on `OSLAB_SCHEDULE_CRON` until Ctrl-C. A run
//! that is still in progress when the next tick fires causes that tick to be
//! skipped; the store has a single writer.

use std::sync::Arc;

use oslab_core::AppConfig;
use oslab_db::StoreConfig;
use oslab_pipeline::Pipeline;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::run::{build_pipeline, describe};

/// # Errors
///
/// Returns an error if the pipeline or scheduler cannot be built, the cron
/// expression is invalid, or the first run finds the store unavailable.
pub(crate) async fn run_scheduled(config: AppConfig) -> anyhow::Result<()> {
    let pipeline = Arc::new(build_pipeline(&config)?);
    let store_config = Arc::new(StoreConfig::from_app_config(&config));
    let running = Arc::new(Mutex::new(()));

    // The first run is fatal on store failure, like `oslab run`.
    let summary = pipeline.run(&store_config).await?;
    println!("{}", describe(&summary));

    let mut scheduler = JobScheduler::new().await?;
    let job = {
        let pipeline = Arc::clone(&pipeline);
        let store_config = Arc::clone(&store_config);
        let running = Arc::clone(&running);
        Job::new_async(config.schedule_cron.as_str(), move |_uuid, _lock| {
            let pipeline = Arc::clone(&pipeline);
            let store_config = Arc::clone(&store_config);
            let running = Arc::clone(&running);
            Box::pin(async move {
                scheduled_tick(&pipeline, &store_config, &running).await;
            })
        })?
    };
    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(cron = %config.schedule_cron, "scheduler started; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("received shutdown signal, stopping scheduler");

    scheduler.shutdown().await?;
    Ok(())
}

async fn scheduled_tick(pipeline: &Pipeline, store_config: &StoreConfig, running: &Mutex<()>) {
    let Ok(_guard) = running.try_lock() else {
        tracing::warn!("scheduler: previous run still in progress; skipping this tick");
        return;
    };

    tracing::info!("scheduler: starting pipeline run");
    match pipeline.run(store_config).await {
        Ok(summary) => {
            tracing::info!(inserted = summary.inserted, "scheduler: pipeline run complete");
        }
        Err(e) => tracing::error!(error = %e, "scheduler: pipeline run aborted"),
    }
}
