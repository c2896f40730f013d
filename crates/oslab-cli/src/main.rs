mod report;
mod run;
mod schedule;

use clap::{Parser, Subcommand};
use oslab_core::{Environment, Platform};
use oslab_db::{RecordStore, StoreConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "oslab")]
#[command(about = "Collect, score and store public OSINT text")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the ingestion pipeline once
    Run,
    /// Run once now, then on the configured cron schedule until Ctrl-C
    Schedule,
    /// Summarize stored sentiment per platform and the most frequent words
    Report {
        /// Restrict the word ranking to one platform
        #[arg(long)]
        platform: Option<String>,

        /// Number of words to show
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Record store maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Create the database file and schema if absent
    Init,
    /// Print row counts per platform
    Stats,
}

/// ANSI colors in log output only when running under `OSLAB_ENV=development`.
fn use_ansi(env: &Environment) -> bool {
    matches!(env, Environment::Development)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = oslab_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(use_ansi(&config.env))
        .init();
    tracing::info!(env = %config.env, db = %config.database_path.display(), "oslab starting");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Run) | None => {
            run::run_once(&config).await?;
        }
        Some(Commands::Schedule) => schedule::run_scheduled(config).await?,
        Some(Commands::Report { platform, top }) => {
            let platform: Option<Platform> = platform.as_deref().map(str::parse).transpose()?;
            let store = RecordStore::open_and_init(&StoreConfig::from_app_config(&config)).await?;
            report::print_report(&store, platform, top).await?;
            store.close().await;
        }
        Some(Commands::Db { command }) => {
            let store = RecordStore::open_and_init(&StoreConfig::from_app_config(&config)).await?;
            match command {
                DbCommands::Init => {
                    println!("record store ready at {}", config.database_path.display());
                }
                DbCommands::Stats => report::print_stats(&store).await?,
            }
            store.close().await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
