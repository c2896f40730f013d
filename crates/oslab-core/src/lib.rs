//! Shared types and configuration for the OSINT lab collector.

pub mod app_config;
pub mod config;
pub mod plan;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use plan::{default_plan, load_source_plan, load_source_plan_or_default, SourcePlan, SourceSpec};
pub use records::{CleanedRecord, Platform, RawRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read source plan {path}: {source}")]
    PlanFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse source plan: {0}")]
    PlanFileParse(#[from] serde_yaml::Error),

    #[error("source plan validation failed: {0}")]
    Validation(String),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}
