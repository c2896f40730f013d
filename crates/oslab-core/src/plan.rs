//! The ordered list of source invocations for one pipeline run.
//!
//! Entry order is collection order, which is also the dedup tie-break: the
//! first source to produce a given normalized text keeps it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::Platform;
use crate::ConfigError;

const MAX_LIMIT: u32 = 500;

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub platform: Platform,
    /// Search string, subreddit, or hashtag depending on the platform.
    pub query: String,
    pub limit: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl SourceSpec {
    #[must_use]
    pub fn new(platform: Platform, query: &str, limit: u32) -> Self {
        Self {
            platform,
            query: query.to_string(),
            limit,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePlan {
    pub sources: Vec<SourceSpec>,
}

impl SourcePlan {
    /// Enabled entries in collection order.
    pub fn enabled(&self) -> impl Iterator<Item = &SourceSpec> {
        self.sources.iter().filter(|s| s.enabled)
    }
}

/// The plan used when no sources file exists.
#[must_use]
pub fn default_plan() -> SourcePlan {
    SourcePlan {
        sources: vec![
            SourceSpec::new(Platform::Twitter, "AI", 10),
            SourceSpec::new(Platform::Reddit, "technology", 50),
            SourceSpec::new(Platform::Reddit, "cybersecurity", 30),
            SourceSpec::new(Platform::Reddit, "privacy", 20),
            SourceSpec::new(Platform::Hackernews, "osint", 5),
            SourceSpec::new(Platform::Stackoverflow, "osint", 5),
        ],
    }
}

/// Load and validate a source plan from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_source_plan(path: &Path) -> Result<SourcePlan, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PlanFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let plan: SourcePlan = serde_yaml::from_str(&content)?;
    validate_plan(&plan)?;
    Ok(plan)
}

/// Like [`load_source_plan`], but falls back to [`default_plan`] when `path`
/// does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but is unreadable or invalid.
pub fn load_source_plan_or_default(path: &Path) -> Result<SourcePlan, ConfigError> {
    if path.exists() {
        load_source_plan(path)
    } else {
        Ok(default_plan())
    }
}

fn validate_plan(plan: &SourcePlan) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for spec in &plan.sources {
        if spec.query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} source has an empty query",
                spec.platform
            )));
        }

        if spec.limit == 0 || spec.limit > MAX_LIMIT {
            return Err(ConfigError::Validation(format!(
                "{} source '{}' has invalid limit {}; must be 1..={MAX_LIMIT}",
                spec.platform, spec.query, spec.limit
            )));
        }

        if !seen.insert((spec.platform, spec.query.trim().to_lowercase())) {
            return Err(ConfigError::Validation(format!(
                "duplicate source: {} '{}'",
                spec.platform, spec.query
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
