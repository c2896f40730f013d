//! Source adapters.
//!
//! Every adapter implements [`SourceAdapter`]. The orchestrator only ever
//! calls [`SourceAdapter::fetch`], which cannot fail: errors from
//! [`SourceAdapter::try_fetch`] are logged and become an empty batch.

mod github;
mod hackernews;
mod helpers;
mod mastodon;
mod reddit;
mod snscrape;
mod stackoverflow;
mod twitter;

use async_trait::async_trait;
use oslab_core::{AppConfig, Platform, RawRecord, SourcePlan};

use crate::error::SourceError;

pub use github::GithubAdapter;
pub use hackernews::HackerNewsAdapter;
pub use helpers::build_http_client;
pub use mastodon::MastodonAdapter;
pub use reddit::RedditAdapter;
pub use snscrape::SnscrapeAdapter;
pub use stackoverflow::StackOverflowAdapter;
pub use twitter::TwitterApiAdapter;

/// Placeholder identity for records whose source exposes no author.
pub const ANONYMOUS: &str = "anonymous";

#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Short label used in logs, e.g. `reddit` or `twitter_snscrape`.
    fn name(&self) -> &'static str;

    /// Fetch up to `limit` records for `query`.
    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError>;

    /// Fetch, failing closed: any error is logged and yields an empty batch.
    async fn fetch(&self, query: &str, limit: u32) -> Vec<RawRecord> {
        match self.try_fetch(query, limit).await {
            Ok(records) => {
                tracing::debug!(
                    source = self.name(),
                    query,
                    count = records.len(),
                    "collected records"
                );
                records
            }
            Err(e) => {
                tracing::warn!(
                    source = self.name(),
                    query,
                    error = %e,
                    "source fetch failed; continuing without it"
                );
                Vec::new()
            }
        }
    }
}

/// One adapter invocation with its own query and limit.
pub struct SourceJob {
    pub adapter: Box<dyn SourceAdapter>,
    pub query: String,
    pub limit: u32,
}

impl SourceJob {
    pub fn new(adapter: Box<dyn SourceAdapter>, query: impl Into<String>, limit: u32) -> Self {
        Self {
            adapter,
            query: query.into(),
            limit,
        }
    }
}

impl std::fmt::Debug for SourceJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceJob")
            .field("source", &self.adapter.name())
            .field("query", &self.query)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Turn the enabled entries of `plan` into jobs, in plan order.
///
/// With `use_snscrape` set, each Twitter entry is preceded by a scraper job
/// for the same query so the scraper's results win the dedup tie-break.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the shared HTTP client cannot be built.
pub fn build_jobs(config: &AppConfig, plan: &SourcePlan) -> Result<Vec<SourceJob>, SourceError> {
    let client = build_http_client(config.http_timeout_secs, &config.user_agent)?;
    let mut jobs = Vec::new();

    for spec in plan.enabled() {
        let adapter: Box<dyn SourceAdapter> = match spec.platform {
            Platform::Reddit => Box::new(RedditAdapter::new(
                client.clone(),
                config.reddit_client_id.clone(),
                config.reddit_client_secret.clone(),
                config.user_agent.clone(),
            )),
            Platform::Twitter => {
                if config.use_snscrape {
                    jobs.push(SourceJob::new(
                        Box::new(SnscrapeAdapter::new(config.http_timeout_secs.saturating_mul(6))),
                        spec.query.clone(),
                        spec.limit,
                    ));
                }
                Box::new(TwitterApiAdapter::new(
                    client.clone(),
                    config.twitter_bearer.clone(),
                ))
            }
            Platform::Hackernews => Box::new(HackerNewsAdapter::new(client.clone())),
            Platform::Stackoverflow => Box::new(StackOverflowAdapter::new(client.clone())),
            Platform::Mastodon => Box::new(MastodonAdapter::new(
                client.clone(),
                &config.mastodon_api_base_url,
                config.mastodon_access_token.clone(),
            )),
            Platform::Github => Box::new(GithubAdapter::new(
                client.clone(),
                config.github_token.clone(),
            )),
        };
        jobs.push(SourceJob::new(adapter, spec.query.clone(), spec.limit));
    }

    Ok(jobs)
}
