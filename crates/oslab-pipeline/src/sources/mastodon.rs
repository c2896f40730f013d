//! Mastodon hashtag timeline, falling back to the public timeline when the
//! tag yields nothing.

use async_trait::async_trait;
use oslab_core::{Platform, RawRecord};
use reqwest::Client;
use serde::Deserialize;

use super::helpers::{join_url, send_json, strip_html};
use super::{SourceAdapter, ANONYMOUS};
use crate::error::SourceError;

/// Mastodon caps timeline pages at 40 statuses.
const MAX_PAGE_LIMIT: u32 = 40;

#[derive(Debug, Deserialize)]
struct Status {
    content: Option<String>,
    account: Option<Account>,
    created_at: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Account {
    username: Option<String>,
}

pub struct MastodonAdapter {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl MastodonAdapter {
    #[must_use]
    pub fn new(client: Client, base_url: &str, access_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            access_token,
        }
    }

    async fn timeline(&self, path: &str, limit: u32) -> Result<Vec<Status>, SourceError> {
        let mut request = self
            .client
            .get(join_url(&self.base_url, path))
            .query(&[("limit", limit.min(MAX_PAGE_LIMIT).to_string())]);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        send_json(request, "mastodon").await
    }
}

#[async_trait]
impl SourceAdapter for MastodonAdapter {
    fn platform(&self) -> Platform {
        Platform::Mastodon
    }

    fn name(&self) -> &'static str {
        "mastodon"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let tag = query.trim().trim_start_matches('#');
        let tagged = self
            .timeline(&format!("api/v1/timelines/tag/{tag}"), limit)
            .await;

        let statuses = match tagged {
            Ok(statuses) if !statuses.is_empty() => statuses,
            Ok(_) => {
                tracing::debug!(tag, "hashtag timeline empty; using public timeline");
                self.timeline("api/v1/timelines/public", limit).await?
            }
            Err(e) => {
                tracing::debug!(tag, error = %e, "hashtag timeline failed; using public timeline");
                self.timeline("api/v1/timelines/public", limit).await?
            }
        };

        Ok(statuses
            .into_iter()
            .filter_map(to_record)
            .take(limit as usize)
            .collect())
    }
}

fn to_record(status: Status) -> Option<RawRecord> {
    let url = status.url?;
    Some(RawRecord::new(
        Platform::Mastodon,
        status
            .account
            .and_then(|a| a.username)
            .unwrap_or_else(|| ANONYMOUS.to_string()),
        status.created_at.unwrap_or_default(),
        strip_html(status.content.as_deref().unwrap_or_default()),
        url,
    ))
}
