//! Stack Overflow question search (Stack Exchange API 2.3, anonymous quota).

use async_trait::async_trait;
use chrono::DateTime;
use oslab_core::{Platform, RawRecord};
use reqwest::Client;
use serde::Deserialize;

use super::helpers::{decode_entities, join_url, send_json};
use super::{SourceAdapter, ANONYMOUS};
use crate::error::SourceError;

const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com";
/// Below this many remaining calls the daily anonymous quota is nearly spent.
const LOW_QUOTA: i64 = 50;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Question>,
    quota_remaining: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Question {
    owner: Option<Owner>,
    creation_date: Option<i64>,
    title: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    display_name: Option<String>,
}

pub struct StackOverflowAdapter {
    client: Client,
    base_url: String,
}

impl StackOverflowAdapter {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }
}

fn format_epoch(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[async_trait]
impl SourceAdapter for StackOverflowAdapter {
    fn platform(&self) -> Platform {
        Platform::Stackoverflow
    }

    fn name(&self) -> &'static str {
        "stackoverflow"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let request = self
            .client
            .get(join_url(&self.base_url, "2.3/search"))
            .query(&[
                ("order", "desc".to_string()),
                ("sort", "activity".to_string()),
                ("intitle", query.to_string()),
                ("site", "stackoverflow".to_string()),
                ("pagesize", limit.to_string()),
                ("filter", "default".to_string()),
            ]);

        let response: SearchResponse = send_json(request, "stackoverflow").await?;

        if let Some(remaining) = response.quota_remaining {
            if remaining < LOW_QUOTA {
                tracing::warn!(quota_remaining = remaining, "stack exchange quota running low");
            }
        }

        Ok(response
            .items
            .into_iter()
            .filter_map(|q| {
                let link = q.link?;
                Some(RawRecord::new(
                    Platform::Stackoverflow,
                    q.owner
                        .and_then(|o| o.display_name)
                        .unwrap_or_else(|| ANONYMOUS.to_string()),
                    q.creation_date.map(format_epoch).unwrap_or_default(),
                    decode_entities(q.title.as_deref().unwrap_or_default()),
                    link,
                ))
            })
            .take(limit as usize)
            .collect())
    }
}
