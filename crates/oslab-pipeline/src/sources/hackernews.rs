//! Hacker News story search through the public Algolia API.

use async_trait::async_trait;
use oslab_core::{Platform, RawRecord};
use reqwest::Client;
use serde::Deserialize;

use super::helpers::{join_url, send_json};
use super::{SourceAdapter, ANONYMOUS};
use crate::error::SourceError;

const DEFAULT_BASE_URL: &str = "https://hn.algolia.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: String,
    author: Option<String>,
    created_at: Option<String>,
    title: Option<String>,
}

pub struct HackerNewsAdapter {
    client: Client,
    base_url: String,
}

impl HackerNewsAdapter {
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

#[async_trait]
impl SourceAdapter for HackerNewsAdapter {
    fn platform(&self) -> Platform {
        Platform::Hackernews
    }

    fn name(&self) -> &'static str {
        "hackernews"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let request = self
            .client
            .get(join_url(&self.base_url, "api/v1/search"))
            .query(&[
                ("query", query.to_string()),
                ("tags", "story".to_string()),
                ("hitsPerPage", limit.to_string()),
            ]);

        let response: SearchResponse = send_json(request, "hackernews").await?;

        Ok(response
            .hits
            .into_iter()
            .map(|hit| {
                RawRecord::new(
                    Platform::Hackernews,
                    hit.author.unwrap_or_else(|| ANONYMOUS.to_string()),
                    hit.created_at.unwrap_or_default(),
                    hit.title.unwrap_or_default(),
                    format!("https://news.ycombinator.com/item?id={}", hit.object_id),
                )
            })
            .take(limit as usize)
            .collect())
    }
}
