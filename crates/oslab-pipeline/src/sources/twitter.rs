//! Twitter/X recent-search collector (API v2, bearer token).
//!
//! One attempt per run: a 429 is reported as [`SourceError::RateLimited`]
//! rather than waited out, so a throttled token never stalls the pipeline.
//! The API's page-size floor is 10; results are cut back to the caller's limit.

use async_trait::async_trait;
use oslab_core::{Platform, RawRecord};
use reqwest::Client;
use serde::Deserialize;

use super::helpers::{join_url, send_json};
use super::{SourceAdapter, ANONYMOUS};
use crate::error::SourceError;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
const MIN_RESULTS: u32 = 10;
const MAX_RESULTS: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<String>,
}

pub struct TwitterApiAdapter {
    client: Client,
    bearer: Option<String>,
    base_url: String,
}

impl TwitterApiAdapter {
    #[must_use]
    pub fn new(client: Client, bearer: Option<String>) -> Self {
        Self::with_base_url(client, bearer, DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(client: Client, bearer: Option<String>, base_url: &str) -> Self {
        Self {
            client,
            bearer,
            base_url: base_url.to_string(),
        }
    }
}

/// The recent-search endpoint only accepts `max_results` in `10..=100`.
fn clamp_max_results(limit: u32) -> u32 {
    limit.clamp(MIN_RESULTS, MAX_RESULTS)
}

#[async_trait]
impl SourceAdapter for TwitterApiAdapter {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn name(&self) -> &'static str {
        "twitter"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let Some(bearer) = &self.bearer else {
            return Err(SourceError::MissingCredentials("TWITTER_BEARER"));
        };

        let request = self
            .client
            .get(join_url(&self.base_url, "2/tweets/search/recent"))
            .bearer_auth(bearer)
            .query(&[
                ("query", query.to_string()),
                ("max_results", clamp_max_results(limit).to_string()),
                ("tweet.fields", "created_at,lang,author_id".to_string()),
            ]);

        let response: SearchResponse = send_json(request, "twitter").await?;

        let records = response
            .data
            .into_iter()
            .map(|tweet| {
                let url = format!("https://twitter.com/i/web/status/{}", tweet.id);
                RawRecord::new(
                    Platform::Twitter,
                    tweet.author_id.unwrap_or_else(|| ANONYMOUS.to_string()),
                    tweet.created_at.unwrap_or_default(),
                    tweet.text,
                    url,
                )
            })
            .take(limit as usize)
            .collect();

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_results_is_clamped() {
        assert_eq!(clamp_max_results(1), 10);
        assert_eq!(clamp_max_results(50), 50);
        assert_eq!(clamp_max_results(500), 100);
    }

    #[test]
    fn empty_search_has_no_data_field() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(response.data.is_empty());
    }
}
