//! Reddit hot-listing collector (client-credentials OAuth).

use async_trait::async_trait;
use oslab_core::{Platform, RawRecord};
use reqwest::Client;
use serde::Deserialize;

use super::helpers::{join_url, send_json};
use super::SourceAdapter;
use crate::error::SourceError;

const TOKEN_BASE_URL: &str = "https://www.reddit.com";
const API_BASE_URL: &str = "https://oauth.reddit.com";
/// Reddit caps listing pages at 100 items.
const MAX_PAGE_LIMIT: u32 = 100;
const SELFTEXT_CHARS: usize = 1_000;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
    permalink: Option<String>,
}

/// Collects hot posts from one subreddit per call; the query is the subreddit name.
pub struct RedditAdapter {
    client: Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    user_agent: String,
    token_base_url: String,
    api_base_url: String,
}

impl RedditAdapter {
    #[must_use]
    pub fn new(
        client: Client,
        client_id: Option<String>,
        client_secret: Option<String>,
        user_agent: String,
    ) -> Self {
        Self::with_base_urls(
            client,
            client_id,
            client_secret,
            user_agent,
            TOKEN_BASE_URL,
            API_BASE_URL,
        )
    }

    /// Point token exchange and listing calls at custom hosts (for wiremock).
    #[must_use]
    pub fn with_base_urls(
        client: Client,
        client_id: Option<String>,
        client_secret: Option<String>,
        user_agent: String,
        token_base_url: &str,
        api_base_url: &str,
    ) -> Self {
        Self {
            client,
            client_id,
            client_secret,
            user_agent,
            token_base_url: token_base_url.to_string(),
            api_base_url: api_base_url.to_string(),
        }
    }

    async fn fetch_token(&self, client_id: &str, client_secret: &str) -> Result<String, SourceError> {
        let request = self
            .client
            .post(join_url(&self.token_base_url, "api/v1/access_token"))
            .header("User-Agent", &self.user_agent)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")]);

        let token: TokenResponse = send_json(request, "reddit").await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl SourceAdapter for RedditAdapter {
    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn name(&self) -> &'static str {
        "reddit"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(SourceError::MissingCredentials("REDDIT_ID and REDDIT_SECRET"));
        };

        let token = self.fetch_token(client_id, client_secret).await?;

        let subreddit = query.trim().trim_start_matches("r/");
        let request = self
            .client
            .get(join_url(&self.api_base_url, &format!("r/{subreddit}/hot")))
            .bearer_auth(&token)
            .header("User-Agent", &self.user_agent)
            .query(&[
                ("limit", limit.min(MAX_PAGE_LIMIT).to_string()),
                ("raw_json", "1".to_string()),
            ]);

        let listing: Listing = send_json(request, "reddit").await?;

        let records = listing
            .data
            .children
            .into_iter()
            .filter_map(to_record)
            .take(limit as usize)
            .collect();

        Ok(records)
    }
}

fn to_record(post: Post) -> Option<RawRecord> {
    let data = post.data;
    let permalink = data.permalink?;

    let title = data.title.unwrap_or_default();
    let text = match data.selftext.as_deref().map(str::trim) {
        Some(body) if !body.is_empty() && body != "[deleted]" && body != "[removed]" => {
            let snippet: String = body.chars().take(SELFTEXT_CHARS).collect();
            format!("{title} {snippet}")
        }
        _ => title,
    };

    let timestamp = data
        .created_utc
        .map(|ts| format!("{ts}"))
        .unwrap_or_default();

    Some(RawRecord::new(
        Platform::Reddit,
        data.author.unwrap_or_else(|| "[deleted]".to_string()),
        timestamp,
        text,
        format!("https://reddit.com{permalink}"),
    ))
}
