//! GitHub repository search. Each repository description is one record.

use async_trait::async_trait;
use oslab_core::{Platform, RawRecord};
use reqwest::Client;
use serde::Deserialize;

use super::helpers::{join_url, send_json};
use super::{SourceAdapter, ANONYMOUS};
use crate::error::SourceError;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    owner: Option<Owner>,
    created_at: Option<String>,
    description: Option<String>,
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: Option<String>,
}

pub struct GithubAdapter {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl GithubAdapter {
    #[must_use]
    pub fn new(client: Client, token: Option<String>) -> Self {
        Self::with_base_url(client, token, DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(client: Client, token: Option<String>, base_url: &str) -> Self {
        Self {
            client,
            token,
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl SourceAdapter for GithubAdapter {
    fn platform(&self) -> Platform {
        Platform::Github
    }

    fn name(&self) -> &'static str {
        "github"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let mut request = self
            .client
            .get(join_url(&self.base_url, "search/repositories"))
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", query.to_string()),
                ("per_page", limit.min(MAX_PER_PAGE).to_string()),
            ]);

        match &self.token {
            Some(token) => request = request.bearer_auth(token),
            None => tracing::debug!("GITHUB_TOKEN not set; using unauthenticated search quota"),
        }

        let response: SearchResponse = send_json(request, "github").await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|repo| {
                let url = repo.html_url?;
                Some(RawRecord::new(
                    Platform::Github,
                    repo.owner
                        .and_then(|o| o.login)
                        .unwrap_or_else(|| ANONYMOUS.to_string()),
                    repo.created_at.unwrap_or_default(),
                    repo.description.unwrap_or_default(),
                    url,
                ))
            })
            .take(limit as usize)
            .collect())
    }
}
