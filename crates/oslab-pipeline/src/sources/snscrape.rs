//! Twitter/X scrape via the `snscrape` CLI.
//!
//! Invokes `snscrape --jsonl -n {limit} twitter-search "{query}"` as a
//! subprocess and reads one JSON object per stdout line. Unparseable lines are
//! skipped.

use std::time::Duration;

use async_trait::async_trait;
use oslab_core::{Platform, RawRecord};
use serde_json::Value;

use super::{SourceAdapter, ANONYMOUS};
use crate::error::SourceError;

const DEFAULT_PROGRAM: &str = "snscrape";

pub struct SnscrapeAdapter {
    program: String,
    timeout: Duration,
}

impl SnscrapeAdapter {
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_program(DEFAULT_PROGRAM, timeout_secs)
    }

    /// Use a different executable name or path.
    #[must_use]
    pub fn with_program(program: &str, timeout_secs: u64) -> Self {
        Self {
            program: program.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl SourceAdapter for SnscrapeAdapter {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn name(&self) -> &'static str {
        "twitter_snscrape"
    }

    async fn try_fetch(&self, query: &str, limit: u32) -> Result<Vec<RawRecord>, SourceError> {
        let limit_arg = limit.to_string();
        let child = tokio::process::Command::new(&self.program)
            .args(["--jsonl", "-n", &limit_arg, "twitter-search", query])
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                SourceError::Subprocess(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| SourceError::Subprocess(format!("{} could not be run: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::Subprocess(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut records = parse_jsonl(&stdout);
        records.truncate(limit as usize);
        Ok(records)
    }
}

/// Parse snscrape's JSON-lines output. Blank and malformed lines are skipped.
pub(crate) fn parse_jsonl(stdout: &str) -> Vec<RawRecord> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter_map(|obj| tweet_to_record(&obj))
        .collect()
}

fn tweet_to_record(obj: &Value) -> Option<RawRecord> {
    let url = obj.get("url")?.as_str()?.to_string();

    // Older snscrape releases emit `user` as a bare string.
    let user = match obj.get("user") {
        Some(Value::Object(u)) => u.get("username").and_then(Value::as_str),
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
    .unwrap_or(ANONYMOUS)
    .to_string();

    let text = ["content", "rawContent"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let timestamp = obj
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(RawRecord::new(Platform::Twitter, user, timestamp, text, url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_and_string_users() {
        let out = concat!(
            r#"{"url":"https://twitter.com/a/status/1","user":{"username":"alice"},"date":"2024-01-01T00:00:00+00:00","content":"first tweet"}"#,
            "\n",
            r#"{"url":"https://twitter.com/b/status/2","user":"bob","rawContent":"second tweet"}"#,
            "\n"
        );
        let records = parse_jsonl(out);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user, "alice");
        assert_eq!(records[0].text, "first tweet");
        assert_eq!(records[0].timestamp, "2024-01-01T00:00:00+00:00");
        assert_eq!(records[1].user, "bob");
        assert_eq!(records[1].text, "second tweet");
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let out = "\n{not json}\n{\"content\":\"no url\"}\n{\"url\":\"https://t/1\"}\n";
        let records = parse_jsonl(out);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://t/1");
        assert_eq!(records[0].user, ANONYMOUS);
        assert_eq!(records[0].text, "");
    }

    #[tokio::test]
    async fn missing_binary_fails_closed() {
        let adapter = SnscrapeAdapter::with_program("oslab-definitely-not-installed", 5);
        assert!(matches!(
            adapter.try_fetch("osint", 5).await,
            Err(SourceError::Subprocess(_))
        ));
        assert!(adapter.fetch("osint", 5).await.is_empty());
    }
}
