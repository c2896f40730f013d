//! Canonical record shapes shared by every pipeline stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Source tag attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Twitter,
    Hackernews,
    Stackoverflow,
    Mastodon,
    Github,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Reddit,
        Platform::Twitter,
        Platform::Hackernews,
        Platform::Stackoverflow,
        Platform::Mastodon,
        Platform::Github,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Twitter => "twitter",
            Platform::Hackernews => "hackernews",
            Platform::Stackoverflow => "stackoverflow",
            Platform::Mastodon => "mastodon",
            Platform::Github => "github",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownPlatform(s.to_string()))
    }
}

/// A record exactly as an adapter produced it.
///
/// Ephemeral: never persisted as-is. `timestamp` is source-native and opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub platform: Platform,
    /// Source identity, or a placeholder such as `anonymous`.
    pub user: String,
    pub timestamp: String,
    pub text: String,
    /// Intended to be unique per logical item; adapters do not guarantee it.
    pub url: String,
}

impl RawRecord {
    pub fn new(
        platform: Platform,
        user: impl Into<String>,
        timestamp: impl Into<String>,
        text: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            user: user.into(),
            timestamp: timestamp.into(),
            text: text.into(),
            url: url.into(),
        }
    }
}

/// A normalized, filtered, scored record ready for the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub platform: Platform,
    pub user: String,
    pub timestamp: String,
    pub text: String,
    pub url: String,
    /// Polarity in `[-1.0, 1.0]`.
    pub sentiment: f64,
}

impl CleanedRecord {
    /// Attach a sentiment score to a record whose `text` is already normalized.
    #[must_use]
    pub fn from_raw(raw: RawRecord, sentiment: f64) -> Self {
        Self {
            platform: raw.platform,
            user: raw.user,
            timestamp: raw.timestamp,
            text: raw.text,
            url: raw.url,
            sentiment,
        }
    }
}
