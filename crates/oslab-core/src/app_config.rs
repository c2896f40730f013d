use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub database_path: PathBuf,
    pub sources_path: PathBuf,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub schedule_cron: String,
    pub use_snscrape: bool,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub twitter_bearer: Option<String>,
    pub mastodon_access_token: Option<String>,
    pub mastodon_api_base_url: String,
    pub github_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_path", &self.database_path)
            .field("sources_path", &self.sources_path)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("schedule_cron", &self.schedule_cron)
            .field("use_snscrape", &self.use_snscrape)
            .field("reddit_client_id", &redact(&self.reddit_client_id))
            .field("reddit_client_secret", &redact(&self.reddit_client_secret))
            .field("twitter_bearer", &redact(&self.twitter_bearer))
            .field(
                "mastodon_access_token",
                &redact(&self.mastodon_access_token),
            )
            .field("mastodon_api_base_url", &self.mastodon_api_base_url)
            .field("github_token", &redact(&self.github_token))
            .finish()
    }
}
