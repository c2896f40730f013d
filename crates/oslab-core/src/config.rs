use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Values are trimmed and an empty value counts as
/// absent, so a stray `REDDIT_SECRET=` line in `.env` reads as "not configured".
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match optional(var) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                other => Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("expected true/false, got '{other}'"),
                }),
            },
        }
    };

    let env = parse_environment(&or_default("OSLAB_ENV", "development"))?;
    let log_level = or_default("OSLAB_LOG_LEVEL", "info");
    let database_path = PathBuf::from(or_default("OSLAB_DATABASE_PATH", "./data/osint.db"));
    let sources_path = PathBuf::from(or_default("OSLAB_SOURCES_PATH", "./config/sources.yaml"));

    let http_timeout_secs = parse_u64("OSLAB_HTTP_TIMEOUT_SECS", "10")?;
    if http_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "OSLAB_HTTP_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("OSLAB_USER_AGENT", "oslab/0.1 (osint-collector)");
    let schedule_cron = or_default("OSLAB_SCHEDULE_CRON", "0 0 * * * *");
    let use_snscrape = parse_bool("USE_SNSCRAPE", false)?;

    Ok(AppConfig {
        env,
        log_level,
        database_path,
        sources_path,
        http_timeout_secs,
        user_agent,
        schedule_cron,
        use_snscrape,
        reddit_client_id: optional("REDDIT_ID"),
        reddit_client_secret: optional("REDDIT_SECRET"),
        twitter_bearer: optional("TWITTER_BEARER"),
        mastodon_access_token: optional("MASTODON_ACCESS_TOKEN"),
        mastodon_api_base_url: or_default("MASTODON_API_BASE_URL", "https://mastodon.social"),
        github_token: optional("GITHUB_TOKEN"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OSLAB_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
