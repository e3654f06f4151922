use anyhow::{Context, Result};

use crate::diagnosis::Language;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// When unset, wizard completions are serialized in-process only.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Language used when a user has no stored preference.
    pub default_language: Language,
    pub db_max_connections: u32,
    pub completion_lock_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: optional_env("REDIS_URL"),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_language: optional_env("DEFAULT_LANGUAGE")
                .map(|code| Language::from_code(&code))
                .unwrap_or_default(),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            completion_lock_ttl_secs: parse_env("COMPLETION_LOCK_TTL_SECS", 30)
                .context("COMPLETION_LOCK_TTL_SECS must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
