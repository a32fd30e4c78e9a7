use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub perplexity_api_key: String,
    /// Logo lookups are skipped entirely when unset.
    pub brandfetch_api_key: Option<String>,
    /// When set, the Brandfetch call gate is shared across instances through Redis.
    pub redis_url: Option<String>,
    pub brandfetch_min_interval_ms: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            perplexity_api_key: require_env("PERPLEXITY_API_KEY")?,
            brandfetch_api_key: optional_env("BRANDFETCH_API_KEY"),
            redis_url: optional_env("REDIS_URL"),
            brandfetch_min_interval_ms: std::env::var("BRANDFETCH_MIN_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse::<u64>()
                .context("BRANDFETCH_MIN_INTERVAL_MS must be a whole number of milliseconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
