use anyhow::{Context, Result};

/// Upper bound on how many raw postings a single search may pull from Adzuna.
pub const MAX_FETCH_LIMIT: usize = 500;

/// Application configuration loaded from environment variables.
///
/// Credentials are optional here: a search request may carry its own, and
/// these act as the defaults for requests that omit them.
#[derive(Debug, Clone)]
pub struct Config {
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_base_url: String,
    pub adzuna_country: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Raw postings requested per search, before filtering.
    pub fetch_limit: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let fetch_limit = std::env::var("SCOUT_FETCH_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<usize>()
            .context("SCOUT_FETCH_LIMIT must be a positive integer")?
            .clamp(1, MAX_FETCH_LIMIT);

        Ok(Config {
            adzuna_app_id: optional_env("ADZUNA_APP_ID"),
            adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
            adzuna_base_url: env_or("ADZUNA_BASE_URL", "https://api.adzuna.com"),
            adzuna_country: env_or("ADZUNA_COUNTRY", "us"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
            openai_model: env_or("OPENAI_MODEL", "gpt-3.5-turbo"),
            fetch_limit,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
