use std::env;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    // External APIs
    pub finnhub_api_key: String,
    pub anthropic_api_key: String,

    // Database
    pub database_url: String,

    // Server
    pub port: u16,

    // Spacing between successive quote fetches (upstream rate limit)
    pub quote_pace_ms: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            finnhub_api_key: env::var("FINNHUB_API_KEY").context("FINNHUB_API_KEY not set")?,
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .context("ANTHROPIC_API_KEY not set")?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:scout.db".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse()?,
            quote_pace_ms: env::var("QUOTE_PACE_MS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()?,
        })
    }
}
