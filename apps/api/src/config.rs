use anyhow::{Context, Result};

/// Default base URL of the hosted completion endpoint.
pub const DEFAULT_SONAR_BASE_URL: &str = "https://api.perplexity.ai";

/// Application configuration loaded from environment variables.
/// Every variable has a default; the per-user Perplexity API key is supplied
/// with each request, never via the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Sonar chat-completions endpoint. Overridable so tests
    /// can point the client at a local stub server.
    pub sonar_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            sonar_base_url: std::env::var("SONAR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SONAR_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
