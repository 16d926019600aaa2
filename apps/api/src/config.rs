use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_DIRECTORY_BASE_URL: &str = "http://universities.hipolabs.com";
const DEFAULT_DIRECTORY_COUNTRY: &str = "India";
const DEFAULT_SUMMARY_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";
const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 4000;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub enrichment: EnrichmentConfig,
}

/// Settings for the two external lookups behind college enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    pub directory_base_url: String,
    /// Fixed country filter sent with every directory search.
    pub directory_country: String,
    pub summary_base_url: String,
    pub provider_timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            directory_base_url: DEFAULT_DIRECTORY_BASE_URL.to_string(),
            directory_country: DEFAULT_DIRECTORY_COUNTRY.to_string(),
            summary_base_url: DEFAULT_SUMMARY_BASE_URL.to_string(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            enrichment: EnrichmentConfig::from_lookup(|key| std::env::var(key).ok())?,
        })
    }
}

impl EnrichmentConfig {
    /// Builds the enrichment settings from an arbitrary key lookup, falling back
    /// to defaults for anything unset.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let timeout_ms = match lookup("PROVIDER_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_MS must be a whole number of milliseconds")?,
            None => DEFAULT_PROVIDER_TIMEOUT_MS,
        };

        Ok(Self {
            directory_base_url: lookup("DIRECTORY_BASE_URL").unwrap_or(defaults.directory_base_url),
            directory_country: lookup("DIRECTORY_COUNTRY").unwrap_or(defaults.directory_country),
            summary_base_url: lookup("SUMMARY_BASE_URL").unwrap_or(defaults.summary_base_url),
            provider_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
