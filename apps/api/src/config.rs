use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::analysis::pacing::DEFAULT_CALL_INTERVAL;
use crate::llm_client::DEFAULT_BASE_URL;

const DEFAULT_REPORT_BASENAME: &str = "gene-analysis-report";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Pause before every remote visual call.
    pub call_interval: Duration,
    /// Chromium binary for PDF capture; chromiumoxide searches the usual locations when unset.
    pub chrome_executable: Option<PathBuf>,
    pub report_basename: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let call_delay_ms = match lookup("CALL_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("CALL_DELAY_MS must be a whole number of milliseconds")?,
            None => DEFAULT_CALL_INTERVAL.as_millis() as u64,
        };

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'GEMINI_API_KEY' is not set")?,
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            call_interval: Duration::from_millis(call_delay_ms),
            chrome_executable: lookup("CHROME_EXECUTABLE").map(PathBuf::from),
            report_basename: lookup("REPORT_BASENAME")
                .unwrap_or_else(|| DEFAULT_REPORT_BASENAME.to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            call_interval: Duration::ZERO,
            chrome_executable: None,
            report_basename: DEFAULT_REPORT_BASENAME.to_string(),
        }
    }
}
