//! Scraper settings.
//!
//! Values come from built-in defaults, optionally replaced by a YAML file
//! (`--config`) and finally by individual command-line flags.
//!
//! ```yaml
//! base_url: https://bible.usccb.org/bible/readings
//! timeout_secs: 30
//! user_agent: LiturgyReadings/0.1.0
//! retry:
//!   max_attempts: 3
//!   backoff_factor: 2.0
//! ```

use crate::error::{Result, ScraperError};
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://bible.usccb.org/bible/readings";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings owned by a [`UsccbScraper`](crate::scrapers::usccb::UsccbScraper).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Directory URL the `MMDDYY.cfm` pages live under.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Sent as the `User-Agent` header on every request.
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            retry: RetryPolicy::default(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("LiturgyReadings/{}", env!("CARGO_PKG_VERSION"))
}

impl ScraperConfig {
    /// Load settings from a YAML file; missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScraperError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&raw)?;
        info!(base_url = %config.base_url, "Loaded scraper configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)
            .map_err(|e| ScraperError::configuration(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every fetch fail.
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            ScraperError::configuration(format!("base_url {:?} is not a URL: {e}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::configuration(format!(
                "base_url must use http or https, got {:?}",
                parsed.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScraperError::configuration("timeout_secs must be positive"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScraperError::configuration("user_agent cannot be empty"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ScraperError::configuration("retry.max_attempts must be at least 1"));
        }
        if !self.retry.backoff_factor.is_finite() || self.retry.backoff_factor < 0.0 {
            return Err(ScraperError::configuration(
                "retry.backoff_factor must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
