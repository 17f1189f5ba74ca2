//! Error types for scraping and for the LLM layer.
//!
//! [`ScraperError`] separates the failure kinds a caller reacts to
//! differently: network trouble is worth retrying later, a parse or
//! validation failure usually means the source site changed its layout.

use thiserror::Error;

/// Errors produced while fetching and extracting a day's readings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScraperError {
    /// Timeout, connection failure, HTTP error status or other transport error.
    #[error("{message}")]
    Network {
        message: String,
        url: String,
        status_code: Option<u16>,
    },

    /// An expected element could not be located in the page.
    #[error("{message}")]
    Parse { message: String, element: String },

    /// Extracted data violates a model invariant.
    #[error("{message}")]
    Validation {
        message: String,
        field: String,
        value: String,
    },

    /// The scraper was configured with unusable settings.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience alias used throughout the scraper.
pub type Result<T> = std::result::Result<T, ScraperError>;

impl ScraperError {
    pub fn network(message: impl Into<String>, url: impl Into<String>) -> Self {
        ScraperError::Network {
            message: message.into(),
            url: url.into(),
            status_code: None,
        }
    }

    pub fn parse(message: impl Into<String>, element: impl Into<String>) -> Self {
        ScraperError::Parse {
            message: message.into(),
            element: element.into(),
        }
    }

    pub fn validation(
        message: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ScraperError::Validation {
            message: message.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ScraperError::Configuration {
            message: message.into(),
        }
    }

    /// Only transport failures can succeed on a second try; the same
    /// document will always fail extraction the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScraperError::Network { .. })
    }

    /// Process exit code the binary reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScraperError::Network { .. } => 1,
            ScraperError::Configuration { .. } => 2,
            ScraperError::Parse { .. } | ScraperError::Validation { .. } => 3,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ScraperError::Network { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScraperError::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&str> {
        match self {
            ScraperError::Parse { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ScraperError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Errors produced while asking the LLM for synopses and reflections.
#[derive(Error, Debug)]
pub enum AiError {
    /// The request itself failed (after any retries).
    #[error("LLM request failed: {0}")]
    Request(String),

    /// The model answered, but not with the JSON we asked for.
    #[error("Invalid LLM response: {message}")]
    InvalidResponse { message: String, response: String },

    /// Input or output failed a content rule.
    #[error("{0}")]
    Invalid(String),

    /// Every attempt produced an unusable reflection.
    #[error("No valid reflection after {attempts} attempts; last error: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}
