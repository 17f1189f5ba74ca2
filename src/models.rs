//! Data models for scraped readings and the page handed to output writers.
//!
//! - [`ReadingEntry`]: one Scripture reading (title, citation, paragraphs)
//! - [`DailyReading`]: every reading for one calendar date
//! - [`DailyPage`]: a [`DailyReading`] plus any LLM-generated companions
//!
//! Both scraped types are validated right after construction and are
//! treated as immutable from then on.

use crate::ai::models::{DailyReflection, ReadingSynopsis};
use crate::error::{Result, ScraperError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single reading, e.g. the Gospel of the day.
///
/// ```ignore
/// let entry = ReadingEntry {
///     title: "Gospel".into(),
///     citation: "Luke 21:5-11".into(),
///     text: vec!["While some people were speaking...".into()],
/// };
/// assert_eq!(entry.title_with_citation(), "Gospel (Luke 21:5-11)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEntry {
    /// Label shown on the page ("Reading 1", "Responsorial Psalm", ...).
    pub title: String,
    /// Biblical reference, e.g. "1 Maccabees 4:36-37, 52-59".
    pub citation: String,
    /// Paragraphs of the reading in page order.
    pub text: Vec<String>,
}

impl ReadingEntry {
    /// Check that title, citation and text all carry content.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ScraperError::validation(
                "Reading title cannot be empty",
                "title",
                self.title.clone(),
            ));
        }
        if self.citation.trim().is_empty() {
            return Err(ScraperError::validation(
                "Reading citation cannot be empty",
                "citation",
                self.citation.clone(),
            ));
        }
        if !self.text.iter().any(|p| !p.trim().is_empty()) {
            return Err(ScraperError::validation(
                "Reading text cannot be empty",
                "text",
                format!("{:?}", self.text),
            ));
        }
        Ok(())
    }

    pub fn title_with_citation(&self) -> String {
        format!("{} ({})", self.title, self.citation)
    }
}

/// All readings for one date, as scraped from a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    /// e.g. "Saturday, November 22, 2025".
    pub date_display: String,
    /// e.g. "Memorial of Saint Cecilia, Virgin and Martyr".
    pub liturgical_day: String,
    pub readings: Vec<ReadingEntry>,
    /// The URL the page was fetched from.
    pub source_url: String,
}

impl DailyReading {
    /// Validate the aggregate, stopping at the first invalid field.
    ///
    /// Errors from individual readings are re-tagged with their position,
    /// e.g. `readings[2].citation`.
    pub fn validate(&self) -> Result<()> {
        if self.date_display.trim().is_empty() {
            return Err(ScraperError::validation(
                "Date display cannot be empty",
                "date_display",
                self.date_display.clone(),
            ));
        }
        if self.liturgical_day.trim().is_empty() {
            return Err(ScraperError::validation(
                "Liturgical day cannot be empty",
                "liturgical_day",
                self.liturgical_day.clone(),
            ));
        }
        if self.readings.is_empty() {
            return Err(ScraperError::validation(
                "Readings list cannot be empty",
                "readings",
                "[]",
            ));
        }
        for (i, reading) in self.readings.iter().enumerate() {
            if let Err(err) = reading.validate() {
                return Err(match err {
                    ScraperError::Validation {
                        message,
                        field,
                        value,
                    } => ScraperError::validation(
                        format!("Invalid reading at index {i}: {message}"),
                        format!("readings[{i}].{field}"),
                        value,
                    ),
                    other => other,
                });
            }
        }
        if self.source_url.trim().is_empty() {
            return Err(ScraperError::validation(
                "Source URL cannot be empty",
                "source_url",
                self.source_url.clone(),
            ));
        }
        Ok(())
    }

    /// ISO date used to name output files, e.g. `2025-11-22`.
    pub fn file_stem(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Everything written out for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPage {
    pub readings: DailyReading,
    #[serde(default)]
    pub synopses: Vec<ReadingSynopsis>,
    #[serde(default)]
    pub reflection: Option<DailyReflection>,
    /// RFC 3339 timestamp of the run that produced this page.
    pub generated_at: String,
}
