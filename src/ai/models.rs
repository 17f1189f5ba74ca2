//! LLM-generated companions to a day's readings.
//!
//! Field names match the JSON the templates ask the model to produce, so
//! responses deserialize straight into these types before validation.

use crate::ccc::{MAX_PARAGRAPH, MIN_PARAGRAPH, ccc_url, validate_ccc_paragraph};
use crate::error::AiError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One-line summary of a single reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSynopsis {
    pub reading_title: String,
    pub synopsis_text: String,
}

impl ReadingSynopsis {
    pub fn new(
        reading_title: impl Into<String>,
        synopsis_text: impl Into<String>,
    ) -> Result<Self, AiError> {
        let synopsis = Self {
            reading_title: reading_title.into(),
            synopsis_text: synopsis_text.into().trim().to_string(),
        };
        synopsis.validate()?;
        Ok(synopsis)
    }

    pub fn validate(&self) -> Result<(), AiError> {
        if self.synopsis_text.trim().is_empty() {
            return Err(AiError::Invalid("Synopsis text cannot be empty".into()));
        }
        if self.reading_title.trim().is_empty() {
            return Err(AiError::Invalid("Reading title cannot be empty".into()));
        }
        Ok(())
    }
}

/// A cited paragraph of the Catechism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CccCitation {
    pub paragraph_number: u32,
    pub excerpt_text: String,
    /// How the teaching relates to the day's readings.
    #[serde(default)]
    pub context_note: String,
}

impl CccCitation {
    pub fn validate(&self) -> Result<(), AiError> {
        if !validate_ccc_paragraph(self.paragraph_number) {
            return Err(AiError::Invalid(format!(
                "CCC paragraph number must be {MIN_PARAGRAPH}-{MAX_PARAGRAPH}, got {}",
                self.paragraph_number
            )));
        }
        if self.excerpt_text.trim().is_empty() {
            return Err(AiError::Invalid("CCC excerpt text cannot be empty".into()));
        }
        Ok(())
    }

    pub fn url(&self) -> Option<String> {
        ccc_url(self.paragraph_number).ok()
    }
}

/// A single reflection drawing all of the day's readings together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReflection {
    pub reflection_text: String,
    pub pondering_questions: Vec<String>,
    pub ccc_citations: Vec<CccCitation>,
}

impl DailyReflection {
    /// Drop repeated questions and citations, then validate.
    pub fn new(
        reflection_text: String,
        pondering_questions: Vec<String>,
        ccc_citations: Vec<CccCitation>,
    ) -> Result<Self, AiError> {
        let reflection = Self {
            reflection_text: reflection_text.trim().to_string(),
            pondering_questions: pondering_questions
                .into_iter()
                .map(|q| q.trim().to_string())
                .unique()
                .collect(),
            ccc_citations: ccc_citations
                .into_iter()
                .unique_by(|c| c.paragraph_number)
                .collect(),
        };
        reflection.validate()?;
        Ok(reflection)
    }

    pub fn validate(&self) -> Result<(), AiError> {
        if self.reflection_text.is_empty() {
            return Err(AiError::Invalid("Reflection text cannot be empty".into()));
        }
        if self.pondering_questions.len() < 2 {
            return Err(AiError::Invalid(
                "Must have at least 2 pondering questions".into(),
            ));
        }
        if let Some(q) = self.pondering_questions.iter().find(|q| !q.ends_with('?')) {
            return Err(AiError::Invalid(format!(
                "Pondering question must end with '?': {q}"
            )));
        }
        if !(1..=2).contains(&self.ccc_citations.len()) {
            return Err(AiError::Invalid("Must have 1-2 CCC citations".into()));
        }
        self.ccc_citations.iter().try_for_each(CccCitation::validate)
    }
}
