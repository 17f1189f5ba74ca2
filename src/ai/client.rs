//! Synopsis and reflection generation on top of any [`AskAsync`] backend.

use super::models::{CccCitation, DailyReflection, ReadingSynopsis};
use super::prompts::{
    build_reflection_user_prompt, build_synopsis_user_prompt, format_readings_list, reading_text,
};
use crate::api::AskAsync;
use crate::error::AiError;
use crate::models::{DailyReading, ReadingEntry};
use crate::utils::{looks_truncated, strip_code_fence, truncate_for_log};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
struct SynopsisResponse {
    #[serde(default)]
    synopsis: String,
}

#[derive(Debug, Deserialize)]
struct ReflectionResponse {
    reflection_text: String,
    pondering_questions: Vec<String>,
    #[serde(default)]
    ccc_citations: Vec<CccCitation>,
}

/// Writes synopses and reflections for scraped readings.
///
/// Each kind of request has its own asker because the system prompt is
/// carried by the backend's template.
#[derive(Debug)]
pub struct LiturgyAssistant<S, R> {
    synopsis: S,
    reflection: R,
}

impl<S, R> LiturgyAssistant<S, R>
where
    S: AskAsync<Response = String>,
    R: AskAsync<Response = String>,
{
    pub fn new(synopsis: S, reflection: R) -> Self {
        Self {
            synopsis,
            reflection,
        }
    }

    /// One-line synopsis for a single reading.
    #[instrument(level = "info", skip_all, fields(title = %entry.title))]
    pub async fn generate_synopsis(&self, entry: &ReadingEntry) -> Result<ReadingSynopsis, AiError> {
        let text = reading_text(entry);
        if text.trim().is_empty() {
            return Err(AiError::Invalid("reading_text cannot be empty".into()));
        }
        if entry.citation.trim().is_empty() {
            return Err(AiError::Invalid(
                "citation must be in format 'Book Chapter:Verse-Verse'".into(),
            ));
        }

        let prompt = build_synopsis_user_prompt(&entry.title, &text, &entry.citation);
        let response: SynopsisResponse = ask_json(&self.synopsis, &prompt).await?;
        if response.synopsis.trim().is_empty() {
            return Err(AiError::InvalidResponse {
                message: "Empty synopsis in response".into(),
                response: String::new(),
            });
        }
        ReadingSynopsis::new(entry.title.clone(), response.synopsis)
    }

    /// Synopses for every reading; failures are logged and skipped.
    #[instrument(level = "info", skip_all, fields(date = %daily.date))]
    pub async fn generate_synopses(&self, daily: &DailyReading) -> Vec<ReadingSynopsis> {
        let synopses: Vec<ReadingSynopsis> = stream::iter(daily.readings.iter())
            .then(|entry| async move {
                match self.generate_synopsis(entry).await {
                    Ok(synopsis) => Some(synopsis),
                    Err(e) => {
                        warn!(title = %entry.title, error = %e, "Synopsis failed; skipping reading");
                        None
                    }
                }
            })
            .filter_map(std::future::ready)
            .collect()
            .await;

        info!(
            count = synopses.len(),
            total = daily.readings.len(),
            "Generated synopses"
        );
        synopses
    }

    /// A unified reflection for the day.
    ///
    /// An unusable answer is asked for again with the previous error
    /// appended to the prompt, up to `max_attempts` times. Request failures
    /// are returned at once.
    #[instrument(level = "info", skip_all, fields(date = %daily.date))]
    pub async fn generate_reflection(
        &self,
        daily: &DailyReading,
        feast_context: Option<&str>,
        max_attempts: u32,
    ) -> Result<DailyReflection, AiError> {
        let max_attempts = max_attempts.max(1);
        let mut prompt = build_reflection_user_prompt(
            &daily.date_display,
            &daily.liturgical_day,
            feast_context,
            &format_readings_list(&daily.readings),
        );

        let mut last_error = String::new();
        for attempt in 1..=max_attempts {
            let outcome = match ask_json::<_, ReflectionResponse>(&self.reflection, &prompt).await {
                Ok(r) => DailyReflection::new(r.reflection_text, r.pondering_questions, r.ccc_citations),
                Err(AiError::Request(e)) => return Err(AiError::Request(e)),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(reflection) => {
                    info!(attempt, "Generated reflection");
                    return Ok(reflection);
                }
                Err(e) => {
                    warn!(attempt, max = max_attempts, error = %e, "Unusable reflection");
                    last_error = e.to_string();
                    prompt.push_str(&format!(
                        "\n\nPrevious attempt had error: {e}. Please try again with valid CCC citations (1-2865)."
                    ));
                }
            }
        }

        Err(AiError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}

async fn ask_text<A>(asker: &A, prompt: &str) -> Result<String, AiError>
where
    A: AskAsync<Response = String>,
{
    asker
        .ask(prompt)
        .await
        .map_err(|e| AiError::Request(e.to_string()))
}

/// Ask and parse the answer as JSON. A truncated answer is asked for once more.
async fn ask_json<A, T>(asker: &A, prompt: &str) -> Result<T, AiError>
where
    A: AskAsync<Response = String>,
    T: DeserializeOwned,
{
    let response = ask_text(asker, prompt).await?;
    match serde_json::from_str::<T>(strip_code_fence(&response)) {
        Ok(parsed) => Ok(parsed),
        Err(e) if looks_truncated(&e) => {
            warn!(error = %e, "EOF while parsing; re-asking once");
            let second = ask_text(asker, prompt).await?;
            serde_json::from_str::<T>(strip_code_fence(&second))
                .map_err(|e| invalid_response(&e, &second))
        }
        Err(e) => Err(invalid_response(&e, &response)),
    }
}

fn invalid_response(e: &serde_json::Error, response: &str) -> AiError {
    debug!(response_preview = %truncate_for_log(response, 300), "Non-conforming JSON");
    AiError::InvalidResponse {
        message: e.to_string(),
        response: truncate_for_log(response, 300),
    }
}
