//! Reading entries and the multiple-Mass check.
//!
//! # Page structure
//!
//! ```text
//! div.content-header
//! ├── h3.name            "Reading 1"
//! └── div.address
//!     └── a[href*=/bible/]  "1 Maccabees 6:1-13"
//! div.content-body       (next sibling of the header)
//! └── p ...              reading text
//! ```
//!
//! A heading whose header, citation link or body is missing is skipped and
//! logged. Only a page with no usable reading at all is an error.

use super::{element_text, has_class};
use crate::error::{Result, ScraperError};
use crate::models::ReadingEntry;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

const READING_KEYWORDS: [&str; 4] = ["reading", "gospel", "psalm", "alleluia"];

/// Paragraphs containing these phrases are page chrome, not Scripture.
const NAVIGATION_PHRASES: [&str; 5] = [
    "listen podcast",
    "view reflection",
    "en español",
    "view calendar",
    "get daily readings",
];

/// Paragraphs shorter than this are dropped.
const MIN_PARAGRAPH_CHARS: usize = 21;

const MASS_SUFFIXES: &str = "Vigil|Night|Dawn|Day";

static NAME_HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.name").expect("valid selector"));
static ADDRESS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.address").expect("valid selector"));
static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static BIBLE_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/bible/").expect("valid pattern"));

/// Extract every reading on the page, in document order.
pub fn extract_readings(document: &Html) -> Result<Vec<ReadingEntry>> {
    let readings: Vec<ReadingEntry> = document
        .select(&NAME_HEADINGS)
        .filter_map(|heading| extract_reading(&heading))
        .collect();

    if readings.is_empty() {
        return Err(ScraperError::parse(
            "Could not extract any readings from page",
            "readings",
        ));
    }

    info!(count = readings.len(), "Extracted readings");
    Ok(readings)
}

/// Build one entry from its `h3.name` heading, or `None` when the block is
/// not a reading or is incomplete.
fn extract_reading(heading: &ElementRef<'_>) -> Option<ReadingEntry> {
    let title = element_text(heading);
    if !is_reading_title(&title) {
        debug!(%title, "Heading is not a reading title; skipping");
        return None;
    }

    let Some(content_header) = enclosing_content_header(heading) else {
        warn!(%title, "No content-header div found; skipping");
        return None;
    };

    let Some(address) = content_header.select(&ADDRESS).next() else {
        warn!(%title, "No address div found; skipping");
        return None;
    };

    let Some(citation_link) = address.select(&LINKS).find(|a| {
        a.value()
            .attr("href")
            .is_some_and(|href| BIBLE_HREF.is_match(href))
    }) else {
        warn!(%title, "No citation link found; skipping");
        return None;
    };

    let citation = element_text(&citation_link);
    if citation.is_empty() {
        warn!(%title, "Citation link is empty; skipping");
        return None;
    }

    let Some(content_body) = following_content_body(&content_header) else {
        warn!(%title, %citation, "No content-body div found; skipping");
        return None;
    };

    let text: Vec<String> = content_body
        .select(&PARAGRAPHS)
        .map(|p| element_text(&p))
        .filter(|p| is_scripture_paragraph(p))
        .collect();

    if text.is_empty() {
        warn!(%title, %citation, "No text found; skipping");
        return None;
    }

    debug!(%title, %citation, paragraphs = text.len(), "Extracted reading");
    Some(ReadingEntry {
        title,
        citation,
        text,
    })
}

fn is_reading_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    READING_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Long enough and not one of the page's navigation snippets.
pub fn is_scripture_paragraph(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.chars().count() >= MIN_PARAGRAPH_CHARS
        && !NAVIGATION_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

fn enclosing_content_header<'a>(heading: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div" && has_class(el, "content-header"))
}

fn following_content_body<'a>(header: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div" && has_class(el, "content-body"))
}

/// Feast days such as Christmas publish separate readings per Mass
/// (`122524-Vigil.cfm`, `122524-Night.cfm`, ...). Returns a warning naming
/// them when such links are present. Extraction is unaffected.
///
/// Names are the link texts with repeats dropped, first seen first. A link
/// with no text is named by its suffix (`Vigil`, `Night`, ...) rather than
/// listed as an empty string. The result is advisory only.
pub fn check_for_multiple_masses(document: &Html, date_code: &str) -> Option<String> {
    let pattern = Regex::new(&format!(
        r"(?i){}-({MASS_SUFFIXES})\.cfm",
        regex::escape(date_code)
    ))
    .ok()?;

    let masses: Vec<String> = document
        .select(&LINKS)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            let captures = pattern.captures(href)?;
            let text = element_text(&link);
            Some(if text.is_empty() {
                captures[1].to_string()
            } else {
                text
            })
        })
        .unique()
        .collect();

    if masses.is_empty() {
        return None;
    }
    Some(format!(
        "Multiple Mass options found: {}. Using first available.",
        masses.join(", ")
    ))
}
