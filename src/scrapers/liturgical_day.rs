//! Liturgical day extraction.
//!
//! The day's name ("Memorial of Saint Cecilia, Virgin and Martyr") is found
//! by trying independent strategies in order; the first one that yields a
//! plausible string wins:
//!
//! 1. the `<title>` tag with the site boilerplate stripped
//! 2. an `h2`/`h3`/`h1` whose class hints at a title or day
//! 3. any `h2`/`h3` mentioning a liturgical keyword ("week", "feast", ...)

use super::element_text;
use crate::error::{Result, ScraperError};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// A single extraction heuristic.
pub type Strategy = fn(&Html) -> Option<String>;

/// Strategies in precedence order, tagged by name for logging.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("title_tag", from_title_tag),
    ("class_hinted_heading", from_class_hinted_heading),
    ("keyword_heading", from_keyword_heading),
];

const DAY_KEYWORDS: [&str; 9] = [
    "sunday",
    "week",
    "memorial",
    "feast",
    "solemnity",
    "ordinary time",
    "advent",
    "lent",
    "easter",
];

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));
static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").expect("valid selector"));
static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("valid selector"));

/// Removed in this order from the page title.
static TITLE_BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\s*-\s*Daily Readings.*$",
        r"\s*\|\s*USCCB\s*$",
        r"\s*-\s*USCCB\s*$",
        r"^Daily Readings\s*-\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid pattern"))
    .collect()
});

static CLASS_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(liturgical|day|title|heading)").expect("valid pattern"));

/// Run the strategies in order and return the first match.
pub fn extract_liturgical_day(document: &Html) -> Result<String> {
    for &(name, strategy) in STRATEGIES {
        if let Some(day) = strategy(document) {
            debug!(strategy = name, liturgical_day = %day, "Extracted liturgical day");
            return Ok(day);
        }
        debug!(strategy = name, "Strategy found no liturgical day");
    }
    Err(ScraperError::parse(
        "Could not extract liturgical day from page",
        "liturgical_day",
    ))
}

/// Title text minus "- Daily Readings", "| USCCB", "- USCCB" and a
/// leading "Daily Readings -"; accepted when more than 10 characters remain.
pub fn from_title_tag(document: &Html) -> Option<String> {
    let title = document.select(&TITLE).next()?;
    let mut text = element_text(&title);
    for pattern in TITLE_BOILERPLATE.iter() {
        text = pattern.replace(&text, "").into_owned();
    }
    let text = text.trim();
    (text.chars().count() > 10).then(|| text.to_string())
}

/// Only the first hinted heading of each tag is considered; if it is too
/// short or just "Daily Readings", the next tag is tried.
pub fn from_class_hinted_heading(document: &Html) -> Option<String> {
    [&*H2, &*H3, &*H1].into_iter().find_map(|selector| {
        let heading = document.select(selector).find(class_is_hinted)?;
        let text = element_text(&heading);
        (text.chars().count() > 5 && text != "Daily Readings").then_some(text)
    })
}

pub fn from_keyword_heading(document: &Html) -> Option<String> {
    [&*H2, &*H3].into_iter().find_map(|selector| {
        document
            .select(selector)
            .map(|heading| element_text(&heading))
            .find(|text| {
                let lower = text.to_lowercase();
                DAY_KEYWORDS.iter().any(|k| lower.contains(k)) && text.chars().count() > 10
            })
    })
}

fn class_is_hinted(heading: &ElementRef<'_>) -> bool {
    heading.value().classes().any(|c| CLASS_HINT.is_match(c))
}
