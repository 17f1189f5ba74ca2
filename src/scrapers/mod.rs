//! Scrapers for the USCCB daily readings pages.
//!
//! A scrape is a one-way pipeline:
//!
//! 1. **URL**: the date becomes `{base_url}/{MMDDYY}.cfm`
//! 2. **Fetching**: the page is downloaded (with retry) and parsed leniently
//! 3. **Extraction**: the liturgical day and the ordered readings are pulled
//!    out of the document
//! 4. **Validation**: the assembled [`DailyReading`](crate::models::DailyReading)
//!    is checked before it is returned
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`usccb`] | URL builder, HTTP fetch, orchestration |
//! | [`liturgical_day`] | Ordered fallback strategies for the day's name |
//! | [`readings`] | Reading entries and the multiple-Mass check |
//!
//! The page markup is not a stable contract, so extraction is heuristic:
//! one malformed reading is skipped and logged, and only a page yielding
//! nothing at all is an error.

pub mod liturgical_day;
pub mod readings;
pub mod usccb;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::utils::collapse_whitespace;
use scraper::ElementRef;

/// Visible text of an element: text nodes joined by a space, whitespace
/// collapsed. `<br>`-separated psalm lines stay separate words this way.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_element_text_joins_and_collapses() {
        let html = Html::parse_fragment(
            "<p>  The LORD is my shepherd;<br>there is nothing\n   I lack.</p>",
        );
        let p = html.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(
            element_text(&p),
            "The LORD is my shepherd; there is nothing I lack."
        );
    }

    #[test]
    fn test_has_class() {
        let html = Html::parse_fragment(r#"<div class="content-header extra"></div>"#);
        let div = html.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert!(has_class(&div, "content-header"));
        assert!(!has_class(&div, "content"));
    }
}
