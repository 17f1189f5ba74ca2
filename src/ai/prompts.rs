//! User prompts for synopses and reflections.
//!
//! The matching system prompts are part of the `awful_aj` templates in
//! `templates/`; these builders only format the per-request content.

use crate::models::ReadingEntry;

pub fn build_synopsis_user_prompt(reading_title: &str, reading_text: &str, citation: &str) -> String {
    format!(
        r#"Reading Title: {reading_title}
Reading Text:
{reading_text}

Citation: {citation}

Task: Generate a one-line synopsis (10-25 words) that captures the core message of this reading.

Output as JSON:
{{
  "synopsis": "Your one-line summary here"
}}"#
    )
}

pub fn build_reflection_user_prompt(
    date_display: &str,
    liturgical_day: &str,
    feast_context: Option<&str>,
    readings_list: &str,
) -> String {
    let feast_section = feast_context
        .filter(|f| !f.trim().is_empty())
        .map(|f| format!("\nFeast Day: {f}"))
        .unwrap_or_default();

    format!(
        r#"Date: {date_display}
Liturgical Context: {liturgical_day}{feast_section}

Readings for the Day:

{readings_list}

Task: Generate a unified daily reflection that:
1. Synthesizes the themes across ALL readings
2. Helps readers apply God's Word to their lives
3. Includes 2-3 pondering questions (each ending with "?")
4. Cites 1-2 relevant CCC paragraphs (range: 1-2865) with brief excerpts
5. Maintains length of 300-500 words

Output as JSON:
{{
  "reflection_text": "Main reflection content (may include HTML <p> tags for paragraphs)",
  "pondering_questions": [
    "Question 1?",
    "Question 2?",
    "Question 3?"
  ],
  "ccc_citations": [
    {{
      "paragraph_number": 1234,
      "excerpt_text": "Brief quote or summary from CCC paragraph",
      "context_note": "How this teaching connects to today's readings"
    }}
  ]
}}"#
    )
}

/// Paragraphs of a reading as one block of text.
pub fn reading_text(entry: &ReadingEntry) -> String {
    entry.text.join("\n\n")
}

/// "{title} - {citation}" headers followed by the text, one block per reading.
pub fn format_readings_list(readings: &[ReadingEntry]) -> String {
    readings
        .iter()
        .map(|r| format!("{} - {}\n{}", r.title, r.citation, reading_text(r)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, citation: &str, text: &[&str]) -> ReadingEntry {
        ReadingEntry {
            title: title.into(),
            citation: citation.into(),
            text: text.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_synopsis_prompt_contains_inputs() {
        let prompt = build_synopsis_user_prompt("Gospel", "Jesus said...", "Luke 21:5-11");
        assert!(prompt.starts_with("Reading Title: Gospel\n"));
        assert!(prompt.contains("Citation: Luke 21:5-11"));
        assert!(prompt.contains("\"synopsis\": \"Your one-line summary here\""));
    }

    #[test]
    fn test_reflection_prompt_with_and_without_feast() {
        let with = build_reflection_user_prompt(
            "Sunday, November 30, 2025",
            "First Sunday of Advent",
            Some("Feast of Saint Andrew, Apostle"),
            "Gospel - Mt 24:37-44\nJesus said...",
        );
        assert!(with.contains("Liturgical Context: First Sunday of Advent\nFeast Day: Feast of Saint Andrew, Apostle\n"));
        assert!(with.contains("\"paragraph_number\": 1234"));

        let without = build_reflection_user_prompt("d", "l", None, "r");
        assert!(!without.contains("Feast Day"));
        let blank = build_reflection_user_prompt("d", "l", Some("  "), "r");
        assert!(!blank.contains("Feast Day"));
    }

    #[test]
    fn test_format_readings_list() {
        let list = format_readings_list(&[
            entry("Reading 1", "Dn 1:1-6", &["First para.", "Second para."]),
            entry("Gospel", "Lk 21:1-4", &["Gospel text."]),
        ]);
        assert_eq!(
            list,
            "Reading 1 - Dn 1:1-6\nFirst para.\n\nSecond para.\n\nGospel - Lk 21:1-4\nGospel text."
        );
    }
}
