//! Catechism of the Catholic Church paragraph helpers.
//!
//! The Catechism is numbered 1 through 2865; reflections cite paragraphs by
//! number and link to the Vatican's English edition.

pub const MIN_PARAGRAPH: u32 = 1;
pub const MAX_PARAGRAPH: u32 = 2865;

pub fn validate_ccc_paragraph(paragraph_number: u32) -> bool {
    (MIN_PARAGRAPH..=MAX_PARAGRAPH).contains(&paragraph_number)
}

/// Vatican archive URL for a paragraph. The archive names its pages by the
/// paragraph number in upper-case hex.
pub fn ccc_url(paragraph_number: u32) -> Result<String, String> {
    if !validate_ccc_paragraph(paragraph_number) {
        return Err(format!(
            "Invalid CCC paragraph number: {paragraph_number}. Must be between {MIN_PARAGRAPH} and {MAX_PARAGRAPH}."
        ));
    }
    Ok(format!(
        "https://www.vatican.va/archive/ENG0015/_P{paragraph_number:X}.HTM"
    ))
}
