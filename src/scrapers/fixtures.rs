//! HTML builders mirroring the USCCB readings markup, for tests.

/// One reading block: a `content-header` (title + citation link) followed
/// by a `content-body` sibling holding the paragraphs.
pub fn reading_block(title: &str, citation: Option<&str>, paragraphs: &[&str]) -> String {
    let address = match citation {
        Some(c) => format!(
            r#"<div class="address"><a href="https://bible.usccb.org/bible/luke/21?5" target="_blank">{c}</a></div>"#
        ),
        None => r#"<div class="address"></div>"#.to_string(),
    };
    let body: String = paragraphs.iter().map(|p| format!("<p>{p}</p>")).collect();
    format!(
        r#"<div class="b-verse"><div class="innerblock">
             <div class="content-header"><h3 class="name">{title}</h3>{address}</div>
             <div class="content-body">{body}</div>
           </div></div>"#
    )
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head><body>{body}</body></html>"
    )
}

/// The four readings of an ordinary weekday.
pub fn weekday_readings() -> String {
    [
        reading_block(
            "Reading 1",
            Some("1 Maccabees 6:1-13"),
            &["As King Antiochus was traversing the inland provinces, he heard that in Persia there was a city called Elymais."],
        ),
        reading_block(
            "Responsorial Psalm",
            Some("Psalms 9:2-3, 4 and 6, 16 and 19"),
            &["R. I will rejoice in your salvation, O Lord.", "I will give thanks to you, O LORD, with all my heart;"],
        ),
        reading_block(
            "Alleluia",
            Some("2 Timothy 1:10"),
            &["R. Alleluia, alleluia. Our Savior Jesus Christ destroyed death"],
        ),
        reading_block(
            "Gospel",
            Some("Luke 20:27-40"),
            &["Some Sadducees, those who deny that there is a resurrection, came forward and put this question to Jesus,"],
        ),
    ]
    .concat()
}

pub fn weekday_page() -> String {
    page(
        "Memorial of Saint Cecilia, Virgin and Martyr | USCCB",
        &weekday_readings(),
    )
}
