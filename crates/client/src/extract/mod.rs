//! Visible-text extraction from article HTML.
//!
//! Only paragraph-level blocks (`<p>`) are kept. Within a paragraph every
//! text node is whitespace-trimmed and the non-empty pieces are joined with a
//! single space; non-empty paragraphs are then joined the same way.

use scraper::{Html, Selector};

/// Concatenate the visible text of every `<p>` in the document.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|p| p.text().map(str::trim).filter(|t| !t.is_empty()).collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `text` to at most `max_chars` characters.
///
/// This is a raw character cut: words and sentences may be split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
