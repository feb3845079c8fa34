//! Transition-condition cell parsing.
//!
//! A "between two creatures" cell usually holds plain forward condition
//! text (`等级16`). Two-directional cells describe promotion and
//! demotion in one cell using arrow markers: everything after the first
//! `←` is the reverse/back-transition text, and when a `→` is present
//! the forward text is cut at it.

use scraper::ElementRef;

use crate::dom;

/// Parsed condition cell content. Both fields default to the empty
/// string — absent conditions are `""`, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    pub text: String,
    pub back_text: String,
}

/// Parse the trimmed text content of a condition cell.
pub fn parse_condition(raw: &str) -> Condition {
    let trimmed = raw.trim();

    let back_text = match trimmed.split_once('←') {
        Some((_, after)) => after.trim().to_string(),
        None => String::new(),
    };
    let text = match trimmed.split_once('→') {
        Some((before, _)) => before.trim().to_string(),
        None => trimmed.to_string(),
    };

    Condition { text, back_text }
}

/// Extract the condition from a table cell's full text content.
pub fn extract_condition(cell: ElementRef<'_>) -> Condition {
    parse_condition(&dom::text_of(cell))
}
