//! Heuristic spam signals
//!
//! Both extractors are total: any input, including the empty string,
//! produces a score in [0, 1].

use unicode_general_category::{get_general_category, GeneralCategory};

use super::types::KeywordCatalog;

/// Distinct catalog matches needed to saturate the keyword signal
pub const KEYWORD_SATURATION: f64 = 4.0;

/// All-caps words needed to saturate the capitalization signal
pub const UPPERCASE_SATURATION: f64 = 3.0;

/// Score a message against the keyword catalog.
///
/// Matching is a case-insensitive substring test. Each catalog phrase counts
/// once no matter how often it occurs, and matched phrases are returned in
/// catalog order.
pub fn keyword_score(text: &str, catalog: &KeywordCatalog) -> (f64, Vec<String>) {
    let lowered = text.to_lowercase();

    let matched: Vec<String> = catalog
        .entries()
        .filter(|(_, needle)| lowered.contains(needle))
        .map(|(phrase, _)| phrase.to_string())
        .collect();

    let score = (matched.len() as f64 / KEYWORD_SATURATION).min(1.0);
    (score, matched)
}

/// Score a message for shouting, using its original casing.
pub fn uppercase_score(text: &str) -> f64 {
    let mut tokens = 0usize;
    let mut shouting = 0usize;

    for word in words(text) {
        tokens += 1;
        if is_shouting(word) {
            shouting += 1;
        }
    }

    if tokens == 0 {
        return 0.0;
    }

    (shouting as f64 / UPPERCASE_SATURATION).min(1.0)
}

/// Whitespace-separated words; the information separators U+001C..U+001F
/// also split words
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
        .filter(|w| !w.is_empty())
}

/// Letter categories only (Lu, Ll, Lt, Lm, Lo); letter numbers and
/// combining marks do not count
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Letters only, at least two characters, and unchanged by uppercasing
fn is_shouting(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().all(is_letter) && word.to_uppercase() == word
}
