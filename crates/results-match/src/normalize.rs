//! Canonical form of free-text fields for comparison.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block. Other mark categories (Indic or Thai
/// vowel signs) are letters of the name and survive.
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lowercases, strips diacritics and collapses whitespace.
///
/// Accented characters are decomposed (NFD) and their combining marks
/// dropped, so `"Émile"` and `"emile"` normalize to the same value.
/// Leading and trailing whitespace is removed and inner runs become a
/// single space. Idempotent.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive equality on trimmed values. Diacritics still count.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
