//! Edit-distance based string similarity.

use rapidfuzz::distance::levenshtein;

use crate::normalize::normalize;

/// Default cut-off for [`are_very_similar`].
pub const VERY_SIMILAR_THRESHOLD: f64 = 0.85;

/// Similarity of two strings in `[0, 1]`; 1.0 means equal after
/// normalization.
///
/// Computed as `1 - levenshtein / max_len` over the normalized values.
/// A blank value compared with a non-blank one scores 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_similarity(&normalize(a), &normalize(b))
}

/// Whether [`similarity`] reaches `threshold`.
pub fn are_very_similar(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) >= threshold
}

/// [`similarity`] for values that are already normalized.
pub(crate) fn normalized_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let longest = a.chars().count().max(b.chars().count());
    let distance = levenshtein::distance(a.chars(), b.chars());
    1.0 - distance as f64 / longest as f64
}
