//! Normalized edit-distance similarity on a 0–100 scale.

use strsim::levenshtein;

/// Similarity of two strings as an integer percentage.
///
/// - Comparison is case-insensitive and ignores surrounding whitespace
/// - Identical normalized strings score 100
/// - A blank input scores 0, so two blanks never "match"
/// - Otherwise `100 * (1 - distance / longer_length)`, rounded
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let longest = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);
    let ratio = 1.0 - distance as f64 / longest as f64;

    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Strip everything except ASCII digits (phone normalization).
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_after_normalization() {
        assert_eq!(similarity("John Doe", "john doe"), 100);
        assert_eq!(similarity("  john doe ", "JOHN DOE"), 100);
    }

    #[test]
    fn blanks_score_zero() {
        assert_eq!(similarity("", ""), 0);
        assert_eq!(similarity("   ", "   "), 0);
        assert_eq!(similarity("john", ""), 0);
    }

    #[test]
    fn single_edit() {
        // one deletion over eight characters
        assert_eq!(similarity("john doe", "jon doe"), 88);
        assert_eq!(similarity("kitten", "sitting"), 57);
    }

    #[test]
    fn completely_different() {
        assert_eq!(similarity("abc", "xyz"), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(similarity("café", "cafe"), 75);
    }

    #[test]
    fn digits_only_strips_formatting() {
        assert_eq!(digits_only("(555) 123-4567"), "5551234567");
        assert_eq!(digits_only("+1 555.123.4567 ext"), "15551234567");
        assert_eq!(digits_only("n/a"), "");
    }
}
