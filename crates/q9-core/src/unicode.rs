//! Scalar-level helpers for candidate strings.
//!
//! Character boundaries are judged on Unicode scalar values, never on
//! UTF-8 byte lengths.

/// Number of Unicode scalar values in `s`.
pub fn scalar_count(s: &str) -> usize {
    s.chars().count()
}

/// True if `s` is exactly one Unicode scalar value.
///
/// Used for the "is this a single character" judgment behind the relate
/// and homophone features. One scalar, not one grapheme cluster: the
/// candidate data is plain CJK codepoints where the two coincide.
pub fn is_single_scalar(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Concatenate the glyph strings and split the result into two-scalar
/// pairs. A trailing unpaired scalar is dropped.
pub fn pair_up(glyphs: &[String]) -> Vec<String> {
    let combined: String = glyphs.concat();
    let chars: Vec<char> = combined.chars().collect();
    chars
        .chunks_exact(2)
        .map(|pair| pair.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_count() {
        assert_eq!(scalar_count(""), 0);
        assert_eq!(scalar_count("你"), 1);
        assert_eq!(scalar_count("你好"), 2);
    }

    #[test]
    fn test_is_single_scalar() {
        assert!(is_single_scalar("你"));
        assert!(is_single_scalar("a"));
        assert!(!is_single_scalar(""));
        assert!(!is_single_scalar("你好"));
    }

    #[test]
    fn test_pair_up() {
        let glyphs = vec!["「」".to_string(), "『』".to_string()];
        assert_eq!(pair_up(&glyphs), vec!["「」", "『』"]);
    }

    #[test]
    fn test_pair_up_across_strings() {
        // Pairing runs over the concatenation, not per input string.
        let glyphs = vec!["「".to_string(), "」『".to_string(), "』".to_string()];
        assert_eq!(pair_up(&glyphs), vec!["「」", "『』"]);
    }

    #[test]
    fn test_pair_up_drops_trailing_odd_scalar() {
        let glyphs = vec!["「」（".to_string()];
        assert_eq!(pair_up(&glyphs), vec!["「」"]);
    }

    #[test]
    fn test_pair_up_empty() {
        assert!(pair_up(&[]).is_empty());
    }
}
