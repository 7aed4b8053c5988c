//! Unicode helpers shared by profiles, wordlists and log messages

use unicode_normalization::UnicodeNormalization;

/// Canonical composed (NFC) form of `text`
pub fn normalize(text: &str) -> String {
    text.nfc().collect()
}

/// Render every character of `text` as `U+XXXX`, space-joined
///
/// Codepoints are uppercase hex, zero-padded to at least four digits.
pub fn codepoints(text: &str) -> String {
    text.chars()
        .map(|ch| format!("U+{:04X}", ch as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_composes() {
        // e + combining acute
        let decomposed = "e\u{0301}";
        assert_eq!(normalize(decomposed), "\u{00E9}");
    }

    #[test]
    fn test_normalize_keeps_composed_text() {
        assert_eq!(normalize("tʃa"), "tʃa");
    }

    #[test]
    fn test_codepoints_basic() {
        assert_eq!(codepoints("ab"), "U+0061 U+0062");
    }

    #[test]
    fn test_codepoints_padding_and_case() {
        assert_eq!(codepoints("ʃ"), "U+0283");
        assert_eq!(codepoints("\u{1F600}"), "U+1F600");
    }

    #[test]
    fn test_codepoints_empty() {
        assert_eq!(codepoints(""), "");
    }
}
