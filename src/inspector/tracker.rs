//! Pointer tracker text extraction

/// Trim surrounding whitespace and hard-cut to `max_chars` characters
///
/// The cut is not word-aware but never splits a UTF-8 scalar.
pub fn extract_text(raw: &str, max_chars: usize) -> String {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_trimmed_original() {
        assert_eq!(extract_text("  hello world \n", 500), "hello world");
        assert_eq!(extract_text("", 500), "");
        assert_eq!(extract_text(" \t\n ", 500), "");
    }

    #[test]
    fn test_long_text_cut_to_exact_length() {
        let raw = format!("  {}  ", "abcde ".repeat(200));
        let text = extract_text(&raw, 500);
        assert_eq!(text.chars().count(), 500);
        assert!(raw.trim().starts_with(&text));

        let text = extract_text(&raw, 600);
        assert_eq!(text.chars().count(), 600);
    }

    #[test]
    fn test_exact_length_is_untouched() {
        let raw = "a".repeat(500);
        assert_eq!(extract_text(&raw, 500), raw);
    }

    #[test]
    fn test_cut_counts_chars_not_bytes() {
        let raw = "日本語".repeat(300);
        let text = extract_text(&raw, 500);
        assert_eq!(text.chars().count(), 500);
        assert!(text.ends_with('日') || text.ends_with('本') || text.ends_with('語'));
    }

    #[test]
    fn test_cut_is_not_word_aware() {
        assert_eq!(extract_text("hello world", 7), "hello w");
    }
}
