//! Grapheme-safe text truncation with a configurable suffix.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, string_width};

/// Truncate `text` to fit within `max_width` cells, appending `suffix`
/// (default caller uses "…") when it doesn't already fit.
///
/// Never breaks inside a grapheme cluster. If `suffix` itself is wider than
/// `max_width`, the suffix is truncated instead.
pub fn truncate_with_suffix(text: &str, max_width: u16, suffix: &str) -> String {
    let max_width = max_width as usize;
    if max_width == 0 {
        return String::new();
    }

    let text_width = string_width(text) as usize;
    if text_width <= max_width {
        return text.to_string();
    }

    let suffix_width = string_width(suffix) as usize;
    if suffix_width >= max_width {
        return truncate_exact(suffix, max_width);
    }

    let target_width = max_width - suffix_width;
    let mut result = String::with_capacity(text.len());
    let mut current_width = 0usize;

    for grapheme in text.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if current_width + gw > target_width {
            break;
        }
        result.push_str(grapheme);
        current_width += gw;
    }

    result.push_str(suffix);
    result
}

/// Truncate `text` to fit within `max_width` cells using the default "…" suffix.
pub fn truncate_text(text: &str, max_width: u16) -> String {
    truncate_with_suffix(text, max_width, "\u{2026}")
}

fn truncate_exact(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0usize;

    for grapheme in text.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if current_width + gw > max_width {
            break;
        }
        result.push_str(grapheme);
        current_width += gw;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_text("hello", 10), "hello");
    }

    #[test]
    fn truncate_with_ellipsis() {
        assert_eq!(truncate_text("hello world", 6), "hello\u{2026}");
    }

    #[test]
    fn truncate_cjk_boundary() {
        assert_eq!(truncate_with_suffix("你好世界", 5, "\u{2026}"), "你好\u{2026}");
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_text("", 5), "");
    }

    #[test]
    fn truncate_zero_width() {
        assert_eq!(truncate_text("hello", 0), "");
    }

    #[test]
    fn truncate_preserves_grapheme() {
        let text = "cafe\u{0301}xyz";
        let result = truncate_text(text, 5);
        assert_eq!(string_width(&result), 5);
        assert!(result.ends_with('\u{2026}'));
    }

    #[test]
    fn truncate_suffix_too_wide() {
        assert_eq!(truncate_with_suffix("hello", 2, "..."), "..");
    }
}
