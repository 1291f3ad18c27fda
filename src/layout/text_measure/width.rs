//! Unicode-aware terminal cell width.
//!
//! Backed by `unicode-width` (East Asian Width tables) for per-codepoint
//! width and `unicode-segmentation` (UAX #29) so a grapheme cluster such as
//! "e" + combining acute is measured as the width of its base, not the sum
//! of its parts.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::strip_ansi;

/// Display width of a single `char`, in terminal cells.
///
/// Control characters (including zero-width marks) measure 0. Anything
/// `unicode-width` can't classify falls back to 1 cell.
pub fn char_width(c: char) -> usize {
    if c == '\t' || c.is_control() {
        return 0;
    }
    c.width().unwrap_or(0)
}

/// Display width of one grapheme cluster (may be several `char`s).
///
/// Width is the width of the cluster's first (base) character; combining
/// marks that follow it contribute no additional width.
pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme.chars().next().map(char_width).unwrap_or(0)
}

/// Display width of a string in terminal cells.
///
/// ANSI escape sequences are stripped before measuring so styled text
/// measures the same as its plain content.
pub fn string_width(s: &str) -> u16 {
    let stripped = strip_ansi(s);
    let total: usize = stripped.graphemes(true).map(grapheme_width).sum();
    total.min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn control_chars_zero_width() {
        assert_eq!(string_width("\t"), 0);
        assert_eq!(string_width("a\tb"), 2);
    }

    #[test]
    fn wide_cjk() {
        assert_eq!(string_width("你好"), 4);
        assert_eq!(string_width("hello 世界"), 6 + 4);
    }

    #[test]
    fn combining_mark_zero_width() {
        // "e" + combining acute accent: base (1) + mark (0) = 1
        let s = "e\u{0301}";
        assert_eq!(string_width(s), 1);
    }

    #[test]
    fn ansi_stripped_before_measuring() {
        assert_eq!(string_width("\x1b[31mred\x1b[0m"), 3);
    }

    #[test]
    fn grapheme_width_base_plus_combining() {
        assert_eq!(grapheme_width("e\u{0301}"), 1);
    }
}
