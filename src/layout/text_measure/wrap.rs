//! Word-boundary text wrapping with character fallback.
//!
//! Lines break at whitespace first. A single word wider than the available
//! width is itself broken at grapheme boundaries so it never overflows.

use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;

/// Word-wrap `text` to `width` terminal cells.
///
/// Each `\n` in the input starts a new paragraph; each paragraph wraps
/// independently. A word (a maximal run of non-whitespace graphemes) that
/// alone exceeds `width` is split across as many lines as it needs,
/// breaking at grapheme boundaries rather than overflowing.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    let width = width as usize;
    if width == 0 {
        return text.lines().map(|l| l.to_string()).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    if paragraph.is_empty() {
        lines.push(String::new());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0usize;

    for word in paragraph.split(' ') {
        if word.is_empty() {
            // Collapsed run of spaces between words; treat as a single space
            // so multiple spaces don't vanish entirely.
            if current_width + 1 <= width {
                current.push(' ');
                current_width += 1;
            }
            continue;
        }

        let word_width = word.graphemes(true).map(grapheme_width).sum::<usize>();
        let needs_space = !current.is_empty();
        let space_width = if needs_space { 1 } else { 0 };

        if current_width + space_width + word_width <= width {
            if needs_space {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_width + word_width;
            continue;
        }

        // Word doesn't fit on the current line.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            // Character fallback: the word alone is wider than the line.
            break_long_word(word, width, lines);
        }
    }

    lines.push(current);
}

/// Break a single overlong word at grapheme boundaries into `width`-wide chunks.
fn break_long_word(word: &str, width: usize, lines: &mut Vec<String>) {
    let mut chunk = String::new();
    let mut chunk_width = 0usize;

    for grapheme in word.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if chunk_width + gw > width && !chunk.is_empty() {
            lines.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push_str(grapheme);
        chunk_width += gw;
    }

    if !chunk.is_empty() {
        lines.push(chunk);
    }
}

/// Number of lines `text` occupies when word-wrapped to `width` cells.
///
/// Returns 0 for empty text, else at least 1.
pub fn measure_text_height(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    wrap_text(text, width).len().max(1).min(u16::MAX as usize) as u16
}
