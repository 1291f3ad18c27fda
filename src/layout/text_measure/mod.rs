//! Unicode-aware text measurement for terminal rendering.
//!
//! Provides the text-measurement contract consumed by the layout engine's
//! intrinsic-size pass and the frame buffer builder's content renderer:
//! display width, word-boundary wrapping with character fallback, and
//! grapheme-safe truncation. Built on `unicode-width` (East Asian Width
//! tables) and `unicode-segmentation` (UAX #29 grapheme boundaries).

mod ansi;
mod truncate;
mod width;
mod wrap;

pub use ansi::strip_ansi;
pub use truncate::{truncate_text, truncate_with_suffix};
pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{measure_text_height, wrap_text};

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use crate::types::TextWrap;

/// Cache key: content hash + wrap mode + available width.
type CacheKey = (u64, TextWrap, u16);

thread_local! {
    static HEIGHT_CACHE: RefCell<HashMap<CacheKey, u16>> = RefCell::new(HashMap::new());
}

fn hash_content(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Measure the wrapped height of `content` for a given wrap mode and width,
/// memoizing on `(content_hash, wrap_mode, available_width)` so repeated
/// layout passes over unchanged text don't re-run the wrap algorithm.
pub fn measure_height_cached(content: &str, wrap: TextWrap, available_width: u16) -> u16 {
    let key = (hash_content(content), wrap, available_width);
    if let Some(cached) = HEIGHT_CACHE.with(|c| c.borrow().get(&key).copied()) {
        return cached;
    }

    let height = match wrap {
        TextWrap::NoWrap | TextWrap::Truncate => {
            if content.is_empty() { 0 } else { 1 }
        }
        TextWrap::Wrap => measure_text_height(content, available_width),
    };

    HEIGHT_CACHE.with(|c| c.borrow_mut().insert(key, height));
    height
}

/// Clear the measurement cache (for tests, and when the registry resets).
pub fn reset_measurement_cache() {
    HEIGHT_CACHE.with(|c| c.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_hits_return_same_value() {
        reset_measurement_cache();
        let a = measure_height_cached("hello world foo", TextWrap::Wrap, 7);
        let b = measure_height_cached("hello world foo", TextWrap::Wrap, 7);
        assert_eq!(a, b);
        assert_eq!(a, 3);
    }

    #[test]
    fn nowrap_and_truncate_are_single_line() {
        reset_measurement_cache();
        assert_eq!(measure_height_cached("hello world", TextWrap::NoWrap, 5), 1);
        assert_eq!(measure_height_cached("hello world", TextWrap::Truncate, 5), 1);
        assert_eq!(measure_height_cached("", TextWrap::NoWrap, 5), 0);
    }
}
