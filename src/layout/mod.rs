//! TUI Framework - Layout Module
//!
//! A self-hosted CSS Flexbox Level 1 engine (`titan`) over the parallel
//! FlexNode arrays:
//!
//! 1. Builds a tree from parent relationships.
//! 2. Measures intrinsic sizes (text wrapping, box min-content).
//! 3. Resolves flex grow/shrink per line with an iterative freeze loop.
//! 4. Positions absolute children against their nearest positioned ancestor.
//! 5. Writes results into `ComputedLayout`, one entry per component index.
//!
//! # Reactivity
//!
//! When called from a derived, reading FlexNode.*.get() creates dependencies.
//! The layout derived re-runs when any layout property changes.
//!
//! # Example
//!
//! ```ignore
//! use tuicore::layout::{compute_layout, ComputedLayout};
//! use tuicore::reactive::derived;
//!
//! let layout = derived(|| {
//!     compute_layout(80, 24, true)
//! });
//! ```

mod types;
mod text_measure;
mod titan;

pub use types::*;
pub use text_measure::{
    char_width, grapheme_width, measure_height_cached, measure_text_height,
    reset_measurement_cache, strip_ansi, string_width, truncate_text, truncate_with_suffix,
    wrap_text,
};
pub use titan::{compute_layout, reset_titan_arrays};
