//! Visual component arrays.
//!
//! Visual properties for rendering:
//! - fgColor, bgColor: foreground and background colors
//! - opacity: component opacity
//! - borderStyle / per-side border styles: border rendering
//! - borderColor: border color
//! - zIndex: stacking order

use crate::reactive::TrackedSlotArray;
use crate::types::{BorderStyle, Rgba};

thread_local! {
    /// Foreground color (text color).
    static FG_COLOR: TrackedSlotArray<Rgba> = TrackedSlotArray::new(Some(Rgba::TERMINAL_DEFAULT));

    /// Background color.
    static BG_COLOR: TrackedSlotArray<Rgba> = TrackedSlotArray::new(Some(Rgba::TERMINAL_DEFAULT));

    /// Opacity (0-255, 255 = fully opaque).
    static OPACITY: TrackedSlotArray<u8> = TrackedSlotArray::new(Some(255));

    /// Border style (applies to all sides unless overridden per-side).
    static BORDER_STYLE: TrackedSlotArray<BorderStyle> = TrackedSlotArray::new(Some(BorderStyle::None));

    /// Border color.
    static BORDER_COLOR: TrackedSlotArray<Rgba> = TrackedSlotArray::new(Some(Rgba::TERMINAL_DEFAULT));

    /// Per-side border styles (override the main border style when set).
    static BORDER_TOP_STYLE: TrackedSlotArray<BorderStyle> = TrackedSlotArray::new(Some(BorderStyle::None));
    static BORDER_RIGHT_STYLE: TrackedSlotArray<BorderStyle> = TrackedSlotArray::new(Some(BorderStyle::None));
    static BORDER_BOTTOM_STYLE: TrackedSlotArray<BorderStyle> = TrackedSlotArray::new(Some(BorderStyle::None));
    static BORDER_LEFT_STYLE: TrackedSlotArray<BorderStyle> = TrackedSlotArray::new(Some(BorderStyle::None));

    /// Z-index for stacking order.
    static Z_INDEX: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(0));
}

pub fn ensure_capacity(index: usize) {
    FG_COLOR.with(|arr| { let _ = arr.peek(index); });
    BG_COLOR.with(|arr| { let _ = arr.peek(index); });
    OPACITY.with(|arr| { let _ = arr.peek(index); });
    BORDER_STYLE.with(|arr| { let _ = arr.peek(index); });
    BORDER_COLOR.with(|arr| { let _ = arr.peek(index); });
    BORDER_TOP_STYLE.with(|arr| { let _ = arr.peek(index); });
    BORDER_RIGHT_STYLE.with(|arr| { let _ = arr.peek(index); });
    BORDER_BOTTOM_STYLE.with(|arr| { let _ = arr.peek(index); });
    BORDER_LEFT_STYLE.with(|arr| { let _ = arr.peek(index); });
    Z_INDEX.with(|arr| { let _ = arr.peek(index); });
}

pub fn clear_at_index(index: usize) {
    FG_COLOR.with(|arr| arr.clear(index));
    BG_COLOR.with(|arr| arr.clear(index));
    OPACITY.with(|arr| arr.clear(index));
    BORDER_STYLE.with(|arr| arr.clear(index));
    BORDER_COLOR.with(|arr| arr.clear(index));
    BORDER_TOP_STYLE.with(|arr| arr.clear(index));
    BORDER_RIGHT_STYLE.with(|arr| arr.clear(index));
    BORDER_BOTTOM_STYLE.with(|arr| arr.clear(index));
    BORDER_LEFT_STYLE.with(|arr| arr.clear(index));
    Z_INDEX.with(|arr| arr.clear(index));
}

pub fn reset() {
    FG_COLOR.with(|arr| arr.clear_all());
    BG_COLOR.with(|arr| arr.clear_all());
    OPACITY.with(|arr| arr.clear_all());
    BORDER_STYLE.with(|arr| arr.clear_all());
    BORDER_COLOR.with(|arr| arr.clear_all());
    BORDER_TOP_STYLE.with(|arr| arr.clear_all());
    BORDER_RIGHT_STYLE.with(|arr| arr.clear_all());
    BORDER_BOTTOM_STYLE.with(|arr| arr.clear_all());
    BORDER_LEFT_STYLE.with(|arr| arr.clear_all());
    Z_INDEX.with(|arr| arr.clear_all());
}

// =============================================================================
// Foreground / Background Color
// =============================================================================

pub fn get_fg_color(index: usize) -> Rgba {
    FG_COLOR.with(|arr| arr.get(index)).unwrap_or(Rgba::TERMINAL_DEFAULT)
}

pub fn set_fg_color(index: usize, color: Rgba) {
    FG_COLOR.with(|arr| arr.set_value(index, color));
}

pub fn set_fg_color_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Rgba + 'static,
{
    FG_COLOR.with(|arr| arr.set_getter(index, getter));
}

pub fn get_bg_color(index: usize) -> Rgba {
    BG_COLOR.with(|arr| arr.get(index)).unwrap_or(Rgba::TERMINAL_DEFAULT)
}

pub fn set_bg_color(index: usize, color: Rgba) {
    BG_COLOR.with(|arr| arr.set_value(index, color));
}

pub fn set_bg_color_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Rgba + 'static,
{
    BG_COLOR.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Opacity
// =============================================================================

pub fn get_opacity(index: usize) -> u8 {
    OPACITY.with(|arr| arr.get(index)).unwrap_or(255)
}

pub fn set_opacity(index: usize, opacity: u8) {
    OPACITY.with(|arr| arr.set_value(index, opacity));
}

pub fn set_opacity_getter<F>(index: usize, getter: F)
where
    F: Fn() -> u8 + 'static,
{
    OPACITY.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Border Style / Color
// =============================================================================

pub fn get_border_style(index: usize) -> BorderStyle {
    BORDER_STYLE.with(|arr| arr.get(index)).unwrap_or(BorderStyle::None)
}

pub fn set_border_style(index: usize, style: BorderStyle) {
    BORDER_STYLE.with(|arr| arr.set_value(index, style));
}

pub fn set_border_style_getter<F>(index: usize, getter: F)
where
    F: Fn() -> BorderStyle + 'static,
{
    BORDER_STYLE.with(|arr| arr.set_getter(index, getter));
}

pub fn get_border_color(index: usize) -> Rgba {
    BORDER_COLOR.with(|arr| arr.get(index)).unwrap_or(Rgba::TERMINAL_DEFAULT)
}

pub fn set_border_color(index: usize, color: Rgba) {
    BORDER_COLOR.with(|arr| arr.set_value(index, color));
}

pub fn set_border_color_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Rgba + 'static,
{
    BORDER_COLOR.with(|arr| arr.set_getter(index, getter));
}

/// Per-side border style, falling back to the main border style when unset.
pub fn get_border_top_style(index: usize) -> BorderStyle {
    let side = BORDER_TOP_STYLE.with(|arr| arr.get(index)).unwrap_or(BorderStyle::None);
    if side == BorderStyle::None { get_border_style(index) } else { side }
}

pub fn set_border_top_style(index: usize, style: BorderStyle) {
    BORDER_TOP_STYLE.with(|arr| arr.set_value(index, style));
}

pub fn get_border_right_style(index: usize) -> BorderStyle {
    let side = BORDER_RIGHT_STYLE.with(|arr| arr.get(index)).unwrap_or(BorderStyle::None);
    if side == BorderStyle::None { get_border_style(index) } else { side }
}

pub fn set_border_right_style(index: usize, style: BorderStyle) {
    BORDER_RIGHT_STYLE.with(|arr| arr.set_value(index, style));
}

pub fn get_border_bottom_style(index: usize) -> BorderStyle {
    let side = BORDER_BOTTOM_STYLE.with(|arr| arr.get(index)).unwrap_or(BorderStyle::None);
    if side == BorderStyle::None { get_border_style(index) } else { side }
}

pub fn set_border_bottom_style(index: usize, style: BorderStyle) {
    BORDER_BOTTOM_STYLE.with(|arr| arr.set_value(index, style));
}

pub fn get_border_left_style(index: usize) -> BorderStyle {
    let side = BORDER_LEFT_STYLE.with(|arr| arr.get(index)).unwrap_or(BorderStyle::None);
    if side == BorderStyle::None { get_border_style(index) } else { side }
}

pub fn set_border_left_style(index: usize, style: BorderStyle) {
    BORDER_LEFT_STYLE.with(|arr| arr.set_value(index, style));
}

// =============================================================================
// Z-Index
// =============================================================================

pub fn get_z_index(index: usize) -> i32 {
    Z_INDEX.with(|arr| arr.get(index)).unwrap_or(0)
}

pub fn set_z_index(index: usize, z: i32) {
    Z_INDEX.with(|arr| arr.set_value(index, z));
}

pub fn set_z_index_getter<F>(index: usize, getter: F)
where
    F: Fn() -> i32 + 'static,
{
    Z_INDEX.with(|arr| arr.set_getter(index, getter));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset();
    }

    #[test]
    fn test_fg_color() {
        setup();
        assert!(get_fg_color(0).is_terminal_default());
        let red = Rgba::rgb(255, 0, 0);
        set_fg_color(0, red);
        assert_eq!(get_fg_color(0), red);
    }

    #[test]
    fn test_border_style() {
        setup();
        assert_eq!(get_border_style(0), BorderStyle::None);
        set_border_style(0, BorderStyle::Single);
        assert_eq!(get_border_style(0), BorderStyle::Single);
    }

    #[test]
    fn test_per_side_border_falls_back_to_main_style() {
        setup();
        set_border_style(0, BorderStyle::Double);
        assert_eq!(get_border_top_style(0), BorderStyle::Double);

        set_border_top_style(0, BorderStyle::Single);
        assert_eq!(get_border_top_style(0), BorderStyle::Single);
        assert_eq!(get_border_bottom_style(0), BorderStyle::Double);
    }

    #[test]
    fn test_z_index() {
        setup();
        assert_eq!(get_z_index(0), 0);
        set_z_index(0, 10);
        assert_eq!(get_z_index(0), 10);
        set_z_index(1, -5);
        assert_eq!(get_z_index(1), -5);
    }
}
