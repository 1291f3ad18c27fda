//! TUI Framework - Interaction Arrays
//!
//! User interaction state:
//! - focusable: Can receive focus
//! - tabIndex: Tab order
//! - scrollOffset: Scroll position
//! - hovered/pressed: Mouse state
//! - cursorPosition: Input cursor position
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained tracking.

use crate::reactive::TrackedSlotArray;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Is component focusable.
    static FOCUSABLE: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// True if the user explicitly set `focusable = false` (as opposed to leaving it
    /// unset). Distinguishes "never focusable" from "not focusable unless the layout
    /// engine makes it so" for the auto-focusable-scrollable rule.
    static FOCUSABLE_EXPLICIT_FALSE: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Set by the layout engine: true if this container is scrollable and was not
    /// explicitly marked non-focusable. Read-only from outside `layout`.
    static AUTO_FOCUSABLE: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Tab index for focus navigation (higher = later in order).
    static TAB_INDEX: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(0));

    /// Scroll offset X.
    static SCROLL_OFFSET_X: TrackedSlotArray<u16> = TrackedSlotArray::new(Some(0));

    /// Scroll offset Y.
    static SCROLL_OFFSET_Y: TrackedSlotArray<u16> = TrackedSlotArray::new(Some(0));

    /// Is component hovered by mouse.
    static HOVERED: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Is component pressed (mouse down).
    static PRESSED: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Is mouse enabled for this component.
    static MOUSE_ENABLED: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(true));

    /// Cursor position (for input components).
    static CURSOR_POSITION: TrackedSlotArray<u16> = TrackedSlotArray::new(Some(0));

    /// Selection start (for input components).
    static SELECTION_START: TrackedSlotArray<u16> = TrackedSlotArray::new(Some(0));

    /// Selection end (for input components).
    static SELECTION_END: TrackedSlotArray<u16> = TrackedSlotArray::new(Some(0));

    /// Cursor visible flag.
    static CURSOR_VISIBLE: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(true));

    /// Cursor blink FPS (0 = no blink).
    static CURSOR_BLINK_FPS: TrackedSlotArray<u8> = TrackedSlotArray::new(Some(2));

    /// Drawn cursor character codepoint (0 = block/inverse rendering).
    static CURSOR_CHAR: TrackedSlotArray<u32> = TrackedSlotArray::new(Some(0));

    /// Drawn cursor alt character codepoint for the blink "off" phase (0 = none).
    static CURSOR_ALT_CHAR: TrackedSlotArray<u32> = TrackedSlotArray::new(Some(0));

    /// Drawn cursor style discriminant (mirrors `CursorStyle as u8`).
    static CURSOR_STYLE: TrackedSlotArray<u8> = TrackedSlotArray::new(Some(0));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    FOCUSABLE.with(|arr| { let _ = arr.peek(index); });
    TAB_INDEX.with(|arr| { let _ = arr.peek(index); });
    SCROLL_OFFSET_X.with(|arr| { let _ = arr.peek(index); });
    SCROLL_OFFSET_Y.with(|arr| { let _ = arr.peek(index); });
    HOVERED.with(|arr| { let _ = arr.peek(index); });
    PRESSED.with(|arr| { let _ = arr.peek(index); });
    MOUSE_ENABLED.with(|arr| { let _ = arr.peek(index); });
    CURSOR_POSITION.with(|arr| { let _ = arr.peek(index); });
    SELECTION_START.with(|arr| { let _ = arr.peek(index); });
    SELECTION_END.with(|arr| { let _ = arr.peek(index); });
    CURSOR_VISIBLE.with(|arr| { let _ = arr.peek(index); });
    CURSOR_BLINK_FPS.with(|arr| { let _ = arr.peek(index); });
    CURSOR_CHAR.with(|arr| { let _ = arr.peek(index); });
    CURSOR_ALT_CHAR.with(|arr| { let _ = arr.peek(index); });
    CURSOR_STYLE.with(|arr| { let _ = arr.peek(index); });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    FOCUSABLE.with(|arr| arr.clear(index));
    FOCUSABLE_EXPLICIT_FALSE.with(|arr| arr.clear(index));
    AUTO_FOCUSABLE.with(|arr| arr.clear(index));
    TAB_INDEX.with(|arr| arr.clear(index));
    SCROLL_OFFSET_X.with(|arr| arr.clear(index));
    SCROLL_OFFSET_Y.with(|arr| arr.clear(index));
    HOVERED.with(|arr| arr.clear(index));
    PRESSED.with(|arr| arr.clear(index));
    MOUSE_ENABLED.with(|arr| arr.clear(index));
    CURSOR_POSITION.with(|arr| arr.clear(index));
    SELECTION_START.with(|arr| arr.clear(index));
    SELECTION_END.with(|arr| arr.clear(index));
    CURSOR_VISIBLE.with(|arr| arr.clear(index));
    CURSOR_BLINK_FPS.with(|arr| arr.clear(index));
    CURSOR_CHAR.with(|arr| arr.clear(index));
    CURSOR_ALT_CHAR.with(|arr| arr.clear(index));
    CURSOR_STYLE.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    FOCUSABLE.with(|arr| arr.clear_all());
    FOCUSABLE_EXPLICIT_FALSE.with(|arr| arr.clear_all());
    AUTO_FOCUSABLE.with(|arr| arr.clear_all());
    TAB_INDEX.with(|arr| arr.clear_all());
    SCROLL_OFFSET_X.with(|arr| arr.clear_all());
    SCROLL_OFFSET_Y.with(|arr| arr.clear_all());
    HOVERED.with(|arr| arr.clear_all());
    PRESSED.with(|arr| arr.clear_all());
    MOUSE_ENABLED.with(|arr| arr.clear_all());
    CURSOR_POSITION.with(|arr| arr.clear_all());
    SELECTION_START.with(|arr| arr.clear_all());
    SELECTION_END.with(|arr| arr.clear_all());
    CURSOR_VISIBLE.with(|arr| arr.clear_all());
    CURSOR_BLINK_FPS.with(|arr| arr.clear_all());
    CURSOR_CHAR.with(|arr| arr.clear_all());
    CURSOR_ALT_CHAR.with(|arr| arr.clear_all());
    CURSOR_STYLE.with(|arr| arr.clear_all());
}

// =============================================================================
// Focusable
// =============================================================================

/// Get focusable at index (reactive).
pub fn get_focusable(index: usize) -> bool {
    FOCUSABLE.with(|arr| arr.get(index))
}

/// Set focusable at index.
pub fn set_focusable(index: usize, focusable: bool) {
    FOCUSABLE.with(|arr| arr.set_value(index, focusable));
}

/// Mark that the user explicitly set `focusable = false` at this index.
pub fn set_focusable_explicit_false(index: usize, explicit: bool) {
    FOCUSABLE_EXPLICIT_FALSE.with(|arr| arr.set_value(index, explicit));
}

/// Whether the user explicitly set `focusable = false` at this index.
pub fn get_focusable_explicit_false(index: usize) -> bool {
    FOCUSABLE_EXPLICIT_FALSE.with(|arr| arr.get(index))
}

/// Layout-engine write: mark whether this index is focusable by virtue of
/// being a scrollable container.
pub fn set_auto_focusable(index: usize, value: bool) {
    AUTO_FOCUSABLE.with(|arr| arr.set_value(index, value));
}

/// Effective focusable state: explicit focusable OR layout-driven auto-focusable.
pub fn get_effective_focusable(index: usize) -> bool {
    FOCUSABLE.with(|arr| arr.get(index)) || AUTO_FOCUSABLE.with(|arr| arr.get(index))
}

// =============================================================================
// Tab Index
// =============================================================================

/// Get tab index at index (reactive).
pub fn get_tab_index(index: usize) -> i32 {
    TAB_INDEX.with(|arr| arr.get(index))
}

/// Set tab index at index.
pub fn set_tab_index(index: usize, tab_index: i32) {
    TAB_INDEX.with(|arr| arr.set_value(index, tab_index));
}

// =============================================================================
// Scroll Offset
// =============================================================================

/// Get scroll offset X at index (reactive).
pub fn get_scroll_offset_x(index: usize) -> u16 {
    SCROLL_OFFSET_X.with(|arr| arr.get(index))
}

/// Get scroll offset Y at index (reactive).
pub fn get_scroll_offset_y(index: usize) -> u16 {
    SCROLL_OFFSET_Y.with(|arr| arr.get(index))
}

/// Set scroll offset at index.
pub fn set_scroll_offset(index: usize, x: u16, y: u16) {
    SCROLL_OFFSET_X.with(|arr| arr.set_value(index, x));
    SCROLL_OFFSET_Y.with(|arr| arr.set_value(index, y));
}

// =============================================================================
// Hovered
// =============================================================================

/// Get hovered state at index (reactive).
pub fn get_hovered(index: usize) -> bool {
    HOVERED.with(|arr| arr.get(index))
}

/// Set hovered state at index.
pub fn set_hovered(index: usize, hovered: bool) {
    HOVERED.with(|arr| arr.set_value(index, hovered));
}

// =============================================================================
// Pressed
// =============================================================================

/// Get pressed state at index (reactive).
pub fn get_pressed(index: usize) -> bool {
    PRESSED.with(|arr| arr.get(index))
}

/// Set pressed state at index.
pub fn set_pressed(index: usize, pressed: bool) {
    PRESSED.with(|arr| arr.set_value(index, pressed));
}

// =============================================================================
// Mouse Enabled
// =============================================================================

/// Get mouse enabled at index (reactive).
pub fn get_mouse_enabled(index: usize) -> bool {
    MOUSE_ENABLED.with(|arr| arr.get(index))
}

/// Set mouse enabled at index.
pub fn set_mouse_enabled(index: usize, enabled: bool) {
    MOUSE_ENABLED.with(|arr| arr.set_value(index, enabled));
}

// =============================================================================
// Cursor Position
// =============================================================================

/// Get cursor position at index (reactive).
pub fn get_cursor_position(index: usize) -> u16 {
    CURSOR_POSITION.with(|arr| arr.get(index))
}

/// Set cursor position at index.
pub fn set_cursor_position(index: usize, pos: u16) {
    CURSOR_POSITION.with(|arr| arr.set_value(index, pos));
}

/// Set cursor position from a getter function.
pub fn set_cursor_position_getter<F>(index: usize, getter: F)
where
    F: Fn() -> u16 + 'static,
{
    CURSOR_POSITION.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Cursor Visible
// =============================================================================

/// Get cursor visible at index (reactive).
pub fn get_cursor_visible(index: usize) -> bool {
    CURSOR_VISIBLE.with(|arr| arr.get(index))
}

/// Set cursor visible at index.
pub fn set_cursor_visible(index: usize, visible: bool) {
    CURSOR_VISIBLE.with(|arr| arr.set_value(index, visible));
}

/// Set cursor visible from a getter function.
pub fn set_cursor_visible_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    CURSOR_VISIBLE.with(|arr| arr.set_getter(index, getter));
}

// =============================================================================
// Cursor Blink FPS
// =============================================================================

/// Get cursor blink FPS at index (reactive).
pub fn get_cursor_blink_fps(index: usize) -> u8 {
    CURSOR_BLINK_FPS.with(|arr| arr.get(index))
}

/// Set cursor blink FPS at index.
pub fn set_cursor_blink_fps(index: usize, fps: u8) {
    CURSOR_BLINK_FPS.with(|arr| arr.set_value(index, fps));
}

// =============================================================================
// Drawn Cursor Glyphs
// =============================================================================

/// Get the drawn cursor character codepoint at index (reactive).
pub fn get_cursor_char(index: usize) -> u32 {
    CURSOR_CHAR.with(|arr| arr.get(index))
}

/// Set the drawn cursor character codepoint at index.
pub fn set_cursor_char(index: usize, ch: u32) {
    CURSOR_CHAR.with(|arr| arr.set_value(index, ch));
}

/// Get the drawn cursor alt character codepoint at index (reactive).
pub fn get_cursor_alt_char(index: usize) -> u32 {
    CURSOR_ALT_CHAR.with(|arr| arr.get(index))
}

/// Set the drawn cursor alt character codepoint at index.
pub fn set_cursor_alt_char(index: usize, ch: u32) {
    CURSOR_ALT_CHAR.with(|arr| arr.set_value(index, ch));
}

/// Get the drawn cursor style discriminant at index (reactive).
pub fn get_cursor_style(index: usize) -> u8 {
    CURSOR_STYLE.with(|arr| arr.get(index))
}

/// Set the drawn cursor style discriminant at index.
pub fn set_cursor_style(index: usize, style: u8) {
    CURSOR_STYLE.with(|arr| arr.set_value(index, style));
}

// =============================================================================
// Selection
// =============================================================================

/// Get selection start at index (reactive).
pub fn get_selection_start(index: usize) -> u16 {
    SELECTION_START.with(|arr| arr.get(index))
}

/// Set selection start at index.
pub fn set_selection_start(index: usize, pos: u16) {
    SELECTION_START.with(|arr| arr.set_value(index, pos));
}

/// Get selection end at index (reactive).
pub fn get_selection_end(index: usize) -> u16 {
    SELECTION_END.with(|arr| arr.get(index))
}

/// Set selection end at index.
pub fn set_selection_end(index: usize, pos: u16) {
    SELECTION_END.with(|arr| arr.set_value(index, pos));
}

/// Set selection range at index (convenience function).
pub fn set_selection(index: usize, start: u16, end: u16) {
    SELECTION_START.with(|arr| arr.set_value(index, start));
    SELECTION_END.with(|arr| arr.set_value(index, end));
}

/// Clear selection at index (set start == end).
pub fn clear_selection(index: usize) {
    set_selection(index, 0, 0);
}

/// Check if there is an active selection at index.
pub fn has_selection(index: usize) -> bool {
    let start = get_selection_start(index);
    let end = get_selection_end(index);
    start != end
}
