//! Terminal size and render-mode signals.
//!
//! Terminal dimensions and the active render mode are reactive signals so
//! that `layoutDerived` and `frameBufferDerived` re-run automatically on
//! resize or mode change, instead of the render effect polling for it.

use std::cell::RefCell;

use crate::reactive::{signal, Signal};

thread_local! {
    static TERMINAL_WIDTH: RefCell<Option<Signal<u16>>> = const { RefCell::new(None) };
    static TERMINAL_HEIGHT: RefCell<Option<Signal<u16>>> = const { RefCell::new(None) };
    static RENDER_MODE: RefCell<Option<Signal<RenderMode>>> = const { RefCell::new(None) };
}

fn width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|cell| {
        cell.borrow_mut().get_or_insert_with(|| signal(80u16)).clone()
    })
}

fn height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|cell| {
        cell.borrow_mut().get_or_insert_with(|| signal(24u16)).clone()
    })
}

fn mode_signal() -> Signal<RenderMode> {
    RENDER_MODE.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| signal(RenderMode::Fullscreen))
            .clone()
    })
}

/// Get the signal backing terminal width, for deriveds to depend on.
pub fn terminal_width_signal() -> Signal<u16> {
    width_signal()
}

/// Get the signal backing terminal height, for deriveds to depend on.
pub fn terminal_height_signal() -> Signal<u16> {
    height_signal()
}

/// Get the signal backing the active render mode, for deriveds to depend on.
pub fn render_mode_signal() -> Signal<RenderMode> {
    mode_signal()
}

/// Current terminal width (untracked read).
pub fn terminal_width() -> u16 {
    width_signal().peek()
}

/// Current terminal height (untracked read).
pub fn terminal_height() -> u16 {
    height_signal().peek()
}

/// Set terminal size, notifying anything depending on width/height signals.
pub fn set_terminal_size(width: u16, height: u16) {
    width_signal().set(width);
    height_signal().set(height);
}

/// Query the real terminal size via crossterm and publish it.
///
/// Falls back to the signals' existing values (80x24 by default) if the
/// terminal size cannot be determined, e.g. when not attached to a tty.
pub fn detect_terminal_size() {
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        set_terminal_size(cols, rows);
    }
}

/// Current render mode (untracked read).
pub fn render_mode() -> RenderMode {
    mode_signal().peek()
}

/// Set the active render mode, notifying anything depending on it.
pub fn set_render_mode(mode: RenderMode) {
    mode_signal().set(mode);
}

/// How the frame buffer is written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Clears and redraws the full alternate screen each frame.
    Fullscreen,
    /// Renders in place below the cursor, growing/shrinking with content.
    Inline,
    /// Appends new frames below prior output without erasing it.
    Append,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset() {
        set_terminal_size(80, 24);
        set_render_mode(RenderMode::Fullscreen);
    }

    #[test]
    fn defaults_to_80x24_fullscreen() {
        reset();
        assert_eq!(terminal_width(), 80);
        assert_eq!(terminal_height(), 24);
        assert_eq!(render_mode(), RenderMode::Fullscreen);
    }

    #[test]
    fn set_terminal_size_updates_both_dimensions() {
        reset();
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
    }

    #[test]
    fn set_render_mode_is_observable() {
        reset();
        set_render_mode(RenderMode::Inline);
        assert_eq!(render_mode(), RenderMode::Inline);
    }
}
