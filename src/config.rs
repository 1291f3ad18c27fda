//! Runtime configuration knobs.
//!
//! Most of the engine's behavior is fixed by how components are built, but a
//! handful of details are left to the embedding application: how many past
//! focus targets to remember, how far a mouse wheel tick or a Page Up/Down
//! key moves a scrollable, and so on. [`TuiConfig`] collects those knobs with
//! defaults matching the values this crate shipped with before it was
//! configurable, and [`set_active`] installs one for [`mount`](crate::mount)
//! to pick up.

use std::cell::RefCell;

/// Runtime knobs for focus history, scrolling, and text truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct TuiConfig {
    /// How many prior focus targets `save_focus_to_history` retains.
    pub focus_history_capacity: usize,
    /// Lines moved per arrow-key scroll.
    pub line_scroll_step: u16,
    /// Lines moved per mouse wheel tick.
    pub wheel_scroll_step: u16,
    /// Fraction of the viewport moved by Page Up/Down.
    pub page_scroll_factor: f32,
    /// Suffix appended to text truncated to fit its layout box.
    pub truncation_suffix: String,
    /// Whether newly-focused text cursors blink by default.
    pub cursor_blinks_by_default: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            focus_history_capacity: 10,
            line_scroll_step: 1,
            wheel_scroll_step: 3,
            page_scroll_factor: 0.9,
            truncation_suffix: "\u{2026}".to_string(),
            cursor_blinks_by_default: false,
        }
    }
}

thread_local! {
    static ACTIVE: RefCell<TuiConfig> = RefCell::new(TuiConfig::default());
}

/// Install the configuration `mount()` and the rest of the framework read
/// their runtime knobs from.
pub fn set_active(config: TuiConfig) {
    ACTIVE.with(|cell| *cell.borrow_mut() = config);
}

/// Read the active configuration.
pub fn active() -> TuiConfig {
    ACTIVE.with(|cell| cell.borrow().clone())
}

/// Reset to [`TuiConfig::default`] (for tests).
pub fn reset_active() {
    set_active(TuiConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_hardcoded_constants() {
        let config = TuiConfig::default();
        assert_eq!(config.focus_history_capacity, 10);
        assert_eq!(config.line_scroll_step, 1);
        assert_eq!(config.wheel_scroll_step, 3);
        assert!((config.page_scroll_factor - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.truncation_suffix, "\u{2026}");
    }

    #[test]
    fn set_active_is_observable_and_resettable() {
        reset_active();
        let mut custom = TuiConfig::default();
        custom.wheel_scroll_step = 5;
        set_active(custom);
        assert_eq!(active().wheel_scroll_step, 5);
        reset_active();
        assert_eq!(active().wheel_scroll_step, 3);
    }
}
