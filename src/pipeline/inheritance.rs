//! Style inheritance and opacity cascade.
//!
//! Colors and opacity are per-component slots, but the effective paint color
//! and opacity a component renders with depend on its ancestors: a text node
//! with no explicit foreground inherits the nearest ancestor's, and opacity
//! multiplies down the chain the way CSS `opacity` does.

use crate::engine::arrays::{core, visual};
use crate::types::Rgba;

/// Walk up from `index` (inclusive) to the first ancestor with an explicit
/// (non-terminal-default) foreground color.
pub fn get_inherited_fg(index: usize) -> Rgba {
    let mut current = Some(index);
    while let Some(idx) = current {
        let color = visual::get_fg_color(idx);
        if !color.is_terminal_default() {
            return color;
        }
        current = core::get_parent_index(idx);
    }
    Rgba::TERMINAL_DEFAULT
}

/// Walk up from `index` (inclusive) to the first ancestor with an explicit
/// (non-terminal-default) background color.
pub fn get_inherited_bg(index: usize) -> Rgba {
    let mut current = Some(index);
    while let Some(idx) = current {
        let color = visual::get_bg_color(idx);
        if !color.is_terminal_default() {
            return color;
        }
        current = core::get_parent_index(idx);
    }
    Rgba::TERMINAL_DEFAULT
}

/// Multiply `index`'s own opacity by every ancestor's opacity, mirroring
/// how nested CSS `opacity` compounds rather than overrides.
pub fn get_effective_opacity(index: usize) -> u8 {
    let mut factor = 1.0f32;
    let mut current = Some(index);
    while let Some(idx) = current {
        factor *= visual::get_opacity(idx) as f32 / 255.0;
        current = core::get_parent_index(idx);
    }
    (factor * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Scale a color's alpha by a cascaded opacity (0-255). Terminal-default and
/// ANSI-indexed colors are left untouched since they carry no alpha channel.
pub fn apply_opacity(color: Rgba, opacity: u8) -> Rgba {
    if color.is_terminal_default() || color.is_ansi() || opacity == 255 {
        return color;
    }
    let scaled_a = (color.a as u32 * opacity as u32) / 255;
    Rgba::new(color.r as u8, color.g as u8, color.b as u8, scaled_a as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::core as core_arrays;
    use crate::engine::registry::{allocate_index, reset_registry};

    fn setup_parent_child() -> (usize, usize) {
        reset_registry();
        visual::reset();
        core_arrays::reset();
        let parent = allocate_index(None);
        let child = allocate_index(None);
        core_arrays::set_parent_index(child, Some(parent));
        (parent, child)
    }

    #[test]
    fn fg_inherits_from_nearest_ancestor() {
        let (parent, child) = setup_parent_child();
        visual::set_fg_color(parent, Rgba::RED);
        assert_eq!(get_inherited_fg(child), Rgba::RED);
        assert_eq!(get_inherited_fg(parent), Rgba::RED);
    }

    #[test]
    fn fg_own_value_wins_over_ancestor() {
        let (parent, child) = setup_parent_child();
        visual::set_fg_color(parent, Rgba::RED);
        visual::set_fg_color(child, Rgba::BLUE);
        assert_eq!(get_inherited_fg(child), Rgba::BLUE);
    }

    #[test]
    fn fg_defaults_to_terminal_default_with_no_ancestor_override() {
        let (_parent, child) = setup_parent_child();
        assert!(get_inherited_fg(child).is_terminal_default());
    }

    #[test]
    fn opacity_cascades_multiplicatively() {
        let (parent, child) = setup_parent_child();
        visual::set_opacity(parent, 128);
        visual::set_opacity(child, 128);
        let effective = get_effective_opacity(child);
        // 0.502 * 0.502 * 255 ~= 64
        assert!((60..=68).contains(&effective), "got {effective}");
    }

    #[test]
    fn apply_opacity_scales_alpha() {
        let color = Rgba::new(10, 20, 30, 255);
        let scaled = apply_opacity(color, 128);
        assert_eq!(scaled.a, 128);
        assert_eq!((scaled.r, scaled.g, scaled.b), (10, 20, 30));
    }

    #[test]
    fn apply_opacity_leaves_terminal_default_untouched() {
        let scaled = apply_opacity(Rgba::TERMINAL_DEFAULT, 50);
        assert!(scaled.is_terminal_default());
    }
}
