//! Focus System - Keyboard navigation and focus state
//!
//! Manages focus state and navigation:
//! - `focused_index` signal (currently focused component)
//! - Focus cycling (Tab/Shift+Tab)
//! - Focus trapping for modals
//! - Focus history for restoration
//! - Focus callbacks (onFocus/onBlur)
//!
//! # Example
//!
//! ```ignore
//! use tuicore::state::focus;
//!
//! // Navigate with Tab
//! focus::focus_next();
//! focus::focus_previous();
//!
//! // Focus specific component
//! focus::focus(component_index);
//!
//! // Register callbacks
//! let cleanup = focus::register_callbacks(index, FocusCallbacks {
//!     on_focus: Some(Box::new(|| println!("Focused!"))),
//!     on_blur: Some(Box::new(|| println!("Blurred!"))),
//! });
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use crate::reactive::{signal, untracked, Signal};
use crate::engine::arrays::{core, interaction};
use crate::engine::{get_allocated_indices, get_id, register_release_hook};
use crate::state::scroll;

// =============================================================================
// FOCUSED INDEX SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Signal<i32> = signal(-1);
}

/// Get the currently focused component index (-1 if none)
pub fn get_focused_index() -> i32 {
    FOCUSED_INDEX.with(|s| s.get())
}

/// Check if any component is focused
pub fn has_focus() -> bool {
    get_focused_index() >= 0
}

/// Check if specific component is focused
pub fn is_focused(index: usize) -> bool {
    get_focused_index() == index as i32
}

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn()>>,
    pub on_blur: Option<Box<dyn Fn()>>,
}

impl Default for FocusCallbacks {
    fn default() -> Self {
        Self {
            on_focus: None,
            on_blur: None,
        }
    }
}

thread_local! {
    // Multiple callbacks per index supported (cursor blink + user callback)
    static FOCUS_CALLBACK_REGISTRY: RefCell<HashMap<usize, Vec<FocusCallbacks>>> = RefCell::new(HashMap::new());
}

/// Register focus callbacks for a component.
/// Returns cleanup function to unregister.
pub fn register_callbacks(index: usize, callbacks: FocusCallbacks) -> impl FnOnce() {
    let callback_id = FOCUS_CALLBACK_REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let list = reg.entry(index).or_insert_with(Vec::new);
        let id = list.len();
        list.push(callbacks);
        id
    });

    move || {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                if callback_id < list.len() {
                    // Mark as removed (can't easily remove from Vec while preserving IDs)
                    list[callback_id].on_focus = None;
                    list[callback_id].on_blur = None;
                }
                // Clean up if all callbacks removed
                if list.iter().all(|cb| cb.on_focus.is_none() && cb.on_blur.is_none()) {
                    reg.remove(&index);
                }
            }
        });
    }
}

thread_local! {
    static RELEASE_HOOK_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Install, at most once per thread, a release hook that blurs whatever is
/// focused the moment its index is released. `release_index` recurses
/// depth-first into descendants before releasing a node itself, so this
/// also covers "focused entity is a descendant of the subtree being
/// disposed" (I6, testable scenario F) without walking ancestry here.
fn ensure_release_hook_installed() {
    RELEASE_HOOK_INSTALLED.with(|installed| {
        if installed.replace(true) {
            return;
        }
        register_release_hook(|index| {
            if get_focused_index() == index as i32 {
                blur();
            }
        });
    });
}

/// Internal: Set focus and fire callbacks at the source
fn set_focus_with_callbacks(new_index: i32) {
    ensure_release_hook_installed();
    let old_index = get_focused_index();

    // No change, no callbacks
    if old_index == new_index {
        return;
    }

    // Fire onBlur for all callbacks on old focus
    if old_index >= 0 {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let reg = reg.borrow();
            if let Some(callbacks) = reg.get(&(old_index as usize)) {
                for cb in callbacks {
                    if let Some(ref on_blur) = cb.on_blur {
                        on_blur();
                    }
                }
            }
        });
    }

    // Update reactive state
    FOCUSED_INDEX.with(|s| s.set(new_index));

    // Fire onFocus for all callbacks on new focus
    if new_index >= 0 {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let reg = reg.borrow();
            if let Some(callbacks) = reg.get(&(new_index as usize)) {
                for cb in callbacks {
                    if let Some(ref on_focus) = cb.on_focus {
                        on_focus();
                    }
                }
            }
        });

        // Scroll the nearest scrollable ancestor to reveal the newly
        // focused entity. Untracked so reading the layout here doesn't
        // make this effect-external side effect a reactive dependency.
        untracked(|| {
            scroll::with_current_layout(|layout| {
                if let Some(ancestor) = scroll::get_focused_scrollable(layout) {
                    scroll::scroll_into_view(layout, new_index as usize, ancestor);
                }
                true
            });
        });
    }
}

// =============================================================================
// FOCUS TRAP (for modals/dialogs)
// =============================================================================

thread_local! {
    static FOCUS_TRAP_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());
}

/// Push a focus trap - focus will be contained within this component's children
pub fn push_focus_trap(container_index: usize) {
    FOCUS_TRAP_STACK.with(|stack| {
        stack.borrow_mut().push(container_index);
    });
}

/// Pop the current focus trap
pub fn pop_focus_trap() -> Option<usize> {
    FOCUS_TRAP_STACK.with(|stack| {
        stack.borrow_mut().pop()
    })
}

/// Check if focus is currently trapped
pub fn is_focus_trapped() -> bool {
    FOCUS_TRAP_STACK.with(|stack| !stack.borrow().is_empty())
}

/// Get the current focus trap container
pub fn get_focus_trap_container() -> Option<usize> {
    FOCUS_TRAP_STACK.with(|stack| {
        stack.borrow().last().copied()
    })
}

// =============================================================================
// FOCUS HISTORY (for restoration)
// =============================================================================

#[derive(Clone)]
struct FocusHistoryEntry {
    index: usize,
    id: Option<String>,
}

thread_local! {
    static FOCUS_HISTORY: RefCell<Vec<FocusHistoryEntry>> = RefCell::new(Vec::new());
}

/// Save current focus to history
pub fn save_focus_to_history() {
    let current = get_focused_index();
    if current >= 0 {
        let index = current as usize;
        let id = get_id(index);
        let capacity = crate::config::active().focus_history_capacity;
        FOCUS_HISTORY.with(|history| {
            let mut history = history.borrow_mut();
            history.push(FocusHistoryEntry { index, id });
            while history.len() > capacity {
                history.remove(0);
            }
        });
    }
}

/// Restore focus from history
pub fn restore_focus_from_history() -> bool {
    loop {
        let entry = FOCUS_HISTORY.with(|history| {
            history.borrow_mut().pop()
        });

        match entry {
            None => return false,
            Some(entry) => {
                // Verify the index hasn't been recycled for a different component
                if get_id(entry.index) != entry.id {
                    continue;
                }
                // Check if component is still valid and focusable
                let is_visible = core::get_visible(entry.index);
                let is_focusable = interaction::get_effective_focusable(entry.index);
                if is_focusable && is_visible && allowed_by_trap(entry.index) {
                    set_focus_with_callbacks(entry.index as i32);
                    return true;
                }
            }
        }
    }
}

// =============================================================================
// FOCUSABLE QUERIES
// =============================================================================

/// True if `index` is `ancestor` itself or a descendant of it.
fn is_within(index: usize, ancestor: usize) -> bool {
    if index == ancestor {
        return true;
    }
    let mut cur = core::get_parent_index(index);
    while let Some(p) = cur {
        if p == ancestor {
            return true;
        }
        cur = core::get_parent_index(p);
    }
    false
}

/// Reject a focus target outside the active focus trap, if any.
fn allowed_by_trap(index: usize) -> bool {
    match get_focus_trap_container() {
        Some(container) => is_within(index, container),
        None => true,
    }
}

/// Get all focusable component indices (live, visible; explicit or
/// layout-auto-focusable), sorted by tabIndex, honoring the active focus trap.
pub fn get_focusable_indices() -> Vec<usize> {
    let indices = get_allocated_indices();
    let mut result: Vec<usize> = Vec::new();

    for i in indices {
        let is_focusable = interaction::get_effective_focusable(i);
        let is_visible = core::get_visible(i);
        if is_focusable && is_visible && allowed_by_trap(i) {
            result.push(i);
        }
    }

    // Sort by tabIndex (components with same tabIndex keep allocation order)
    result.sort_by(|&a, &b| {
        let tab_a = interaction::get_tab_index(a);
        let tab_b = interaction::get_tab_index(b);
        if tab_a != tab_b {
            tab_a.cmp(&tab_b)
        } else {
            a.cmp(&b)
        }
    });

    result
}

/// Subset of [`get_focusable_indices`] that participates in Tab cycling:
/// entities with `tab_index < 0` are focusable by click only.
fn get_tab_cycle_indices() -> Vec<usize> {
    get_focusable_indices()
        .into_iter()
        .filter(|&i| interaction::get_tab_index(i) >= 0)
        .collect()
}

// =============================================================================
// FOCUS NAVIGATION
// =============================================================================

/// Find next focusable component
fn find_next_focusable(from_index: i32, direction: i32) -> i32 {
    let focusables = get_tab_cycle_indices();

    if focusables.is_empty() {
        return -1;
    }

    let current_pos = if from_index >= 0 {
        focusables.iter().position(|&i| i == from_index as usize)
    } else {
        None
    };

    match current_pos {
        None => {
            // Not currently focused on a focusable
            if direction == 1 {
                focusables[0] as i32
            } else {
                focusables[focusables.len() - 1] as i32
            }
        }
        Some(pos) => {
            // Move in direction with wrap
            let len = focusables.len() as i32;
            let next_pos = ((pos as i32 + direction) % len + len) % len;
            focusables[next_pos as usize] as i32
        }
    }
}

/// Move focus to next focusable component
pub fn focus_next() -> bool {
    let current = get_focused_index();
    let next = find_next_focusable(current, 1);
    if next != -1 && next != current {
        save_focus_to_history();
        set_focus_with_callbacks(next);
        return true;
    }
    false
}

/// Move focus to previous focusable component
pub fn focus_previous() -> bool {
    let current = get_focused_index();
    let prev = find_next_focusable(current, -1);
    if prev != -1 && prev != current {
        save_focus_to_history();
        set_focus_with_callbacks(prev);
        return true;
    }
    false
}

/// Focus a specific component by index
pub fn focus(index: usize) -> bool {
    let is_visible = core::get_visible(index);
    let is_focusable = interaction::get_effective_focusable(index);

    if is_focusable && is_visible && allowed_by_trap(index) {
        let current = get_focused_index();
        if current != index as i32 {
            save_focus_to_history();
            set_focus_with_callbacks(index as i32);
        }
        return true;
    }
    false
}

/// Clear focus (no component focused)
pub fn blur() {
    if get_focused_index() >= 0 {
        save_focus_to_history();
        set_focus_with_callbacks(-1);
    }
}

/// Focus the first focusable component
pub fn focus_first() -> bool {
    let focusables = get_focusable_indices();
    if !focusables.is_empty() {
        return focus(focusables[0]);
    }
    false
}

/// Focus the last focusable component
pub fn focus_last() -> bool {
    let focusables = get_focusable_indices();
    if !focusables.is_empty() {
        return focus(focusables[focusables.len() - 1]);
    }
    false
}

// =============================================================================
// RESET (for testing)
// =============================================================================

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    set_focus_with_callbacks(-1);
    FOCUS_TRAP_STACK.with(|stack| stack.borrow_mut().clear());
    FOCUS_HISTORY.with(|history| history.borrow_mut().clear());
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================
