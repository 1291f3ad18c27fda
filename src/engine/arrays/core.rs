//! Core component arrays.
//!
//! The most fundamental per-component arrays:
//! - componentType: what kind of component (box, text, input)
//! - parentIndex / firstChild / prevSibling / nextSibling: hierarchy links
//! - visible: is the component rendered
//! - componentId: component ID string
//!
//! The hierarchy links are maintained alongside `parentIndex` so that
//! `registry::release_index` can walk a node's children in O(children)
//! instead of scanning every allocated index.

use std::cell::RefCell;

use crate::reactive::TrackedSlotArray;
use crate::types::ComponentType;

thread_local! {
    /// Component type (box, text, input) - stores values directly (not reactive).
    static COMPONENT_TYPE: RefCell<Vec<ComponentType>> = RefCell::new(Vec::new());

    /// Parent component index (None for root).
    static PARENT_INDEX: TrackedSlotArray<Option<usize>> = TrackedSlotArray::new(Some(None));

    /// Is component visible (false = hidden).
    static VISIBLE: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(true));

    /// Component ID (for debugging and lookups).
    static COMPONENT_ID: TrackedSlotArray<String> = TrackedSlotArray::new(Some(String::new()));

    /// First child of this index, in insertion order (None if childless).
    /// Not reactive — hierarchy structure is walked by the registry, not
    /// read by deriveds/effects.
    static FIRST_CHILD: RefCell<Vec<Option<usize>>> = RefCell::new(Vec::new());

    /// Previous sibling under the same parent (None if first child).
    static PREV_SIBLING: RefCell<Vec<Option<usize>>> = RefCell::new(Vec::new());

    /// Next sibling under the same parent (None if last child).
    static NEXT_SIBLING: RefCell<Vec<Option<usize>>> = RefCell::new(Vec::new());
}

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ComponentType::None);
        }
    });
    PARENT_INDEX.with(|arr| { let _ = arr.peek(index); });
    VISIBLE.with(|arr| { let _ = arr.peek(index); });
    COMPONENT_ID.with(|arr| { let _ = arr.peek(index); });

    FIRST_CHILD.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(None);
        }
    });
    PREV_SIBLING.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(None);
        }
    });
    NEXT_SIBLING.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(None);
        }
    });
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        if index < arr.len() {
            arr[index] = ComponentType::None;
        }
    });

    PARENT_INDEX.with(|arr| arr.clear(index));
    VISIBLE.with(|arr| arr.clear(index));
    COMPONENT_ID.with(|arr| arr.clear(index));

    FIRST_CHILD.with(|arr| {
        let mut arr = arr.borrow_mut();
        if index < arr.len() {
            arr[index] = None;
        }
    });
    PREV_SIBLING.with(|arr| {
        let mut arr = arr.borrow_mut();
        if index < arr.len() {
            arr[index] = None;
        }
    });
    NEXT_SIBLING.with(|arr| {
        let mut arr = arr.borrow_mut();
        if index < arr.len() {
            arr[index] = None;
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    COMPONENT_TYPE.with(|arr| arr.borrow_mut().clear());
    PARENT_INDEX.with(|arr| arr.clear_all());
    VISIBLE.with(|arr| arr.clear_all());
    COMPONENT_ID.with(|arr| arr.clear_all());
    FIRST_CHILD.with(|arr| arr.borrow_mut().clear());
    PREV_SIBLING.with(|arr| arr.borrow_mut().clear());
    NEXT_SIBLING.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Component Type
// =============================================================================

pub fn get_component_type(index: usize) -> ComponentType {
    COMPONENT_TYPE.with(|arr| arr.borrow().get(index).copied().unwrap_or(ComponentType::None))
}

pub fn set_component_type(index: usize, value: ComponentType) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ComponentType::None);
        }
        arr[index] = value;
    });
}

// =============================================================================
// Parent Index / Hierarchy
// =============================================================================

/// Get parent index at index (reactive - tracks this index).
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.get(index)).flatten()
}

fn link_child(parent: usize, child: usize) {
    ensure_capacity(parent);
    ensure_capacity(child);
    let old_head = FIRST_CHILD.with(|arr| arr.borrow()[parent]);
    if let Some(head) = old_head {
        PREV_SIBLING.with(|arr| arr.borrow_mut()[head] = Some(child));
    }
    NEXT_SIBLING.with(|arr| arr.borrow_mut()[child] = old_head);
    PREV_SIBLING.with(|arr| arr.borrow_mut()[child] = None);
    FIRST_CHILD.with(|arr| arr.borrow_mut()[parent] = Some(child));
}

fn unlink_child(parent: usize, child: usize) {
    let (prev, next) = (
        PREV_SIBLING.with(|arr| arr.borrow()[child]),
        NEXT_SIBLING.with(|arr| arr.borrow()[child]),
    );
    match prev {
        Some(p) => NEXT_SIBLING.with(|arr| arr.borrow_mut()[p] = next),
        None => FIRST_CHILD.with(|arr| arr.borrow_mut()[parent] = next),
    }
    if let Some(n) = next {
        PREV_SIBLING.with(|arr| arr.borrow_mut()[n] = prev);
    }
    PREV_SIBLING.with(|arr| arr.borrow_mut()[child] = None);
    NEXT_SIBLING.with(|arr| arr.borrow_mut()[child] = None);
}

/// Set parent index at index, maintaining the sibling-linked-list hierarchy
/// so children of any node can be enumerated in O(children).
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    ensure_capacity(index);
    let old_parent = get_parent_index(index);
    if old_parent == parent {
        return;
    }
    if let Some(old) = old_parent {
        unlink_child(old, index);
    }
    PARENT_INDEX.with(|arr| arr.set_value(index, parent));
    if let Some(new_parent) = parent {
        link_child(new_parent, index);
    }
}

/// Set parent index from a getter function. Note: getter-bound parents do
/// not participate in the sibling-linked-list hierarchy, since the
/// hierarchy is only updated on explicit `set_parent_index` calls.
pub fn set_parent_index_getter<F>(index: usize, getter: F)
where
    F: Fn() -> Option<usize> + 'static,
{
    PARENT_INDEX.with(|arr| arr.set_getter(index, getter));
}

/// Enumerate the direct children of `index` in insertion order. O(children).
pub fn get_children(index: usize) -> Vec<usize> {
    let mut result = Vec::new();
    let mut current = FIRST_CHILD.with(|arr| arr.borrow().get(index).copied().flatten());
    while let Some(child) = current {
        result.push(child);
        current = NEXT_SIBLING.with(|arr| arr.borrow()[child]);
    }
    result
}

// =============================================================================
// Visible
// =============================================================================

pub fn get_visible(index: usize) -> bool {
    VISIBLE.with(|arr| arr.get(index)).unwrap_or(true)
}

pub fn set_visible(index: usize, visible: bool) {
    VISIBLE.with(|arr| arr.set_value(index, visible));
}

pub fn set_visible_getter<F>(index: usize, getter: F)
where
    F: Fn() -> bool + 'static,
{
    VISIBLE.with(|arr| arr.set_getter(index, getter));
}

pub fn set_visible_signal(index: usize, sig: crate::reactive::Signal<bool>) {
    VISIBLE.with(|arr| arr.set_signal(index, sig));
}

// =============================================================================
// Component ID
// =============================================================================

pub fn get_component_id(index: usize) -> String {
    COMPONENT_ID.with(|arr| arr.get(index)).unwrap_or_default()
}

pub fn set_component_id(index: usize, id: String) {
    COMPONENT_ID.with(|arr| arr.set_value(index, id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset();
    }

    #[test]
    fn test_component_type() {
        setup();
        set_component_type(0, ComponentType::Box);
        set_component_type(1, ComponentType::Text);
        assert_eq!(get_component_type(0), ComponentType::Box);
        assert_eq!(get_component_type(1), ComponentType::Text);
        assert_eq!(get_component_type(99), ComponentType::None);
    }

    #[test]
    fn test_parent_index() {
        setup();
        set_parent_index(1, Some(0));
        set_parent_index(2, Some(0));
        set_parent_index(3, Some(1));

        assert_eq!(get_parent_index(0), None);
        assert_eq!(get_parent_index(1), Some(0));
        assert_eq!(get_parent_index(2), Some(0));
        assert_eq!(get_parent_index(3), Some(1));
    }

    #[test]
    fn test_children_enumeration_order() {
        setup();
        set_parent_index(1, Some(0));
        set_parent_index(2, Some(0));
        set_parent_index(3, Some(0));

        assert_eq!(get_children(0), vec![3, 2, 1]);
    }

    #[test]
    fn test_reparent_unlinks_from_old_parent() {
        setup();
        set_parent_index(1, Some(0));
        set_parent_index(2, Some(0));

        set_parent_index(1, Some(5));

        assert_eq!(get_children(0), vec![2]);
        assert_eq!(get_children(5), vec![1]);
    }

    #[test]
    fn test_unlink_middle_child_preserves_siblings() {
        setup();
        set_parent_index(1, Some(0));
        set_parent_index(2, Some(0));
        set_parent_index(3, Some(0));
        // children of 0, in insertion order reversed: [3, 2, 1]

        set_parent_index(2, None);

        assert_eq!(get_children(0), vec![3, 1]);
    }

    #[test]
    fn test_visible() {
        setup();
        assert!(get_visible(0));
        set_visible(0, false);
        assert!(!get_visible(0));
        set_visible(0, true);
        assert!(get_visible(0));
    }

    #[test]
    fn test_clear_at_index() {
        setup();
        set_component_type(0, ComponentType::Box);
        set_parent_index(0, Some(5));
        set_visible(0, false);

        clear_at_index(0);

        assert_eq!(get_component_type(0), ComponentType::None);
        assert_eq!(get_parent_index(0), None);
        assert!(get_visible(0));
    }
}
