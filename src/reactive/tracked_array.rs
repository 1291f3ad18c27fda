use std::cell::RefCell;

use super::{Derived, Signal, Slot};

/// A growable array of `Slot<T>`, one per entity index. Auto-expands on
/// access so callers never have to pre-size it; entries past the
/// current length behave as the default value until touched.
///
/// This is the storage used by every per-component property array
/// (`engine::arrays::*`): each index gets fine-grained reactive tracking
/// independent of every other index, so reading component 3's color
/// does not create a dependency on component 7's color.
pub struct TrackedSlotArray<T: Clone + 'static> {
    slots: RefCell<Vec<Slot<T>>>,
    default: T,
}

impl<T: Clone + 'static> TrackedSlotArray<T> {
    /// `default` is used both as the initial value of newly-created
    /// slots and as the value `clear`/`clear_all` reset to.
    pub fn new(default: Option<T>) -> Self
    where
        T: Default,
    {
        Self {
            slots: RefCell::new(Vec::new()),
            default: default.unwrap_or_default(),
        }
    }

    fn ensure_len(&self, index: usize) {
        let mut slots = self.slots.borrow_mut();
        while slots.len() <= index {
            slots.push(Slot::new(self.default.clone()));
        }
    }

    /// Ensure a slot exists at `index` and return its current value,
    /// recording a dependency (same as `get`, but named to match the
    /// teacher's capacity-priming idiom: `let _ = arr.peek(index);`).
    pub fn peek(&self, index: usize) -> T {
        self.ensure_len(index);
        self.slots.borrow()[index].peek()
    }

    pub fn get(&self, index: usize) -> T {
        self.ensure_len(index);
        self.slots.borrow()[index].get()
    }

    pub fn set_value(&self, index: usize, value: T) {
        self.ensure_len(index);
        self.slots.borrow()[index].set_value(value);
    }

    pub fn set_signal(&self, index: usize, sig: Signal<T>) {
        self.ensure_len(index);
        self.slots.borrow()[index].set_signal(sig);
    }

    pub fn set_derived(&self, index: usize, d: Derived<T>) {
        self.ensure_len(index);
        self.slots.borrow()[index].set_derived(d);
    }

    pub fn set_getter(&self, index: usize, getter: impl Fn() -> T + 'static) {
        self.ensure_len(index);
        self.slots.borrow()[index].set_getter(getter);
    }

    /// Reset the slot at `index` back to the default literal value.
    pub fn clear(&self, index: usize) {
        if index < self.slots.borrow().len() {
            self.slots.borrow()[index].set_value(self.default.clone());
        }
    }

    /// Drop every slot, freeing the backing storage entirely.
    pub fn clear_all(&self) {
        self.slots.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_expand_and_default() {
        let arr: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(7));
        assert_eq!(arr.get(0), 7);
        assert_eq!(arr.get(5), 7);
        assert_eq!(arr.len(), 6);
    }

    #[test]
    fn test_set_and_clear() {
        let arr: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(0));
        arr.set_value(2, 99);
        assert_eq!(arr.get(2), 99);
        arr.clear(2);
        assert_eq!(arr.get(2), 0);
    }

    #[test]
    fn test_clear_all_resets_length() {
        let arr: TrackedSlotArray<i32> = TrackedSlotArray::new(Some(0));
        arr.set_value(3, 5);
        arr.clear_all();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.get(3), 0);
    }
}
