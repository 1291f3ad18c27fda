use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use super::{bump_clock, notify_write, track_probe};

struct Inner<T> {
    items: HashSet<T>,
    version: Cell<u64>,
}

/// A `HashSet` that records a reactive dependency on `.iter()`/`.len()`/
/// `.is_empty()` and bumps its version on any mutation, so a `Derived`
/// or `Effect` that enumerates the set automatically reruns when
/// membership changes.
pub struct ReactiveSet<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Eq + Hash + Clone + 'static> Default for ReactiveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone + 'static> ReactiveSet<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner { items: HashSet::new(), version: Cell::new(1) })),
        }
    }

    fn touch(&self) {
        let inner = self.inner.borrow();
        inner.version.set(super::current_clock());
        let _ = bump_clock();
        notify_write();
    }

    fn track(&self) {
        let inner = self.inner.clone();
        track_probe(Box::new(move || inner.borrow().version.get()));
    }

    pub fn insert(&self, value: T) -> bool {
        let inserted = self.inner.borrow_mut().items.insert(value);
        if inserted {
            self.touch();
        }
        inserted
    }

    pub fn remove(&self, value: &T) -> bool {
        let removed = self.inner.borrow_mut().items.remove(value);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn contains(&self, value: &T) -> bool {
        self.track();
        self.inner.borrow().items.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.track();
        self.inner.borrow().items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.track();
        self.inner.borrow().items.len()
    }

    pub fn iter(&self) -> Vec<T> {
        self.track();
        self.inner.borrow().items.iter().cloned().collect()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        let had_items = !inner.items.is_empty();
        inner.items.clear();
        drop(inner);
        if had_items {
            self.touch();
        }
    }
}

impl<T> Clone for ReactiveSet<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::derived;

    #[test]
    fn test_insert_remove_contains() {
        let set: ReactiveSet<usize> = ReactiveSet::new();
        assert!(!set.contains(&1));
        set.insert(1);
        assert!(set.contains(&1));
        set.remove(&1);
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_derived_reacts_to_membership_change() {
        let set: ReactiveSet<usize> = ReactiveSet::new();
        let set2 = set.clone();
        let d = derived(move || set2.len());
        assert_eq!(d.get(), 0);
        set.insert(1);
        assert_eq!(d.get(), 1);
        set.insert(2);
        assert_eq!(d.get(), 2);
        set.remove(&1);
        assert_eq!(d.get(), 1);
    }
}
