use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{bump_clock, track_probe, Derived, Signal};

/// Where a `Slot`'s value currently comes from.
pub enum SlotSource<T> {
    Literal(T),
    Signal(Signal<T>),
    Derived(Derived<T>),
    Getter(Rc<dyn Fn() -> T>),
}

struct SlotInner<T> {
    source: SlotSource<T>,
    /// Version bumped whenever the source itself is replaced, or when a
    /// `Literal` value is overwritten. Reads against a `Literal` source
    /// track this cell directly; `Signal`/`Derived`/`Getter` sources are
    /// transparent (tracking happens through whatever they read).
    own_version: Rc<Cell<u64>>,
}

/// A single reactive cell that can be bound to a plain value, a signal,
/// a derived, or an arbitrary getter closure — the binding can be
/// swapped at any time via `set_value`/`set_signal`/`set_getter`.
///
/// This is the building block both for individual component properties
/// (flex layout fields) and, as the element type of `TrackedSlotArray`,
/// for per-index fine-grained tracking in the parallel-array stores.
pub struct Slot<T: Clone + 'static> {
    inner: Rc<RefCell<SlotInner<T>>>,
}

impl<T: Clone + 'static> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Create a new slot bound to a literal value.
pub fn slot<T: Clone + 'static>(initial: T) -> Slot<T> {
    Slot::new(initial)
}

impl<T: Clone + 'static> Slot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotInner {
                source: SlotSource::Literal(initial),
                own_version: Rc::new(Cell::new(1)),
            })),
        }
    }

    /// Read the current value, recording whatever dependency applies.
    pub fn get(&self) -> T {
        let inner = self.inner.borrow();
        match &inner.source {
            SlotSource::Literal(v) => {
                let version = inner.own_version.clone();
                track_probe(Box::new(move || version.get()));
                v.clone()
            }
            SlotSource::Signal(s) => s.get(),
            SlotSource::Derived(d) => d.get(),
            SlotSource::Getter(f) => f(),
        }
    }

    /// Read without recording a dependency.
    pub fn peek(&self) -> T {
        let inner = self.inner.borrow();
        match &inner.source {
            SlotSource::Literal(v) => v.clone(),
            SlotSource::Signal(s) => s.peek(),
            SlotSource::Derived(d) => d.peek(),
            SlotSource::Getter(f) => f(),
        }
    }

    fn bump_own(&self) {
        let inner = self.inner.borrow();
        inner.own_version.set(bump_clock());
    }

    /// Bind to a literal value.
    pub fn set_value(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.source = SlotSource::Literal(value);
        drop(inner);
        self.bump_own();
    }

    /// Bind to a signal (transparent — tracked via the signal itself).
    pub fn set_signal(&self, sig: Signal<T>) {
        self.inner.borrow_mut().source = SlotSource::Signal(sig);
        self.bump_own();
    }

    /// Bind to a derived (transparent — tracked via the derived itself).
    pub fn set_derived(&self, d: Derived<T>) {
        self.inner.borrow_mut().source = SlotSource::Derived(d);
        self.bump_own();
    }

    /// Bind to an arbitrary getter closure. Any reactive reads the
    /// closure performs are tracked transparently through it.
    pub fn set_getter(&self, f: impl Fn() -> T + 'static) {
        self.inner.borrow_mut().source = SlotSource::Getter(Rc::new(f));
        self.bump_own();
    }

    /// Reset this slot back to a literal default value.
    pub fn clear(&self, default: T) {
        self.set_value(default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{derived, signal};

    #[test]
    fn test_slot_literal() {
        let s = slot(5);
        assert_eq!(s.get(), 5);
        s.set_value(10);
        assert_eq!(s.get(), 10);
    }

    #[test]
    fn test_slot_signal_transparent_tracking() {
        let sig = signal(1);
        let s = slot(0);
        s.set_signal(sig.clone());
        assert_eq!(s.get(), 1);

        let s2 = s.clone();
        let d = derived(move || s2.get() * 10);
        assert_eq!(d.get(), 10);
        sig.set(5);
        assert_eq!(d.get(), 50);
    }

    #[test]
    fn test_slot_getter() {
        let sig = signal(3);
        let s = slot(0);
        let sig2 = sig.clone();
        s.set_getter(move || sig2.get() + 1);
        assert_eq!(s.get(), 4);
        sig.set(10);
        assert_eq!(s.get(), 11);
    }
}
