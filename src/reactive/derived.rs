use std::cell::RefCell;
use std::rc::Rc;

use super::{bump_clock, track, track_probe};

struct DerivedInner<T> {
    compute: Rc<dyn Fn() -> T>,
    cached: Option<T>,
    version: u64,
    deps: Vec<(Box<dyn Fn() -> u64>, u64)>,
}

/// A memoized, lazily-recomputed value derived from other reactive
/// sources. Recomputes on `.get()` only when a dependency's version has
/// advanced past what was captured last time; if the recomputed value
/// equals the cached one, the derived's own version does not advance.
pub struct Derived<T> {
    inner: Rc<RefCell<DerivedInner<T>>>,
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Create a new derived value from a compute closure.
pub fn derived<T, F>(compute: F) -> Derived<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> T + 'static,
{
    Derived::new(compute)
}

impl<T: Clone + PartialEq + 'static> Derived<T> {
    pub fn new(compute: impl Fn() -> T + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DerivedInner {
                compute: Rc::new(compute),
                cached: None,
                version: 0,
                deps: Vec::new(),
            })),
        }
    }

    fn is_stale(&self) -> bool {
        let inner = self.inner.borrow();
        if inner.cached.is_none() {
            return true;
        }
        inner.deps.iter().any(|(probe, captured)| probe() != *captured)
    }

    fn recompute(&self) {
        let compute = self.inner.borrow().compute.clone();
        let (new_value, probes) = track(|| compute());

        let mut inner = self.inner.borrow_mut();
        let new_deps: Vec<(Box<dyn Fn() -> u64>, u64)> =
            probes.into_iter().map(|p| { let v = p(); (p, v) }).collect();
        inner.deps = new_deps;

        let changed = inner.cached.as_ref() != Some(&new_value);
        inner.cached = Some(new_value);
        if changed {
            inner.version = bump_clock();
        }
    }

    /// Read the current value, recomputing if stale, and recording a
    /// dependency on the active tracker.
    pub fn get(&self) -> T {
        if self.is_stale() {
            self.recompute();
        }
        let inner = self.inner.clone();
        track_probe(Box::new(move || inner.borrow().version));
        self.inner.borrow().cached.clone().expect("derived computed")
    }

    /// Read without recording a dependency (still recomputes if stale).
    pub fn peek(&self) -> T {
        if self.is_stale() {
            self.recompute();
        }
        self.inner.borrow().cached.clone().expect("derived computed")
    }

    pub(crate) fn version(&self) -> u64 {
        if self.is_stale() {
            self.recompute();
        }
        self.inner.borrow().version
    }
}
