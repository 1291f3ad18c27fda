//! Minimal single-threaded reactive runtime.
//!
//! Provides the primitives the rest of the crate is built on: `Signal`,
//! `Derived`, `Effect`, `Scope`, `batch`, `untracked` and a `ReactiveSet`
//! for tracked collection membership. Everything here is thread-local and
//! `Rc`-based — the engine as a whole runs on a single thread.
//!
//! # Model
//!
//! Every signal carries a `version: u64` stamped from a global logical
//! clock whenever it is written. A `Derived` lazily recomputes on `.get()`
//! by recursively checking whether any of its recorded dependencies'
//! versions have advanced past the version captured at the last
//! recompute. If a recompute produces a value equal (by `PartialEq`) to
//! the cached one, the derived's own version does not advance — so
//! propagation stops there and downstream readers see no change.
//!
//! Effects can't be pulled (nobody reads their "value"), so they're
//! tracked in a global registry and walked at the end of every
//! non-batched write (or at the end of an outermost `batch`). Each walk
//! asks every live effect whether its dependencies are stale, using the
//! same version check a derived uses, and reruns the ones that are.

mod signal;
mod derived;
mod effect;
mod scope;
mod reactive_set;
mod slot;
mod tracked_array;

pub use signal::{signal, Signal};
pub use derived::{derived, Derived};
pub use effect::{effect, on_cleanup};
pub use scope::{create_scope, current_scope, Scope};
pub use reactive_set::ReactiveSet;
pub use slot::{slot, Slot, SlotSource};
pub use tracked_array::TrackedSlotArray;

use std::cell::{Cell, RefCell};

thread_local! {
    static CLOCK: Cell<u64> = Cell::new(1);
    static BATCH_DEPTH: Cell<u32> = Cell::new(0);
    static TRACKER_STACK: RefCell<Vec<Vec<Box<dyn Fn() -> u64>>>> = RefCell::new(Vec::new());
}

/// Advance and return the global logical clock. Every write to a literal
/// (signal or literal slot) gets a fresh, strictly increasing stamp.
pub(crate) fn bump_clock() -> u64 {
    CLOCK.with(|c| {
        let v = c.get() + 1;
        c.set(v);
        v
    })
}

pub(crate) fn current_clock() -> u64 {
    CLOCK.with(|c| c.get())
}

/// Record a dependency on the current tracking frame, if one is active.
/// `probe` returns the dependency's current version on demand.
pub(crate) fn track_probe(probe: Box<dyn Fn() -> u64>) {
    TRACKER_STACK.with(|stack| {
        if let Some(frame) = stack.borrow_mut().last_mut() {
            frame.push(probe);
        }
    });
}

/// Run `f` while collecting every dependency it reads, returning
/// `(result, probes)`.
pub(crate) fn track<T>(f: impl FnOnce() -> T) -> (T, Vec<Box<dyn Fn() -> u64>>) {
    TRACKER_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    let result = f();
    let probes = TRACKER_STACK.with(|stack| stack.borrow_mut().pop().unwrap_or_default());
    (result, probes)
}

/// Like `track`, but catches a panic inside `f` instead of letting it
/// unwind through the tracking frame. Used by the effect scheduler so one
/// effect body panicking doesn't corrupt the tracker stack for (or skip)
/// every other effect in the same flush. Dependencies recorded up to the
/// panic are still returned, matching the "dependencies recorded up to the
/// throw still apply" requirement for failed effects.
pub(crate) fn try_track<T>(
    f: impl FnOnce() -> T,
) -> (std::thread::Result<T>, Vec<Box<dyn Fn() -> u64>>) {
    TRACKER_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    let probes = TRACKER_STACK.with(|stack| stack.borrow_mut().pop().unwrap_or_default());
    (result, probes)
}

/// Run `f` without recording any dependencies, even if called inside a
/// tracking context (a derived's compute fn, an effect body, etc).
pub fn untracked<T>(f: impl FnOnce() -> T) -> T {
    TRACKER_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    let result = f();
    TRACKER_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
    result
}

/// Coalesce effect reruns: writes inside `f` update signal values and
/// versions immediately, but effects only get flushed once, after `f`
/// returns (or after the outermost `batch` in a nested call returns).
pub fn batch<T>(f: impl FnOnce() -> T) -> T {
    BATCH_DEPTH.with(|d| d.set(d.get() + 1));
    let result = f();
    let depth = BATCH_DEPTH.with(|d| {
        let v = d.get() - 1;
        d.set(v);
        v
    });
    if depth == 0 {
        effect::flush_effects();
    }
    result
}

pub(crate) fn is_batching() -> bool {
    BATCH_DEPTH.with(|d| d.get() > 0)
}

pub(crate) fn notify_write() {
    if !is_batching() {
        effect::flush_effects();
    }
}
