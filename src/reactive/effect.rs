use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::scope::current_scope;
use super::try_track;

struct EffectState {
    body: RefCell<Box<dyn FnMut() -> Option<Box<dyn FnOnce()>>>>,
    cleanup: RefCell<Option<Box<dyn FnOnce()>>>,
    deps: RefCell<Vec<(Box<dyn Fn() -> u64>, u64)>>,
    disposed: RefCell<bool>,
}

thread_local! {
    static EFFECTS: RefCell<Vec<Weak<EffectState>>> = RefCell::new(Vec::new());
}

fn is_stale(state: &EffectState) -> bool {
    let deps = state.deps.borrow();
    deps.is_empty() || deps.iter().any(|(probe, captured)| probe() != *captured)
}

fn run(state: &Rc<EffectState>) {
    if *state.disposed.borrow() {
        return;
    }
    if let Some(cleanup) = state.cleanup.borrow_mut().take() {
        cleanup();
    }
    let (outcome, probes) = try_track(|| (state.body.borrow_mut())());
    let deps: Vec<(Box<dyn Fn() -> u64>, u64)> =
        probes.into_iter().map(|p| { let v = p(); (p, v) }).collect();
    *state.deps.borrow_mut() = deps;
    match outcome {
        Ok(new_cleanup) => {
            *state.cleanup.borrow_mut() = new_cleanup;
        }
        Err(payload) => {
            // Caught so one misbehaving effect can't unwind through
            // `flush_effects()` and skip every other effect due to rerun
            // in this flush (the root render effect included). Dependencies
            // recorded up to the panic still apply; there's no cleanup to
            // carry forward since the body never returned one.
            *state.cleanup.borrow_mut() = None;
            log::error!("effect body panicked: {}", panic_message(&payload));
        }
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Re-run every live effect whose dependencies have gone stale.
///
/// Called at the end of every non-batched write, and once after the
/// outermost `batch` closure returns.
pub(crate) fn flush_effects() {
    let effects: Vec<Rc<EffectState>> =
        EFFECTS.with(|e| e.borrow().iter().filter_map(Weak::upgrade).collect());
    for state in &effects {
        if !*state.disposed.borrow() && is_stale(state) {
            run(state);
        }
    }
    // Periodically drop dead weak refs so the registry doesn't grow forever.
    EFFECTS.with(|e| e.borrow_mut().retain(|w| w.strong_count() > 0));
}

/// Register a reactive effect. The body runs immediately, and again
/// whenever any signal/derived it read last time changes. Returning
/// `Some(cleanup)` from the body registers a cleanup that runs before
/// the next rerun and on disposal.
///
/// Returns a disposer closure that stops the effect; it is also
/// automatically registered as a cleanup on the enclosing `Scope`, if
/// any is active.
pub fn effect(mut body: impl FnMut() + 'static) -> impl FnOnce() {
    effect_with_cleanup(move || {
        body();
        None
    })
}

/// Like `effect`, but the body can return a cleanup closure run before
/// each rerun and on disposal.
pub fn effect_with_cleanup(
    body: impl FnMut() -> Option<Box<dyn FnOnce()>> + 'static,
) -> impl FnOnce() {
    let state = Rc::new(EffectState {
        body: RefCell::new(Box::new(body)),
        cleanup: RefCell::new(None),
        deps: RefCell::new(Vec::new()),
        disposed: RefCell::new(false),
    });
    EFFECTS.with(|e| e.borrow_mut().push(Rc::downgrade(&state)));
    run(&state);

    let stop_state = state.clone();
    let stop = move || {
        *stop_state.disposed.borrow_mut() = true;
        if let Some(cleanup) = stop_state.cleanup.borrow_mut().take() {
            cleanup();
        }
    };

    if let Some(scope) = current_scope() {
        let dispose_state = state.clone();
        scope.on_cleanup(move || {
            *dispose_state.disposed.borrow_mut() = true;
            if let Some(cleanup) = dispose_state.cleanup.borrow_mut().take() {
                cleanup();
            }
        });
    }

    stop
}

/// Register a cleanup callback on the current scope, if one is active.
/// A no-op if called outside any scope.
pub fn on_cleanup(f: impl FnOnce() + 'static) {
    if let Some(scope) = current_scope() {
        scope.on_cleanup(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{batch, signal};
    use std::cell::Cell;

    #[test]
    fn test_effect_runs_immediately() {
        let ran = Rc::new(Cell::new(false));
        let ran2 = ran.clone();
        let _stop = effect(move || ran2.set(true));
        assert!(ran.get());
    }

    #[test]
    fn test_effect_reruns_on_dependency_change() {
        let s = signal(0);
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let s2 = s.clone();
        let _stop = effect(move || {
            s2.get();
            count2.set(count2.get() + 1);
        });
        assert_eq!(count.get(), 1);
        s.set(1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_effect_cleanup_runs_before_rerun() {
        let s = signal(0);
        let cleanups = Rc::new(Cell::new(0));
        let cleanups2 = cleanups.clone();
        let s2 = s.clone();
        let _stop = effect_with_cleanup(move || {
            s2.get();
            let cleanups3 = cleanups2.clone();
            Some(Box::new(move || cleanups3.set(cleanups3.get() + 1)) as Box<dyn FnOnce()>)
        });
        assert_eq!(cleanups.get(), 0);
        s.set(1);
        assert_eq!(cleanups.get(), 1);
    }

    #[test]
    fn test_effect_stop() {
        let s = signal(0);
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let s2 = s.clone();
        let stop = effect(move || {
            s2.get();
            count2.set(count2.get() + 1);
        });
        stop();
        s.set(5);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_batch_coalesces_reruns() {
        let a = signal(0);
        let b = signal(0);
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let (a2, b2) = (a.clone(), b.clone());
        let _stop = effect(move || {
            a2.get();
            b2.get();
            count2.set(count2.get() + 1);
        });
        assert_eq!(count.get(), 1);
        batch(|| {
            a.set(1);
            b.set(1);
        });
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_panic_on_first_run_does_not_propagate() {
        let ran = Rc::new(Cell::new(false));
        let ran2 = ran.clone();
        let _stop = effect(move || {
            ran2.set(true);
            panic!("boom on first run");
        });
        assert!(ran.get());
    }

    #[test]
    fn test_panicking_effect_does_not_abort_other_effects_in_flush() {
        let s = signal(0);
        let other_runs = Rc::new(Cell::new(0));

        // Registered first so flush_effects() has to get past it to reach
        // the effect below in the same flush.
        let s_for_panic = s.clone();
        let _panicking = effect(move || {
            if s_for_panic.get() == 1 {
                panic!("boom");
            }
        });

        let other_runs2 = other_runs.clone();
        let s_for_other = s.clone();
        let _other = effect(move || {
            s_for_other.get();
            other_runs2.set(other_runs2.get() + 1);
        });

        assert_eq!(other_runs.get(), 1);
        s.set(1);
        assert_eq!(other_runs.get(), 2);
    }
}
