use std::cell::RefCell;
use std::rc::Rc;

struct ScopeInner {
    children: RefCell<Vec<Scope>>,
    cleanups: RefCell<Vec<Box<dyn FnOnce()>>>,
    disposed: RefCell<bool>,
}

/// A disposal boundary. Scopes form a tree; disposing a scope disposes
/// its children first (depth-first), then runs its own cleanups in
/// reverse registration order. Effects created while a scope is current
/// automatically register their stop function as a cleanup.
#[derive(Clone)]
pub struct Scope(Rc<ScopeInner>);

thread_local! {
    static CURRENT: RefCell<Vec<Scope>> = RefCell::new(Vec::new());
}

/// The innermost scope currently active, if any.
pub fn current_scope() -> Option<Scope> {
    CURRENT.with(|c| c.borrow().last().cloned())
}

/// Create a new scope, nested under the currently active one (if any),
/// and run `f` with it set as current. The scope is returned so the
/// caller controls its lifetime and disposal explicitly.
pub fn create_scope(f: impl FnOnce(&Scope)) -> Scope {
    let scope = Scope(Rc::new(ScopeInner {
        children: RefCell::new(Vec::new()),
        cleanups: RefCell::new(Vec::new()),
        disposed: RefCell::new(false),
    }));

    if let Some(parent) = current_scope() {
        parent.0.children.borrow_mut().push(scope.clone());
    }

    CURRENT.with(|c| c.borrow_mut().push(scope.clone()));
    f(&scope);
    CURRENT.with(|c| {
        c.borrow_mut().pop();
    });

    scope
}

impl Scope {
    /// Register a callback to run when this scope is disposed.
    pub fn on_cleanup(&self, f: impl FnOnce() + 'static) {
        self.0.cleanups.borrow_mut().push(Box::new(f));
    }

    /// Dispose this scope: children first (recursively), then this
    /// scope's own cleanups, both in reverse registration order.
    pub fn dispose(&self) {
        if *self.0.disposed.borrow() {
            return;
        }
        *self.0.disposed.borrow_mut() = true;

        let children: Vec<Scope> = self.0.children.borrow_mut().drain(..).collect();
        for child in children.into_iter().rev() {
            child.dispose();
        }

        let cleanups: Vec<Box<dyn FnOnce()>> = self.0.cleanups.borrow_mut().drain(..).collect();
        for cleanup in cleanups.into_iter().rev() {
            cleanup();
        }
    }

    pub fn is_disposed(&self) -> bool {
        *self.0.disposed.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    #[test]
    fn test_scope_cleanup_order() {
        let log = Rc::new(StdRefCell::new(Vec::new()));
        let scope = create_scope(|s| {
            let l1 = log.clone();
            s.on_cleanup(move || l1.borrow_mut().push(1));
            let l2 = log.clone();
            s.on_cleanup(move || l2.borrow_mut().push(2));
        });
        scope.dispose();
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_nested_scope_disposes_children_first() {
        let log = Rc::new(StdRefCell::new(Vec::new()));
        let log_child = log.clone();
        let log_parent = log.clone();
        let parent = create_scope(|_| {
            create_scope(|s| {
                s.on_cleanup(move || log_child.borrow_mut().push("child"));
            });
        });
        parent.on_cleanup(move || log_parent.borrow_mut().push("parent"));
        parent.dispose();
        assert_eq!(*log.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_dispose_idempotent() {
        let count = Rc::new(std::cell::Cell::new(0));
        let count2 = count.clone();
        let scope = create_scope(|s| {
            s.on_cleanup(move || count2.set(count2.get() + 1));
        });
        scope.dispose();
        scope.dispose();
        assert_eq!(count.get(), 1);
    }
}
