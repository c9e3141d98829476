//! Shared state threaded through a single bind.

use std::cell::RefCell;

use confit_value::{KeyPath, Node};

use crate::bind::error::{BindError, BindErrorKind, BindReport, Recorded};
use crate::registry::Registry;

struct BindState {
    path: KeyPath,
    errors: Vec<BindError>,
}

/// Carries the current path and the error list for one bind run.
///
/// Coercions push a path segment before descending into a child and pop
/// it on the way out, so every diagnostic they record is located without
/// any plumbing through return values.
pub struct BindContext<'r> {
    registry: &'r Registry,
    state: RefCell<BindState>,
}

impl<'r> BindContext<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        BindContext {
            registry,
            state: RefCell::new(BindState {
                path: KeyPath::root(),
                errors: Vec::new(),
            }),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn push_key(&self, key: &str) {
        self.state.borrow_mut().path.push_key(key);
    }

    pub fn push_index(&self, index: usize) {
        self.state.borrow_mut().path.push_index(index);
    }

    pub fn pop(&self) {
        self.state.borrow_mut().path.pop();
    }

    /// Records `kind` at the current path.
    pub fn fail(&self, kind: BindErrorKind) -> Recorded {
        let mut state = self.state.borrow_mut();
        let path = state.path.clone();
        state.errors.push(BindError { path, kind });
        Recorded
    }

    /// Records a type mismatch, naming the node's actual type.
    pub fn mismatch(&self, expected: impl Into<String>, node: &Node) -> Recorded {
        self.fail(BindErrorKind::TypeMismatch {
            expected: expected.into(),
            actual: node.type_name().to_owned(),
        })
    }

    /// Consumes the context; `Err` carries every recorded diagnostic.
    pub fn finish(self) -> Result<(), BindReport> {
        let state = self.state.into_inner();
        if state.errors.is_empty() {
            Ok(())
        } else {
            Err(BindReport::new(state.errors))
        }
    }
}
