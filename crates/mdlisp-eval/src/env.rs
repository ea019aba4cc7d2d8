//! Lexical environments for the mdlisp evaluator.

use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// One scope in the environment chain.
///
/// Frames are shared through `Rc`: a call frame normally dies when the call
/// returns, but lives on while a closure created inside it is reachable.
/// Parents are only ever read; `define` writes to the frame it is called on.
#[derive(Debug, Default)]
pub struct Environment {
    parent: Option<Rc<Environment>>,
    bindings: RefCell<BTreeMap<String, Value>>,
}

impl Environment {
    /// A new root scope with no parent.
    pub fn global() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A new empty scope whose lookups fall back to `parent`.
    pub fn child(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(Rc::clone(parent)),
            bindings: RefCell::new(BTreeMap::new()),
        })
    }

    /// Resolve `name`, searching from this scope outward.
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        let mut scope = Some(self);
        while let Some(env) = scope {
            if let Some(value) = env.bindings.borrow().get(name) {
                return Ok(value.clone());
            }
            scope = env.parent.as_deref();
        }
        Err(EvalError::UndefinedSymbol(name.to_string()))
    }

    /// Bind `name` in this scope, replacing any previous local binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Whether this scope itself (not a parent) binds `name`.
    pub fn is_bound_locally(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    pub fn parent(&self) -> Option<&Rc<Environment>> {
        self.parent.as_ref()
    }

    /// Drop every local binding.
    ///
    /// The global scope holds closures that point back at it; clearing it
    /// at the end of a run breaks that cycle so both can be freed.
    pub fn clear(&self) {
        self.bindings.borrow_mut().clear();
    }
}
