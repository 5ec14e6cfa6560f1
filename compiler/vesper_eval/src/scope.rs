//! Lexical scopes.
//!
//! A scope is a chain of frames. Binding always targets the innermost
//! frame; lookup walks outward through the parents. Each frame holds a
//! counted reference to its parent and parents never point at their
//! children, so chains cannot form cycles.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vesper_ir::Name;

use crate::config::RedefinitionPolicy;
use crate::errors::{cannot_redefine, EvalError};
use crate::{Context, Value};

struct Frame {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Scope>,
    policy: RedefinitionPolicy,
}

/// Shared handle to a scope frame.
///
/// Cloning the handle shares the frame: a binding made through one clone is
/// visible through every other.
#[derive(Clone)]
pub struct Scope(Rc<RefCell<Frame>>);

impl Scope {
    /// Create a scope with no parent.
    pub fn root(policy: RedefinitionPolicy) -> Self {
        Scope::with_frame(Frame {
            bindings: FxHashMap::default(),
            parent: None,
            policy,
        })
    }

    fn with_frame(frame: Frame) -> Self {
        Scope(Rc::new(RefCell::new(frame)))
    }

    /// Create an empty child frame. The child inherits this scope's policy.
    pub fn child(&self) -> Scope {
        Scope::with_frame(Frame {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
            policy: self.policy(),
        })
    }

    pub fn parent(&self) -> Option<Scope> {
        self.0.borrow().parent.clone()
    }

    #[inline]
    pub fn policy(&self) -> RedefinitionPolicy {
        self.0.borrow().policy
    }

    /// Bind `name` in the innermost frame.
    ///
    /// Under [`RedefinitionPolicy::Forbid`] an existing local binding fails
    /// with "cannot redefine"; bindings in outer frames are always shadowed.
    pub fn bind(&self, cx: &Context, name: Name, value: Value) -> Result<(), EvalError> {
        let mut frame = self.0.borrow_mut();
        if frame.policy == RedefinitionPolicy::Forbid && frame.bindings.contains_key(&name) {
            return Err(cannot_redefine(cx.resolve(name)));
        }
        tracing::trace!(name = cx.resolve(name), "bind");
        frame.bindings.insert(name, value);
        Ok(())
    }

    /// Find the innermost binding of `name`.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let frame = current.0.borrow();
                if let Some(value) = frame.bindings.get(&name) {
                    return Some(value.clone());
                }
                frame.parent.clone()
            };
            current = parent?;
        }
    }

    /// Number of bindings in this frame.
    pub fn local_len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    /// Number of frames above this one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(scope) = current {
            depth += 1;
            current = scope.parent();
        }
        depth
    }

    /// Returns `true` if both handles share one frame.
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::root(RedefinitionPolicy::default())
    }
}

// Bound values may close over this scope; print the shape only.
impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("locals", &self.local_len())
            .field("depth", &self.depth())
            .field("policy", &self.policy())
            .finish()
    }
}
