//! The interpreter context.
//!
//! One explicitly constructed [`Context`] replaces process-wide state: it
//! owns the interner handle, the canonical Nil, the type registry, the
//! configuration and the call depth counter. Every value operation takes it
//! by reference.

use std::cell::Cell;

use vesper_ir::{Name, SharedInterner};

use crate::config::{ContextConfig, RedefinitionPolicy};
use crate::errors::{call_depth_exceeded, EvalError, EvalResult};
use crate::types::TypeRegistry;
use crate::value::{dump_list, spread_into, Int, Nil, Seq, Splat, Symbol, Value};
use crate::Scope;

/// Evaluation context.
///
/// Not `Sync`: a context and the values it creates belong to one thread.
pub struct Context {
    interner: SharedInterner,
    types: TypeRegistry,
    nil: Value,
    config: ContextConfig,
    depth: Cell<usize>,
}

impl Context {
    /// Context with a fresh interner and default configuration.
    pub fn new() -> Self {
        ContextBuilder::new().build()
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    // Interning

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn resolve(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    // Value factories

    /// The canonical Nil.
    #[inline]
    pub fn nil(&self) -> Value {
        self.nil.clone()
    }

    pub fn sym(&self, name: &str) -> Value {
        self.symbol(self.intern(name))
    }

    pub fn symbol(&self, name: Name) -> Value {
        Value::new(Symbol::new(name))
    }

    pub fn int(&self, value: i64) -> Value {
        Value::new(Int::new(value))
    }

    pub fn seq(&self, items: Vec<Value>) -> Value {
        Value::new(Seq::new(items))
    }

    pub fn splat(&self, inner: Value) -> Value {
        Splat::wrap(inner)
    }

    // Collaborators

    #[inline]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// A new root scope using the configured redefinition policy.
    pub fn root_scope(&self) -> Scope {
        Scope::root(self.config.redefinition)
    }

    // Rendering

    /// Dump `value` into a new string.
    ///
    /// Nothing is returned unless the whole dump succeeds.
    pub fn dump_string(&self, value: &Value) -> Result<String, EvalError> {
        let mut out = String::new();
        value.dump(self, &mut out)?;
        Ok(out)
    }

    /// Dump `items` as a sequence, `(a b c)`.
    pub fn render_seq(&self, items: &[Value]) -> Result<String, EvalError> {
        let mut out = String::new();
        dump_list(self, items, &mut out)?;
        Ok(out)
    }

    // Calling

    /// Evaluate `raw_args` in `scope`, spread splats, then call `callee`.
    #[tracing::instrument(level = "debug", skip_all, fields(argc = raw_args.len()))]
    pub fn apply(&self, callee: &Value, raw_args: &[Value], scope: &Scope) -> EvalResult {
        let mut args = Vec::with_capacity(raw_args.len());
        for raw in raw_args {
            spread_into(raw.eval(self, scope)?, &mut args);
        }
        callee.call(self, &args, scope)
    }

    /// Count one procedure call against the depth limit.
    ///
    /// The returned guard releases the slot when dropped.
    pub fn enter_call(&self) -> Result<CallGuard<'_>, EvalError> {
        let depth = self.depth.get();
        let limit = self.config.max_call_depth;
        if depth >= limit {
            tracing::debug!(limit, "call depth exceeded");
            return Err(call_depth_exceeded(limit));
        }
        self.depth.set(depth + 1);
        Ok(CallGuard { depth: &self.depth })
    }

    /// Number of procedure calls currently active.
    pub fn call_depth(&self) -> usize {
        self.depth.get()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Active call slot, released on drop (also during unwinding).
#[must_use = "the call slot is released as soon as the guard is dropped"]
pub struct CallGuard<'cx> {
    depth: &'cx Cell<usize>,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Builder for [`Context`].
#[derive(Default)]
pub struct ContextBuilder {
    interner: Option<SharedInterner>,
    config: ContextConfig,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from [`ContextConfig::from_env`]; later setters still win.
    pub fn from_env() -> Self {
        Self::new().config(ContextConfig::from_env())
    }

    /// Share an existing interner, so symbols agree across contexts.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn redefinition(mut self, policy: RedefinitionPolicy) -> Self {
        self.config.redefinition = policy;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Context {
        let interner = self.interner.unwrap_or_default();
        let types = TypeRegistry::new(&interner);
        tracing::debug!(
            max_call_depth = self.config.max_call_depth,
            redefinition = ?self.config.redefinition,
            "context created"
        );
        Context {
            interner,
            types,
            nil: Value::new(Nil),
            config: self.config,
            depth: Cell::new(0),
        }
    }
}
