//! Compiled parameter lists.

use std::fmt;

use super::{Arg, ArgKind, ArgName, Args};
use crate::errors::{arg_mismatch, variadic_not_last, EvalError};
use crate::{Context, Scope, Value};

/// Parameters with precomputed arity bounds.
///
/// Built once per callable and shared by all of its calls. `max` is `None`
/// when the list ends in a variadic parameter.
#[derive(Clone, Debug, Default)]
pub struct ArgList {
    items: Args,
    min: usize,
    max: Option<usize>,
}

impl ArgList {
    /// Compile `args`, interning pending names.
    ///
    /// A variadic parameter anywhere but last is rejected.
    pub fn new(cx: &Context, mut args: Args) -> Result<ArgList, EvalError> {
        let count = args.len();
        if let Some(pos) = args.iter().position(|arg| arg.kind == ArgKind::Variadic) {
            if pos + 1 != count {
                return Err(variadic_not_last(&args.render_string(cx)?));
            }
        }

        for arg in &mut args.0 {
            arg.name = arg.name.interned(cx);
        }

        let optional = args
            .iter()
            .filter(|arg| arg.kind == ArgKind::Optional)
            .count();
        let variadic = args.last().is_some_and(|arg| arg.kind == ArgKind::Variadic);

        let list = ArgList {
            min: count - optional - usize::from(variadic),
            max: if variadic { None } else { Some(count) },
            items: args,
        };
        tracing::debug!(min = list.min, max = ?list.max, "compiled arg list");
        Ok(list)
    }

    /// Zero-arity list.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Arg] {
        &self.items
    }

    pub fn render(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        self.items.render(cx, out)
    }

    pub fn render_string(&self, cx: &Context) -> Result<String, EvalError> {
        self.items.render_string(cx)
    }

    /// Returns `true` if `count` actual arguments are within bounds.
    #[inline]
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// Fail with "argument mismatch" unless the count is within bounds.
    pub fn check(&self, cx: &Context, actual: &[Value]) -> Result<(), EvalError> {
        if self.accepts(actual.len()) {
            return Ok(());
        }
        tracing::debug!(
            actual = actual.len(),
            min = self.min,
            max = ?self.max,
            "argument count out of range"
        );
        Err(arg_mismatch(
            &self.render_string(cx)?,
            &cx.render_seq(actual)?,
        ))
    }

    /// Append defaults for the optional parameters directly after the
    /// supplied arguments, stopping at the first other parameter.
    pub fn fill(&self, cx: &Context, actual: &mut Vec<Value>) {
        let missing = self
            .items
            .iter()
            .skip(actual.len())
            .take_while(|arg| arg.kind == ArgKind::Optional);
        for arg in missing {
            actual.push(arg.default_or_nil(cx));
        }
    }

    /// Bind every parameter into `scope`.
    ///
    /// Missing positions fall back to the parameter's default, then Nil.
    /// The first bind error is returned and the remaining parameters are
    /// left unbound.
    pub fn bind(&self, cx: &Context, scope: &Scope, actual: &[Value]) -> Result<(), EvalError> {
        for (i, arg) in self.items.iter().enumerate() {
            if arg.kind == ArgKind::Variadic {
                let rest = actual.get(i..).unwrap_or_default();
                bind_one(cx, scope, arg, cx.seq(rest.to_vec()))?;
                break;
            }
            let value = actual
                .get(i)
                .cloned()
                .unwrap_or_else(|| arg.default_or_nil(cx));
            bind_one(cx, scope, arg, value)?;
        }
        Ok(())
    }

    /// Bind into a new child of `parent`.
    ///
    /// On failure the partially bound child is dropped.
    pub fn bind_child(
        &self,
        cx: &Context,
        parent: &Scope,
        actual: &[Value],
    ) -> Result<Scope, EvalError> {
        let scope = parent.child();
        self.bind(cx, &scope, actual)?;
        Ok(scope)
    }

    /// Check, fill and bind: the whole calling convention.
    #[tracing::instrument(level = "debug", skip_all, fields(argc = actual.len()))]
    pub fn apply(&self, cx: &Context, parent: &Scope, actual: &[Value]) -> Result<Scope, EvalError> {
        self.check(cx, actual)?;
        let mut filled = actual.to_vec();
        self.fill(cx, &mut filled);
        self.bind_child(cx, parent, &filled)
    }
}

fn bind_one(cx: &Context, scope: &Scope, arg: &Arg, value: Value) -> Result<(), EvalError> {
    match &arg.name {
        ArgName::Anonymous => Ok(()),
        ArgName::Interned(name) => scope.bind(cx, *name, value),
        ArgName::Pending(raw) => scope.bind(cx, cx.intern(raw), value),
    }
}
