//! Runtime values.
//!
//! # Open Dispatch
//!
//! A value is anything implementing [`Val`]. The core variants live in this
//! module (`Nil`, `Symbol`, `Int`, `Seq`, `Splat`, `Lambda`, `Builtin`);
//! embedders add numbers, strings or host procedures by implementing the
//! same trait. [`Value`] is the shared, cheaply cloned handle the rest of
//! the runtime passes around.
//!
//! # The `this` Parameter
//!
//! Operations that may return the value itself (`eval`, `quote`, `call`,
//! `splat_into`) receive `this`, the handle that owns `self`. Returning
//! `this.clone()` keeps identity: the result is the same allocation.
//!
//! # Thread Safety
//!
//! Values are reference counted with `Rc` and are not `Send`. One context
//! evaluates on one thread.

mod int;
mod nil;
mod procedure;
mod seq;
mod splat;
mod symbol;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use vesper_ir::Name;

use crate::errors::{not_callable, EvalError, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::types::Type;
use crate::{Context, Scope};

pub use int::Int;
pub use nil::Nil;
pub use procedure::{Builtin, BuiltinFn, Lambda};
pub use seq::Seq;
pub use splat::Splat;
pub use symbol::Symbol;

/// Capability set every runtime value implements.
pub trait Val: fmt::Debug + 'static {
    /// Concrete type access for checked downcasts.
    fn as_any(&self) -> &dyn Any;

    fn type_of(&self, cx: &Context) -> Type;

    /// Write the canonical text form.
    ///
    /// Composite values must propagate a failing sub-dump with `?`.
    fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError>;

    /// Structural equality. Must return `false` for any other variant.
    fn structural_eq(&self, rhs: &Value) -> bool;

    /// Shallow identity beyond pointer equality, which [`Value::is`]
    /// already checks. Reference-like variants keep the default.
    fn identity(&self, _rhs: &Value) -> bool {
        false
    }

    fn truthy(&self) -> bool {
        true
    }

    fn call(&self, this: &Value, cx: &Context, _args: &[Value], _scope: &Scope) -> EvalResult {
        Err(not_callable(&cx.dump_string(this)?))
    }

    fn eval(&self, this: &Value, _cx: &Context, _scope: &Scope) -> EvalResult {
        Ok(this.clone())
    }

    fn quote(&self, this: &Value, _cx: &Context, _scope: &Scope) -> EvalResult {
        Ok(this.clone())
    }

    /// Append this value's contribution to a flattened sequence.
    fn splat_into(&self, this: &Value, out: &mut Vec<Value>) {
        out.push(this.clone());
    }
}

/// Shared handle to a runtime value.
#[derive(Clone)]
pub struct Value(Rc<dyn Val>);

impl Value {
    pub fn new<T: Val>(val: T) -> Self {
        Value(Rc::new(val))
    }

    #[inline]
    pub fn downcast_ref<T: Val>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.downcast_ref::<Nil>().is_some()
    }

    pub fn as_symbol(&self) -> Option<Name> {
        self.downcast_ref::<Symbol>().map(Symbol::name)
    }

    pub fn as_int(&self) -> Option<i64> {
        self.downcast_ref::<Int>().map(Int::get)
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        self.downcast_ref::<Seq>().map(Seq::items)
    }

    pub fn as_splat(&self) -> Option<&Splat> {
        self.downcast_ref::<Splat>()
    }

    #[inline]
    pub fn type_of(&self, cx: &Context) -> Type {
        self.0.type_of(cx)
    }

    #[inline]
    pub fn truthy(&self) -> bool {
        self.0.truthy()
    }

    /// Invoke as a procedure with already evaluated arguments.
    pub fn call(&self, cx: &Context, args: &[Value], scope: &Scope) -> EvalResult {
        self.0.call(self, cx, args, scope)
    }

    pub fn eval(&self, cx: &Context, scope: &Scope) -> EvalResult {
        ensure_sufficient_stack(|| self.0.eval(self, cx, scope))
    }

    pub fn quote(&self, cx: &Context, scope: &Scope) -> EvalResult {
        ensure_sufficient_stack(|| self.0.quote(self, cx, scope))
    }

    pub fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        ensure_sufficient_stack(|| self.0.dump(cx, out))
    }

    pub fn splat_into(&self, out: &mut Vec<Value>) {
        ensure_sufficient_stack(|| self.0.splat_into(self, out));
    }

    /// Returns `true` if both handles point at one allocation.
    #[inline]
    pub fn same_alloc(&self, rhs: &Value) -> bool {
        Rc::ptr_eq(&self.0, &rhs.0)
    }

    /// Structural equality (`=`).
    pub fn equals(&self, rhs: &Value) -> bool {
        self.same_alloc(rhs) || self.0.structural_eq(rhs)
    }

    /// Shallow identity (`is`).
    pub fn is(&self, rhs: &Value) -> bool {
        self.same_alloc(rhs) || self.0.identity(rhs)
    }

    /// Render through [`Value::dump`] with `Display`.
    pub fn display<'a>(&'a self, cx: &'a Context) -> ValueDisplay<'a> {
        ValueDisplay { value: self, cx }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// `Display` adapter returned by [`Value::display`].
pub struct ValueDisplay<'a> {
    value: &'a Value,
    cx: &'a Context,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.cx.dump_string(self.value).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Dump `items` as a parenthesised, space separated list.
pub(crate) fn dump_list(
    cx: &Context,
    items: &[Value],
    out: &mut dyn fmt::Write,
) -> Result<(), EvalError> {
    out.write_char('(')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        item.dump(cx, out)?;
    }
    out.write_char(')')?;
    Ok(())
}

/// Append an evaluated element to an argument or sequence buffer.
///
/// Splats spread through [`Value::splat_into`]; every other value, Nil
/// included, is kept as one element.
pub(crate) fn spread_into(value: Value, out: &mut Vec<Value>) {
    if value.as_splat().is_some() {
        value.splat_into(out);
    } else {
        out.push(value);
    }
}
