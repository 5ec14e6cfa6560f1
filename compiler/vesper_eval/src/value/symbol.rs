//! Symbols.

use std::any::Any;
use std::fmt;

use vesper_ir::Name;

use super::{Val, Value};
use crate::errors::{undefined_variable, EvalError, EvalResult};
use crate::types::Type;
use crate::{Context, Scope};

/// An interned identifier. Evaluates to its binding in the scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol(Name);

impl Symbol {
    pub fn new(name: Name) -> Self {
        Symbol(name)
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.0
    }
}

impl Val for Symbol {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().symbol
    }

    fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        out.write_str(cx.resolve(self.0))?;
        Ok(())
    }

    fn structural_eq(&self, rhs: &Value) -> bool {
        rhs.as_symbol() == Some(self.0)
    }

    fn identity(&self, rhs: &Value) -> bool {
        rhs.as_symbol() == Some(self.0)
    }

    fn eval(&self, _this: &Value, cx: &Context, scope: &Scope) -> EvalResult {
        scope
            .lookup(self.0)
            .ok_or_else(|| undefined_variable(cx.resolve(self.0)))
    }
}
