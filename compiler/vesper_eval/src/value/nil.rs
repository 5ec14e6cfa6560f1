//! The vacuous value.

use std::any::Any;
use std::fmt;

use super::{Val, Value};
use crate::errors::EvalError;
use crate::types::Type;
use crate::Context;

/// Nil: false in conditions, `_` in text, nothing when spread.
///
/// Every context owns one canonical instance ([`Context::nil`]); other
/// instances are still identical to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nil;

impl Val for Nil {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().nil
    }

    fn dump(&self, _cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        out.write_char('_')?;
        Ok(())
    }

    fn structural_eq(&self, rhs: &Value) -> bool {
        rhs.is_nil()
    }

    fn identity(&self, rhs: &Value) -> bool {
        rhs.is_nil()
    }

    fn truthy(&self) -> bool {
        false
    }

    // An elided argument contributes nothing.
    fn splat_into(&self, _this: &Value, _out: &mut Vec<Value>) {}
}
