//! Integer literals.

use std::any::Any;
use std::fmt;

use super::{Val, Value};
use crate::errors::EvalError;
use crate::types::Type;
use crate::Context;

/// Plain 64-bit integer. Self-evaluating, always truthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int(i64);

impl Int {
    pub fn new(value: i64) -> Self {
        Int(value)
    }

    #[inline]
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Val for Int {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().int
    }

    fn dump(&self, _cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        write!(out, "{}", self.0)?;
        Ok(())
    }

    fn structural_eq(&self, rhs: &Value) -> bool {
        rhs.as_int() == Some(self.0)
    }

    fn identity(&self, rhs: &Value) -> bool {
        rhs.as_int() == Some(self.0)
    }
}
