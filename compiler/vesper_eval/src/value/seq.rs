//! Sequences.

use std::any::Any;
use std::fmt;

use super::{dump_list, spread_into, Val, Value};
use crate::errors::{EvalError, EvalResult};
use crate::types::Type;
use crate::{Context, Scope};

/// Ordered sequence of values, written `(a b c)`.
///
/// Evaluating a sequence evaluates its elements left to right; an element
/// that evaluates to a splat is spread in place.
#[derive(Debug, Clone, Default)]
pub struct Seq {
    items: Vec<Value>,
}

impl Seq {
    pub fn new(items: Vec<Value>) -> Self {
        Seq { items }
    }

    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Val for Seq {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().seq
    }

    fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        dump_list(cx, &self.items, out)
    }

    fn structural_eq(&self, rhs: &Value) -> bool {
        rhs.as_seq().is_some_and(|other| {
            other.len() == self.items.len()
                && self.items.iter().zip(other).all(|(a, b)| a.equals(b))
        })
    }

    fn truthy(&self) -> bool {
        !self.items.is_empty()
    }

    fn eval(&self, _this: &Value, cx: &Context, scope: &Scope) -> EvalResult {
        let mut out = Vec::with_capacity(self.items.len());
        for item in &self.items {
            spread_into(item.eval(cx, scope)?, &mut out);
        }
        Ok(cx.seq(out))
    }

    fn quote(&self, _this: &Value, cx: &Context, scope: &Scope) -> EvalResult {
        let items = self
            .items
            .iter()
            .map(|item| item.quote(cx, scope))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cx.seq(items))
    }
}
