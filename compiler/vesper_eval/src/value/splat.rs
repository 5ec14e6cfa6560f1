//! The spread marker.

use std::any::Any;
use std::fmt;

use super::{Val, Value};
use crate::errors::{EvalError, EvalResult};
use crate::types::Type;
use crate::{Context, Scope};

/// Marks its inner value for spreading into the surrounding sequence.
///
/// Written `inner..`. Splats never nest: [`Splat::wrap`] returns an
/// already spread value unchanged. Evaluation and quoting build a fresh
/// wrapper each time; identity looks through the wrapper to the inner
/// handle.
#[derive(Debug, Clone)]
pub struct Splat {
    inner: Value,
}

impl Splat {
    pub fn wrap(inner: Value) -> Value {
        if inner.as_splat().is_some() {
            return inner;
        }
        Value::new(Splat { inner })
    }

    #[inline]
    pub fn inner(&self) -> &Value {
        &self.inner
    }
}

impl Val for Splat {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().splat
    }

    fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        self.inner.dump(cx, out)?;
        out.write_str("..")?;
        Ok(())
    }

    /// Compares the wrapped values by identity, not structure.
    fn structural_eq(&self, rhs: &Value) -> bool {
        rhs.as_splat()
            .is_some_and(|other| self.inner.is(&other.inner))
    }

    /// Shallow: two wrappers are identical when they hold the same inner
    /// handle. Unlike equality this never asks the inner value, so splats
    /// of equal but separately built atoms are not identical.
    fn identity(&self, rhs: &Value) -> bool {
        rhs.as_splat()
            .is_some_and(|other| self.inner.same_alloc(&other.inner))
    }

    fn truthy(&self) -> bool {
        self.inner.truthy()
    }

    // Calling a splat yields the splat.
    fn call(&self, this: &Value, _cx: &Context, _args: &[Value], _scope: &Scope) -> EvalResult {
        Ok(this.clone())
    }

    fn eval(&self, _this: &Value, cx: &Context, scope: &Scope) -> EvalResult {
        Ok(Splat::wrap(self.inner.eval(cx, scope)?))
    }

    fn quote(&self, _this: &Value, cx: &Context, scope: &Scope) -> EvalResult {
        Ok(Splat::wrap(self.inner.quote(cx, scope)?))
    }

    fn splat_into(&self, this: &Value, out: &mut Vec<Value>) {
        match self.inner.as_seq() {
            Some(items) => {
                for item in items {
                    item.splat_into(out);
                }
            }
            // Spreading a non-sequence passes the marker through.
            None => out.push(this.clone()),
        }
    }
}
