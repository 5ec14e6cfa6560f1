//! Procedure values: user lambdas and host builtins.
//!
//! Both receive arguments that the caller already evaluated and spread
//! (see [`Context::apply`]). Each call counts against the context's call
//! depth limit.

use std::any::Any;
use std::fmt;

use super::{Val, Value};
use crate::args::{parse_args, ArgList, Args};
use crate::errors::{EvalError, EvalResult};
use crate::types::Type;
use crate::{Context, Scope};

/// Host implementation of a builtin.
///
/// Receives the caller's scope and the checked, default-filled arguments.
pub type BuiltinFn = fn(&Context, &Scope, &[Value]) -> EvalResult;

/// A user procedure closing over its definition scope.
///
/// Written `(fn <params>)`.
pub struct Lambda {
    args: ArgList,
    body: Vec<Value>,
    env: Scope,
}

impl Lambda {
    /// Parse `params` in `env` and build the lambda.
    ///
    /// Optional defaults are evaluated here, once.
    pub fn new(cx: &Context, params: &[Value], body: Vec<Value>, env: &Scope) -> EvalResult {
        let args = ArgList::new(cx, parse_args(cx, params, env)?)?;
        Ok(Value::new(Lambda {
            args,
            body,
            env: env.clone(),
        }))
    }

    #[inline]
    pub fn args(&self) -> &ArgList {
        &self.args
    }

    pub fn body(&self) -> &[Value] {
        &self.body
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("args", &self.args)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}

impl Val for Lambda {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().lambda
    }

    fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        out.write_str("(fn ")?;
        self.args.render(cx, out)?;
        out.write_char(')')?;
        Ok(())
    }

    // Procedures are only equal to themselves.
    fn structural_eq(&self, _rhs: &Value) -> bool {
        false
    }

    #[tracing::instrument(level = "debug", skip_all, fields(argc = args.len()))]
    fn call(&self, _this: &Value, cx: &Context, args: &[Value], _scope: &Scope) -> EvalResult {
        let _guard = cx.enter_call()?;
        let scope = self.args.apply(cx, &self.env, args)?;

        let mut result = cx.nil();
        for form in &self.body {
            result = form.eval(cx, &scope)?;
        }
        Ok(result)
    }
}

/// A procedure implemented by the host.
///
/// Written `(builtin <name> <params>)`.
pub struct Builtin {
    name: String,
    args: ArgList,
    imp: BuiltinFn,
}

impl Builtin {
    pub fn new(cx: &Context, name: &str, args: Args, imp: BuiltinFn) -> EvalResult {
        Ok(Value::new(Builtin {
            name: name.to_string(),
            args: ArgList::new(cx, args)?,
            imp,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn args(&self) -> &ArgList {
        &self.args
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl Val for Builtin {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_of(&self, cx: &Context) -> Type {
        cx.types().core().builtin
    }

    fn dump(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        write!(out, "(builtin {} ", self.name)?;
        self.args.render(cx, out)?;
        out.write_char(')')?;
        Ok(())
    }

    fn structural_eq(&self, _rhs: &Value) -> bool {
        false
    }

    fn call(&self, _this: &Value, cx: &Context, args: &[Value], scope: &Scope) -> EvalResult {
        let _guard = cx.enter_call()?;
        self.args.check(cx, args)?;
        let mut actual = args.to_vec();
        self.args.fill(cx, &mut actual);
        (self.imp)(cx, scope, &actual)
    }
}
