//! Formal parameters.
//!
//! A callable's parameter syntax is parsed once into [`Args`] and compiled
//! into an [`ArgList`], which every call then uses to check, fill and bind
//! its actual arguments.
//!
//! # Parameter Syntax
//!
//! | form        | parameter                          |
//! |-------------|------------------------------------|
//! | `x`         | plain                              |
//! | `_`         | anonymous plain, binds nothing     |
//! | `(x expr)`  | optional, default `expr`           |
//! | `xs..`      | variadic, must come last           |
//!
//! Defaults are evaluated when the parameters are parsed, in the definition
//! scope, and never again.

mod list;

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;
use vesper_ir::Name;

use crate::errors::{invalid_arg, EvalError};
use crate::{Context, Scope, Value};

pub use list::ArgList;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    Plain,
    Optional,
    Variadic,
}

/// Parameter name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgName {
    /// Occupies a position without binding.
    Anonymous,
    /// Raw name from the builder API, interned on compilation.
    Pending(Box<str>),
    Interned(Name),
}

impl ArgName {
    fn render(&self, cx: &Context, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            ArgName::Anonymous => out.write_char('_'),
            ArgName::Pending(raw) => out.write_str(raw),
            ArgName::Interned(name) => out.write_str(cx.resolve(*name)),
        }
    }

    fn interned(&self, cx: &Context) -> ArgName {
        match self {
            ArgName::Pending(raw) => ArgName::Interned(cx.intern(raw)),
            other => other.clone(),
        }
    }
}

/// One formal parameter.
#[derive(Clone, Debug)]
pub struct Arg {
    kind: ArgKind,
    name: ArgName,
    default: Option<Value>,
}

impl Arg {
    pub fn plain(name: &str) -> Self {
        Arg::pending(ArgKind::Plain, name, None)
    }

    /// Optional parameter. Without a default, a missing argument is Nil.
    pub fn optional(name: &str, default: Option<Value>) -> Self {
        Arg::pending(ArgKind::Optional, name, default)
    }

    pub fn variadic(name: &str) -> Self {
        Arg::pending(ArgKind::Variadic, name, None)
    }

    pub fn anonymous() -> Self {
        Arg {
            kind: ArgKind::Plain,
            name: ArgName::Anonymous,
            default: None,
        }
    }

    fn pending(kind: ArgKind, name: &str, default: Option<Value>) -> Self {
        Arg {
            kind,
            name: ArgName::Pending(name.into()),
            default,
        }
    }

    fn interned(kind: ArgKind, name: Name, default: Option<Value>) -> Self {
        Arg {
            kind,
            name: ArgName::Interned(name),
            default,
        }
    }

    #[inline]
    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &ArgName {
        &self.name
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The stored default, or the canonical Nil.
    pub fn default_or_nil(&self, cx: &Context) -> Value {
        self.default.clone().unwrap_or_else(|| cx.nil())
    }

    pub fn render(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        match self.kind {
            ArgKind::Plain => self.name.render(cx, out)?,
            ArgKind::Optional => {
                out.write_char('(')?;
                self.name.render(cx, out)?;
                if let Some(default) = &self.default {
                    out.write_char(' ')?;
                    default.dump(cx, out)?;
                }
                out.write_char(')')?;
            }
            ArgKind::Variadic => {
                self.name.render(cx, out)?;
                out.write_str("..")?;
            }
        }
        Ok(())
    }
}

/// Ordered formal parameters.
#[derive(Clone, Debug, Default)]
pub struct Args(SmallVec<[Arg; 4]>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: Arg) {
        self.0.push(arg);
    }

    /// Render as `(a (b 1) c..)`.
    pub fn render(&self, cx: &Context, out: &mut dyn fmt::Write) -> Result<(), EvalError> {
        out.write_char('(')?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            arg.render(cx, out)?;
        }
        out.write_char(')')?;
        Ok(())
    }

    pub fn render_string(&self, cx: &Context) -> Result<String, EvalError> {
        let mut out = String::new();
        self.render(cx, &mut out)?;
        Ok(out)
    }
}

impl Deref for Args {
    type Target = [Arg];

    fn deref(&self) -> &[Arg] {
        &self.0
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Args(iter.into_iter().collect())
    }
}

/// Parse raw parameter forms.
///
/// Optional defaults are evaluated in `env`, in order. The first malformed
/// form or failing default aborts the parse.
#[tracing::instrument(level = "debug", skip_all, fields(forms = forms.len()))]
pub fn parse_args(cx: &Context, forms: &[Value], env: &Scope) -> Result<Args, EvalError> {
    forms.iter().map(|form| parse_arg(cx, form, env)).collect()
}

fn parse_arg(cx: &Context, form: &Value, env: &Scope) -> Result<Arg, EvalError> {
    if form.is_nil() {
        return Ok(Arg::anonymous());
    }
    if let Some(name) = form.as_symbol() {
        return Ok(Arg::interned(ArgKind::Plain, name, None));
    }
    if let Some(items) = form.as_seq() {
        if let [head, default, ..] = items {
            if let Some(name) = head.as_symbol() {
                let default = default.eval(cx, env)?;
                return Ok(Arg::interned(ArgKind::Optional, name, Some(default)));
            }
        }
    }
    if let Some(name) = form.as_splat().and_then(|splat| splat.inner().as_symbol()) {
        return Ok(Arg::interned(ArgKind::Variadic, name, None));
    }
    Err(invalid_arg(&cx.dump_string(form)?))
}
