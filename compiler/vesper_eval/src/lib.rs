//! Value contract and calling convention for the Vesper runtime.
//!
//! # Architecture
//!
//! - [`value`]: the [`Val`] capability trait, the [`Value`] handle and the
//!   core variants (Nil, Symbol, Int, Seq, Splat, Lambda, Builtin)
//! - [`args`]: parameter parsing ([`parse_args`]) and the compiled
//!   [`ArgList`] that checks, fills and binds actual arguments
//! - [`Scope`]: chained lexical frames
//! - [`Context`]: interner, canonical Nil, type registry, configuration and
//!   call depth, passed by reference into every operation
//!
//! # Calling Convention
//!
//! [`Context::apply`] evaluates the raw arguments, spreads splats, and calls
//! the callee. A [`Lambda`] then runs [`ArgList::apply`]: arity check,
//! default filling, and binding into a fresh child of its definition scope.
//!
//! # Errors
//!
//! Every fallible operation returns [`EvalError`]. Nothing unwinds.

pub mod args;
mod config;
mod context;
pub mod errors;
mod logging;
mod scope;
mod stack;
mod types;
pub mod value;

pub use args::{parse_args, Arg, ArgKind, ArgList, ArgName, Args};
pub use config::{ContextConfig, RedefinitionPolicy};
pub use context::{CallGuard, Context, ContextBuilder};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use logging::init_tracing;
pub use scope::Scope;
pub use stack::ensure_sufficient_stack;
pub use types::{CoreTypes, Type, TypeRegistry};
pub use value::{Builtin, BuiltinFn, Int, Lambda, Nil, Seq, Splat, Symbol, Val, Value, ValueDisplay};

pub use vesper_ir::{Name, SharedInterner};
