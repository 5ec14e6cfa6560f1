//! Error types for evaluation and argument binding.
//!
//! Errors are ordinary return values. Nothing in the runtime core unwinds:
//! the first failure is returned to the caller unchanged.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries typed data for each failure so callers can match
//! on the category instead of parsing text. The factory functions below are
//! the public construction API; each one fills in both `kind` and the
//! rendered `message`.

use std::fmt;

use crate::value::Value;

/// Result of evaluating or calling a value.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// Payload strings are already rendered (value dumps, parameter lists,
/// resolved symbol names), so an error stays meaningful after the context
/// that produced it is gone.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Calling
    #[error("not callable: {value}")]
    NotCallable { value: String },
    #[error("maximum call depth exceeded (limit: {limit})")]
    CallDepthExceeded { limit: usize },

    // Parameter lists
    #[error("invalid argument: {form}")]
    InvalidArg { form: String },
    #[error("variadic parameter must be last: {params}")]
    VariadicNotLast { params: String },
    #[error("argument mismatch: {params} {actual}")]
    ArgMismatch { params: String, actual: String },

    // Scope
    #[error("cannot redefine: {name}")]
    CannotRedefine { name: String },
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    /// A dump sink refused output.
    #[error("failed to render value")]
    Format,

    /// Catch-all for embedder errors without a dedicated category.
    #[error("{message}")]
    Custom { message: String },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message, using the `Custom` kind.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<fmt::Error> for EvalError {
    fn from(_: fmt::Error) -> Self {
        EvalError::from_kind(EvalErrorKind::Format)
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Calling

/// Value in call position cannot be invoked. `value` is its dump.
#[cold]
pub fn not_callable(value: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        value: value.to_string(),
    })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}

// Parameter lists

/// Malformed formal parameter. `form` is the dump of the offending form.
#[cold]
pub fn invalid_arg(form: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArg {
        form: form.to_string(),
    })
}

#[cold]
pub fn variadic_not_last(params: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::VariadicNotLast {
        params: params.to_string(),
    })
}

/// Actual argument count outside the accepted range.
///
/// `params` is the rendered formal list, `actual` the dump of the received
/// arguments.
#[cold]
pub fn arg_mismatch(params: &str, actual: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgMismatch {
        params: params.to_string(),
        actual: actual.to_string(),
    })
}

// Scope

#[cold]
pub fn cannot_redefine(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotRedefine {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}
