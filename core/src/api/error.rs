//! Public error types for the sprig API.
//!
//! Internal parse and evaluation errors are converted to these types at the
//! [`Interpreter`](super::Interpreter) boundary.

use core::fmt;

use crate::evaluator::EvalError;
use crate::parser::ParseError;
use crate::syntax::{Position, Span};
use crate::{String, Vec};

/// The error taxonomy every failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed nesting or special-form shape.
    Syntax,
    /// Unbound symbol, or `set` of an undefined name.
    Binding,
    /// A primitive received the wrong kind of value.
    Type,
    /// A call with the wrong number of arguments.
    Arity,
    /// A configured limit was hit.
    ResourceExceeded,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "syntax error"),
            ErrorCategory::Binding => write!(f, "binding error"),
            ErrorCategory::Type => write!(f, "type error"),
            ErrorCategory::Arity => write!(f, "arity error"),
            ErrorCategory::ResourceExceeded => write!(f, "resource limit exceeded"),
        }
    }
}

/// Public error type for all sprig operations.
#[derive(Debug)]
pub struct Error {
    pub category: ErrorCategory,
    pub diagnostic: Diagnostic,
    pub source: ErrorSource,
}

/// The internal error an [`Error`] was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSource {
    Parse(ParseError),
    Eval(EvalError),
}

impl Error {
    pub fn message(&self) -> &str {
        &self.diagnostic.message
    }

    pub fn code(&self) -> Option<&str> {
        self.diagnostic.code.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.diagnostic.message)?;
        if let Some(pos) = self.diagnostic.pos {
            write!(f, " at {}", pos)?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.source {
            ErrorSource::Parse(e) => Some(e),
            ErrorSource::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error {
            category: err.category(),
            diagnostic: err.to_diagnostic(),
            source: ErrorSource::Parse(err),
        }
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Error {
            category: err.category(),
            diagnostic: err.to_diagnostic(),
            source: ErrorSource::Eval(err),
        }
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,

    pub message: String,

    /// Byte range of the offending source. Empty when unknown.
    pub span: Span,

    /// Line and column of the start of `span`, when known.
    pub pos: Option<Position>,

    /// Suggestions for fixing the issue.
    pub help: Vec<String>,

    /// Stable error code: `P0xx` for syntax, `E0xx` for evaluation.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
