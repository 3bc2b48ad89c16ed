//! Runtime evaluation errors.
//!
//! Every failure during `eval` or `execute` is fatal for the top-level form
//! being evaluated. Errors carry the position of the innermost AST node that
//! was being evaluated when they were raised; primitives, which never see the
//! AST, raise position-less errors that pick up the position of the call site
//! on their way out.

use alloc::string::String;

use thiserror::Error;

use crate::api::{Diagnostic, ErrorCategory, Severity};
use crate::syntax::{Position, Span};
use crate::{Vec, format, vec};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalErrorKind {
    #[error("unbound symbol '{name}'")]
    UnboundSymbol { name: String },

    #[error("undefined symbol '{name}' in set")]
    UndefinedSet { name: String },

    #[error("{function}: expected {expected}, found {found}")]
    TypeMismatch {
        function: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{function}: wrong number of arguments: expected {expected}, found {found}")]
    WrongArgumentCount {
        function: String,
        expected: String,
        found: usize,
    },

    #[error("malformed {form}: {reason}")]
    MalformedForm { form: &'static str, reason: String },

    #[error("evaluation depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvalErrorKind::UnboundSymbol { .. } | EvalErrorKind::UndefinedSet { .. } => {
                ErrorCategory::Binding
            }
            EvalErrorKind::TypeMismatch { .. } => ErrorCategory::Type,
            EvalErrorKind::WrongArgumentCount { .. } => ErrorCategory::Arity,
            EvalErrorKind::MalformedForm { .. } => ErrorCategory::Syntax,
            EvalErrorKind::StackOverflow { .. } => ErrorCategory::ResourceExceeded,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            EvalErrorKind::UnboundSymbol { .. } => "E001",
            EvalErrorKind::UndefinedSet { .. } => "E002",
            EvalErrorKind::TypeMismatch { .. } => "E003",
            EvalErrorKind::WrongArgumentCount { .. } => "E004",
            EvalErrorKind::MalformedForm { .. } => "E005",
            EvalErrorKind::StackOverflow { .. } => "E006",
        }
    }

    fn help(&self) -> Vec<String> {
        match self {
            EvalErrorKind::UnboundSymbol { name } => {
                vec![format!("bind it first with (define {} ...)", name)]
            }
            EvalErrorKind::UndefinedSet { name } => vec![format!(
                "set only changes existing bindings; use (define {} ...) to create one",
                name
            )],
            EvalErrorKind::StackOverflow { .. } => {
                vec![String::from("check for unbounded recursion")]
            }
            _ => Vec::new(),
        }
    }
}

/// A runtime error with the source location it was raised at, when known.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    pub pos: Option<Position>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            pos: None,
        }
    }

    pub fn at(kind: EvalErrorKind, span: Span, pos: Position) -> Self {
        Self {
            kind,
            span: Some(span),
            pos: Some(pos),
        }
    }

    /// Attaches a location unless a more precise one is already present.
    pub fn or_at(mut self, span: &Span, pos: Position) -> Self {
        if self.pos.is_none() {
            self.span = Some(span.clone());
            self.pos = Some(pos);
        }
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: format!("{}", self.kind),
            span: self.span.clone().unwrap_or_default(),
            pos: self.pos,
            help: self.kind.help(),
            code: Some(String::from(self.code())),
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Shorthand for the argument-count errors raised by primitives.
pub fn arity(function: &str, expected: &str, found: usize) -> EvalError {
    EvalErrorKind::WrongArgumentCount {
        function: String::from(function),
        expected: String::from(expected),
        found,
    }
    .into()
}

/// Shorthand for the wrong-variant errors raised by primitives.
pub fn type_mismatch(function: &str, expected: &'static str, found: &'static str) -> EvalError {
    EvalErrorKind::TypeMismatch {
        function: String::from(function),
        expected,
        found,
    }
    .into()
}
