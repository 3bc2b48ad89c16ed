use alloc::string::ToString;

use thiserror::Error;

use crate::api::{Diagnostic, ErrorCategory, Severity};
use crate::syntax::{Position, Span};
use crate::{String, Vec, format, vec};

/// Parser error with its source location.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {pos}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub pos: Position,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// A `)` with no matching `(`.
    #[error("unexpected ')'")]
    UnexpectedClose,

    /// Input ended inside a list.
    #[error("unclosed list")]
    UnclosedList,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unexpected {found}")]
    UnexpectedToken { found: String },

    /// A special form with the wrong number of children.
    #[error("{form} expects {expected}, found {found}")]
    FormArity {
        form: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("{form} expects a symbol, found {found}")]
    ExpectedSymbol { form: &'static str, found: String },

    /// A special-form keyword used as a define/set target, let binding name
    /// or lambda parameter.
    #[error("{form} cannot bind reserved word '{word}'")]
    ReservedWord { form: &'static str, word: String },

    #[error("{form} expects a list")]
    ExpectedList { form: &'static str },

    #[error("malformed let binding: {reason}")]
    MalformedBinding { reason: String },

    #[error("nesting depth exceeds maximum of {max_depth}")]
    MaxDepthExceeded { max_depth: usize },

    /// Input continues after the first complete form (strict mode).
    #[error("unexpected input after the first form")]
    TrailingContent,

    #[error("empty input")]
    EmptyInput,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, pos: Position) -> Self {
        Self { kind, span, pos }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            ParseErrorKind::MaxDepthExceeded { .. } => ErrorCategory::ResourceExceeded,
            _ => ErrorCategory::Syntax,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnexpectedClose => "P001",
            ParseErrorKind::UnclosedList => "P002",
            ParseErrorKind::UnterminatedString => "P003",
            ParseErrorKind::UnexpectedToken { .. } => "P004",
            ParseErrorKind::FormArity { .. } => "P005",
            ParseErrorKind::ExpectedSymbol { .. } => "P006",
            ParseErrorKind::ExpectedList { .. } => "P007",
            ParseErrorKind::MalformedBinding { .. } => "P008",
            ParseErrorKind::MaxDepthExceeded { .. } => "P009",
            ParseErrorKind::TrailingContent => "P010",
            ParseErrorKind::EmptyInput => "P011",
            ParseErrorKind::ReservedWord { .. } => "P012",
        }
    }

    fn help(&self) -> Vec<String> {
        match &self.kind {
            ParseErrorKind::UnexpectedClose => vec!["Remove the extra ')'".to_string()],
            ParseErrorKind::UnclosedList => vec!["Add the missing ')'".to_string()],
            ParseErrorKind::UnterminatedString => vec!["Add the closing '\"'".to_string()],
            ParseErrorKind::MalformedBinding { .. } => {
                vec!["Write each binding as (name expression)".to_string()]
            }
            ParseErrorKind::ReservedWord { .. } => {
                vec!["Choose a name that is not a special form".to_string()]
            }
            ParseErrorKind::MaxDepthExceeded { .. } => {
                vec!["Reduce nesting or simplify the expression".to_string()]
            }
            ParseErrorKind::TrailingContent => {
                vec!["Evaluate one form at a time, or run the input as a source file".to_string()]
            }
            _ => vec![],
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: format!("{}", self.kind),
            span: self.span.clone(),
            pos: Some(self.pos),
            help: self.help(),
            code: Some(self.code().to_string()),
        }
    }
}
