use alloc::borrow::Cow;
use core::fmt;

use crate::syntax::{Position, Span};

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Open,
    Close,
    /// The `'` prefix.
    QuoteMark,
    /// A standalone `.` that does not start a number.
    Dot,
    Number,
    String,
    /// A string literal that ran into the end of input.
    UnterminatedString,
    Symbol,
    If,
    Nil,
    Define,
    Set,
    Let,
    Lambda,
    /// The reserved word `quote`.
    Quote,
    End,
}

impl TokenKind {
    /// Classifies symbol text, case-sensitively, against the reserved words.
    pub fn from_word(word: &str) -> TokenKind {
        match word {
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "define" => TokenKind::Define,
            "set" => TokenKind::Set,
            "let" => TokenKind::Let,
            "lambda" => TokenKind::Lambda,
            "quote" => TokenKind::Quote,
            _ => TokenKind::Symbol,
        }
    }

    /// Reserved words that open a special form when they follow `(`.
    pub fn is_form_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Define
                | TokenKind::Set
                | TokenKind::Let
                | TokenKind::Lambda
                | TokenKind::Quote
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Open => "'('",
            TokenKind::Close => "')'",
            TokenKind::QuoteMark => "'",
            TokenKind::Dot => "'.'",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::UnterminatedString => "unterminated string",
            TokenKind::Symbol => "symbol",
            TokenKind::If => "'if'",
            TokenKind::Nil => "'nil'",
            TokenKind::Define => "'define'",
            TokenKind::Set => "'set'",
            TokenKind::Let => "'let'",
            TokenKind::Lambda => "'lambda'",
            TokenKind::Quote => "'quote'",
            TokenKind::End => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token. Text borrows from the source unless escapes forced a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    /// Parsed payload of a number token. NaN when the text is malformed.
    pub number: Option<f64>,
    pub pos: Position,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: impl Into<Cow<'a, str>>, pos: Position, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            number: None,
            pos,
            span,
        }
    }

    pub fn number(text: &'a str, value: f64, pos: Position, span: Span) -> Self {
        Self {
            kind: TokenKind::Number,
            text: Cow::Borrowed(text),
            number: Some(value),
            pos,
            span,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}
