//! Tokenizer for sprig source text.
//!
//! The lexer is lazy: the parser pulls one token at a time with
//! [`Lexer::next_token`] and may hand a single token back with
//! [`Lexer::push_back`]. Malformed input never fails here. Bad numbers carry a
//! NaN payload and an unclosed string becomes
//! [`TokenKind::UnterminatedString`], leaving diagnosis to the parser.
//!
//! Lexical rules:
//! - whitespace and comments (`;`, `#` or `//` to end of line) separate tokens
//! - `(`, `)`, `'` and a standalone `.` are single-character tokens
//! - a number starts with a digit, `.digit`, or a sign followed by either
//! - strings are delimited by `"`; `\` passes the next character through
//! - anything else is a symbol, classified against the reserved words

mod token;

#[cfg(test)]
mod lexer_test;

pub use token::{Token, TokenKind};

use crate::syntax::{Position, Span};
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use tracing::trace;

pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    pushed: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            pushed: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current position, i.e. where the next unread character sits.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Makes the next call to [`next_token`](Self::next_token) return `token`.
    ///
    /// Only one token of lookahead is supported; pushing twice replaces the
    /// earlier token.
    pub fn push_back(&mut self, token: Token<'a>) {
        debug_assert!(self.pushed.is_none(), "lexer supports one token of pushback");
        self.pushed = Some(token);
    }

    /// Returns the next token, or a [`TokenKind::End`] token once the input is
    /// exhausted (repeatedly).
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(token) = self.pushed.take() {
            return token;
        }

        self.skip_trivia();

        let pos = self.position();
        let start = self.offset;
        let Some(current) = self.peek(0) else {
            return Token::new(TokenKind::End, "", pos, Span::new(start, start));
        };

        let token = match current {
            '(' => self.single(TokenKind::Open, pos),
            ')' => self.single(TokenKind::Close, pos),
            '\'' => self.single(TokenKind::QuoteMark, pos),
            '"' => self.string(pos),
            '.' if !self.peek(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.single(TokenKind::Dot, pos)
            }
            _ if self.is_number_start() => self.number(pos),
            _ => self.symbol(pos),
        };
        trace!(kind = ?token.kind, text = %token.text, %pos, "token");
        token
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(ahead)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn is_comment_start(&self) -> bool {
        match self.peek(0) {
            Some(';') | Some('#') => true,
            Some('/') => self.peek(1) == Some('/'),
            _ => false,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.peek(0).is_some_and(char::is_whitespace) {
                self.bump();
            }
            if !self.is_comment_start() {
                return;
            }
            while self.peek(0).is_some_and(|c| c != '\n') {
                self.bump();
            }
        }
    }

    fn is_number_start(&self) -> bool {
        let digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
        match self.peek(0) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => digit(self.peek(1)),
            Some('+') | Some('-') => {
                digit(self.peek(1)) || (self.peek(1) == Some('.') && digit(self.peek(2)))
            }
            _ => false,
        }
    }

    fn single(&mut self, kind: TokenKind, pos: Position) -> Token<'a> {
        let start = self.offset;
        self.bump();
        Token::new(
            kind,
            &self.source[start..self.offset],
            pos,
            Span::new(start, self.offset),
        )
    }

    /// Consumes up to the next delimiter.
    fn run(&mut self) -> &'a str {
        let start = self.offset;
        while self.peek(0).is_some_and(|c| !is_delimiter(c)) {
            self.bump();
        }
        &self.source[start..self.offset]
    }

    fn number(&mut self, pos: Position) -> Token<'a> {
        let start = self.offset;
        let text = self.run();
        let value = text.parse::<f64>().unwrap_or(f64::NAN);
        Token::number(text, value, pos, Span::new(start, self.offset))
    }

    fn symbol(&mut self, pos: Position) -> Token<'a> {
        let start = self.offset;
        let text = self.run();
        Token::new(
            TokenKind::from_word(text),
            text,
            pos,
            Span::new(start, self.offset),
        )
    }

    fn string(&mut self, pos: Position) -> Token<'a> {
        let start = self.offset;
        self.bump();
        let content_start = self.offset;
        // Only allocate once an escape shows up.
        let mut unescaped: Option<String> = None;

        loop {
            match self.peek(0) {
                None => {
                    let text = match unescaped {
                        Some(text) => Cow::Owned(text),
                        None => Cow::Borrowed(&self.source[content_start..]),
                    };
                    return Token::new(
                        TokenKind::UnterminatedString,
                        text,
                        pos,
                        Span::new(start, self.offset),
                    );
                }
                Some('"') => {
                    let content_end = self.offset;
                    self.bump();
                    let text = match unescaped {
                        Some(text) => Cow::Owned(text),
                        None => Cow::Borrowed(&self.source[content_start..content_end]),
                    };
                    return Token::new(TokenKind::String, text, pos, Span::new(start, self.offset));
                }
                Some('\\') => {
                    let buffer = unescaped.get_or_insert_with(|| {
                        String::from(&self.source[content_start..self.offset])
                    });
                    self.bump();
                    if let Some(c) = self.bump() {
                        buffer.push(c);
                    }
                }
                Some(c) => {
                    if let Some(buffer) = unescaped.as_mut() {
                        buffer.push(c);
                    }
                    self.bump();
                }
            }
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '"')
}

/// Lexes the whole input, including the trailing [`TokenKind::End`] token.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let end = token.is_end();
        tokens.push(token);
        if end {
            return tokens;
        }
    }
}
