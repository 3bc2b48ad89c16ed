//! Shared helpers for the integration tests.
//!
//! `test_case!` evaluates its input as a whole program in a fresh
//! interpreter and checks either the rendering of the last value or the
//! category and code of the error it raised.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use sprig::lexer::TokenKind;
use sprig::{Error, Interpreter, Value};

/// Runs every form of `source` and hands back the interpreter so callers
/// can inspect the environment afterwards.
pub fn run(source: &str) -> (Interpreter, Result<Value, Error>) {
    let mut interpreter = Interpreter::new();
    let result = interpreter.eval_source(source);
    (interpreter, result)
}

#[allow(unused_macros)]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        output: $output:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let source: &str = $input;
            let (_, result) = $crate::cases::run(source);
            let value = result.unwrap_or_else(|e| {
                panic!(
                    "evaluation failed:\n{}",
                    sprig::render_error_to_string_no_color(&e, source)
                )
            });
            pretty_assertions::assert_eq!(value.to_string(), $output);
        }
    };
    (
        name: $name:ident,
        input: $input:expr,
        error: $category:ident, $code:literal $(,)?
    ) => {
        #[test]
        fn $name() {
            let source: &str = $input;
            let (interpreter, result) = $crate::cases::run(source);
            let err = match result {
                Ok(value) => panic!("expected an error, got {}", value),
                Err(e) => e,
            };
            pretty_assertions::assert_eq!(err.category, sprig::ErrorCategory::$category);
            pretty_assertions::assert_eq!(err.code(), Some($code));
            pretty_assertions::assert_eq!(interpreter.env().depth(), 1);
        }
    };
}

pub struct TokenCase {
    pub name: &'static str,
    pub input: &'static str,
    pub kinds: &'static [TokenKind],
}

pub static TOKEN_CASES: Lazy<Vec<TokenCase>> = Lazy::new(|| {
    use TokenKind::*;
    vec![
        TokenCase {
            name: "signed_number",
            input: "+345",
            kinds: &[Number, End],
        },
        TokenCase {
            name: "call",
            input: "(ADD 1 2)",
            kinds: &[Open, Symbol, Number, Number, Close, End],
        },
        TokenCase {
            name: "quote_sugar",
            input: "'(a . b)",
            kinds: &[QuoteMark, Open, Symbol, Dot, Symbol, Close, End],
        },
        TokenCase {
            name: "reserved_words",
            input: "set define nil if quote let lambda",
            kinds: &[Set, Define, Nil, If, Quote, Let, Lambda, End],
        },
        TokenCase {
            name: "reserved_words_are_case_sensitive",
            input: "IF Lambda",
            kinds: &[Symbol, Symbol, End],
        },
        TokenCase {
            name: "comments",
            input: "; one\n# two\n// three\n1 ; trailing",
            kinds: &[Number, End],
        },
        TokenCase {
            name: "strings",
            input: "\"a b\" \"open",
            kinds: &[String, UnterminatedString, End],
        },
        TokenCase {
            name: "sign_alone_is_a_symbol",
            input: "(- +)",
            kinds: &[Open, Symbol, Symbol, Close, End],
        },
    ]
});
