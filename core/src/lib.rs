//! Core of the sprig Lisp interpreter: lexer, parser, values, environment and
//! evaluator.
//!
//! Most users want [`api::Interpreter`]:
//!
//! ```
//! use sprig_core::api::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.eval_source("(define square (lambda (x) (* x x)))").unwrap();
//! assert_eq!(interpreter.eval_source("(square 7)").unwrap().to_string(), "49");
//! ```

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod ast;
pub mod atoms;
pub mod env;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod stdlib;
pub mod syntax;
pub mod values;
