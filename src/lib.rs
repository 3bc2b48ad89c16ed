//! Sprig - a small Lisp interpreter
//!
//! # Overview
//!
//! Sprig reads S-expressions, evaluates them against a chain of lexical
//! frames and prints the result. It supports numbers, strings, booleans,
//! `nil`, lists, symbols, quoting, closures and the special forms `if`,
//! `define`, `set`, `let`, `lambda` and `quote`.
//!
//! # Quick Start
//!
//! ```
//! use sprig::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.eval("(define counter (let ((n 0)) (lambda () (set n (+ n 1)))))").unwrap();
//! interpreter.eval("(counter)").unwrap();
//! assert_eq!(interpreter.eval("(counter)").unwrap().to_string(), "2");
//! ```
//!
//! # Native functions
//!
//! Register Rust functions as primitives:
//!
//! ```
//! use sprig::{EvalError, Interpreter, Value};
//!
//! fn count(args: &[Value]) -> Result<Value, EvalError> {
//!     Ok(Value::int(args.len() as i64))
//! }
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.define_primitive("count", count);
//! assert_eq!(interpreter.eval("(count 1 2 3)").unwrap().to_string(), "3");
//! ```

mod error_renderer;

// Re-export public API from sprig_core
pub use sprig_core::api::{
    Diagnostic, Error, ErrorCategory, ErrorSource, ExecutionOptions, Interpreter,
    InterpreterOptions, ParserOptions, Severity,
};

// Re-export commonly used types and values
pub use sprig_core::env::{self, Env};
pub use sprig_core::values::{self, NativeFn, Number, Primitive, Value};
pub use sprig_core::{ast, lexer, parser, syntax};

// Re-export errors
pub use sprig_core::evaluator::{EvalError, EvalErrorKind};
pub use sprig_core::parser::{ParseError, ParseErrorKind};

pub use bumpalo::Bump;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
