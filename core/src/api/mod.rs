//! Public API: the interpreter facade, its options and the error types it
//! reports.

mod error;
mod interpreter;
mod options;

pub use error::{Diagnostic, Error, ErrorCategory, ErrorSource, Severity};
pub use interpreter::Interpreter;
pub use options::{ExecutionOptions, InterpreterOptions, ParserOptions};
