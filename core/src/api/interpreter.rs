use bumpalo::Bump;
use tracing::{debug, warn};

use super::{Error, InterpreterOptions};
use crate::env::Env;
use crate::parser::{self, Parser};
use crate::values::{NativeFn, Primitive, Value};

/// Host boundary: owns an [`Env`] and runs source text through
/// parse, `eval` and `execute`.
///
/// Each call parses into a fresh arena, so no AST outlives the call that
/// built it. Definitions persist in the environment between calls.
///
/// # Example
///
/// ```
/// use sprig_core::api::Interpreter;
///
/// let mut interpreter = Interpreter::new();
/// interpreter.eval("(define x 5)").unwrap();
/// let value = interpreter.eval("(+ x 1)").unwrap();
/// assert_eq!(value.to_string(), "6");
/// ```
pub struct Interpreter {
    env: Env,
    options: InterpreterOptions,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self {
            env: Env::with_options(options.execution.clone()),
            options,
        }
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// Evaluates the first form of `source`.
    pub fn eval(&mut self, source: &str) -> Result<Value, Error> {
        let arena = Bump::new();
        let result = parser::parse_with_options(&arena, source, self.options.parser.clone())
            .map_err(Error::from)
            .and_then(|node| node.run(&mut self.env).map_err(Error::from));
        self.settle(result)
    }

    /// Evaluates every form of `source` in order and returns the last value.
    /// Empty input evaluates to Nil.
    pub fn eval_source(&mut self, source: &str) -> Result<Value, Error> {
        let arena = Bump::new();
        let mut parser = Parser::with_options(&arena, source, self.options.parser.clone());
        let mut last = Value::Nil;
        loop {
            let form = match parser.parse_form() {
                Ok(Some(form)) => form,
                Ok(None) => return Ok(last),
                Err(e) => return self.settle(Err(e.into())),
            };
            match form.run(&mut self.env) {
                Ok(value) => last = value,
                Err(e) => return self.settle(Err(e.into())),
            }
        }
    }

    /// Drops every user definition.
    pub fn reset(&mut self) {
        self.env.reset();
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    /// Registers a native function in the global frame.
    ///
    /// Like every global definition it is lost on [`reset`](Self::reset).
    pub fn define_primitive(&mut self, name: &'static str, func: NativeFn) {
        let global = self.env.global_frame();
        let atom = self.env.intern(name);
        global
            .borrow_mut()
            .define(atom, Value::Primitive(Primitive::new(name, func)));
    }

    fn settle(&mut self, result: Result<Value, Error>) -> Result<Value, Error> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!(code = err.code(), "evaluation failed: {}", err);
                if self.env.depth() != 1 {
                    warn!(depth = self.env.depth(), "frame chain not unwound after error");
                }
                self.env.clear_error();
                if self.options.reset_on_error {
                    self.env.reset();
                }
                Err(err)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
