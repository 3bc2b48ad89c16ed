//! User-defined functions.
//!
//! A [`Lambda`] is pure data: its parameter names and its body statements in
//! quoted form. A [`Closure`] pairs a lambda with the frame that was current
//! when the lambda expression was evaluated. The frame is shared, so later
//! `set`s through the defining scope are visible to the closure.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::{Symbol, Value};
use crate::env::{Env, FrameRef};
use crate::evaluator::EvalErrorKind;

pub struct Lambda {
    params: Vec<Symbol>,
    body: Vec<Value>,
}

impl Lambda {
    pub fn new(params: Vec<Symbol>, body: Vec<Value>) -> Self {
        Self { params, body }
    }

    /// Builds a lambda from a quoted parameter list and quoted body.
    ///
    /// Parameters must be symbols other than the reserved words `env` knows.
    pub fn from_parts(env: &Env, params: &Value, body: Vec<Value>) -> Result<Self, EvalErrorKind> {
        let Some(items) = params.as_list() else {
            return Err(EvalErrorKind::MalformedForm {
                form: "lambda",
                reason: alloc::format!("expected a parameter list, found {}", params),
            });
        };
        let params = items
            .iter()
            .map(|item| match item {
                Value::Symbol(symbol) if env.special_form(symbol.atom).is_some() => {
                    Err(EvalErrorKind::MalformedForm {
                        form: "lambda",
                        reason: alloc::format!("cannot bind reserved word '{}'", symbol.name),
                    })
                }
                Value::Symbol(symbol) => Ok(symbol.clone()),
                other => Err(EvalErrorKind::MalformedForm {
                    form: "lambda",
                    reason: alloc::format!("parameter {} is not a symbol", other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(params, body))
    }

    pub fn params(&self) -> &[Symbol] {
        &self.params
    }

    pub fn body(&self) -> &[Value] {
        &self.body
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The parameter list as written, e.g. `(x y)`.
    pub fn signature(&self) -> String {
        let names: Vec<&str> = self.params.iter().map(|p| &*p.name).collect();
        alloc::format!("({})", names.join(" "))
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("params", &self.signature())
            .field("body", &self.body)
            .finish()
    }
}

pub struct Closure {
    lambda: Rc<Lambda>,
    frame: FrameRef,
}

impl Closure {
    pub fn new(lambda: Rc<Lambda>, frame: FrameRef) -> Self {
        Self { lambda, frame }
    }

    pub fn lambda(&self) -> &Rc<Lambda> {
        &self.lambda
    }

    /// The captured defining frame.
    pub fn frame(&self) -> &FrameRef {
        &self.frame
    }
}

impl fmt::Debug for Closure {
    // The captured frame may hold this closure, so it is not printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("lambda", &self.lambda)
            .finish_non_exhaustive()
    }
}
