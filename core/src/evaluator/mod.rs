//! The apply step and the special forms.
//!
//! Evaluation happens in two named stages. [`Node::eval`](crate::ast::Node::eval)
//! turns syntax into a [`Value`] without applying anything; [`Value::execute`]
//! then performs function application on that value. Keeping the stages apart
//! lets a List be built, printed or quoted before it is ever applied.
//!
//! Special forms exist at both stages: the parser builds dedicated AST nodes
//! for them, and lambda bodies, which are stored as quoted data, reach them
//! again here as Lists headed by a reserved-word Symbol.
//!
//! ## Example
//!
//! ```
//! use sprig_core::env::Env;
//! use sprig_core::values::Value;
//!
//! let mut env = Env::new();
//! let plus = env.lookup_name("+").unwrap();
//! let call = Value::list([plus, Value::int(1), Value::int(2)]);
//! assert_eq!(call.execute(&mut env).unwrap(), Value::int(3));
//! ```

mod apply;
mod error;
mod forms;

#[cfg(test)]
mod execute_test;

pub use error::{EvalError, EvalErrorKind, arity, type_mismatch};

use core::fmt;

use tracing::trace;

use crate::atoms::Atom;
use crate::env::Env;
use crate::values::Value;

/// Reserved words that are evaluated by their own rules instead of by
/// function application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    If,
    Define,
    Set,
    Let,
    Lambda,
    Quote,
}

impl SpecialForm {
    pub fn keyword(self) -> &'static str {
        match self {
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
            SpecialForm::Set => "set",
            SpecialForm::Let => "let",
            SpecialForm::Lambda => "lambda",
            SpecialForm::Quote => "quote",
        }
    }
}

impl fmt::Display for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Runs `body` in a new block scope holding `bindings`.
///
/// Binding values must already be computed in the enclosing scope, so they
/// never see each other. The scope is popped on every exit path.
pub(crate) fn with_bindings(
    env: &mut Env,
    bindings: alloc::vec::Vec<(Atom, Value)>,
    body: impl FnOnce(&mut Env) -> Result<Value, EvalError>,
) -> Result<Value, EvalError> {
    env.nested(|env| {
        env.with_scope(|env| {
            trace!(count = bindings.len(), "binding let scope");
            for (atom, value) in bindings {
                env.define_atom(atom, value.settled());
            }
            body(env)
        })
    })
}
