use alloc::rc::Rc;
use alloc::vec::Vec;

use tracing::trace;

use super::error::{EvalError, EvalErrorKind};
use super::forms;
use crate::env::{Env, Frame};
use crate::values::{Closure, Lambda, Symbol, Value};

impl Value {
    /// The apply step.
    ///
    /// A List whose head is callable is applied to its remaining elements; a
    /// Symbol is resolved; a Lambda is promoted to a Closure over the current
    /// frame. Everything else, quoted data included, executes to itself.
    pub fn execute(&self, env: &mut Env) -> Result<Value, EvalError> {
        match self {
            Value::Nil
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Primitive(_)
            | Value::Closure(_)
            | Value::Quote(_) => Ok(self.clone()),
            Value::Symbol(symbol) => resolve(env, symbol),
            Value::Lambda(lambda) => Ok(close_over(env, lambda.clone())),
            Value::List(items) => apply_list(env, items),
        }
    }
}

impl Closure {
    /// Invokes the closure with already executed arguments.
    ///
    /// The body runs in a fresh frame chained to the captured frame, not the
    /// caller's. The caller's frame is restored on every exit path.
    pub fn call(&self, env: &mut Env, args: Vec<Value>) -> Result<Value, EvalError> {
        let lambda = self.lambda().clone();
        if args.len() != lambda.arity() {
            return Err(EvalErrorKind::WrongArgumentCount {
                function: alloc::format!("lambda {}", lambda.signature()),
                expected: alloc::format!("{}", lambda.arity()),
                found: args.len(),
            }
            .into());
        }

        let frame = Frame::child(self.frame());
        {
            let mut bindings = frame.borrow_mut();
            for (param, arg) in lambda.params().iter().zip(args) {
                bindings.define(param.atom, arg.settled());
            }
        }

        trace!(signature = %lambda.signature(), "calling closure");
        env.nested(|env| {
            env.with_frame(frame, |env| {
                let mut result = Value::Nil;
                for statement in lambda.body() {
                    result = statement.execute(env)?;
                }
                Ok(result)
            })
        })
    }
}

pub(crate) fn close_over(env: &Env, lambda: Rc<Lambda>) -> Value {
    Value::Closure(Rc::new(Closure::new(lambda, env.current_frame())))
}

fn resolve(env: &mut Env, symbol: &Symbol) -> Result<Value, EvalError> {
    env.lookup(symbol.atom).ok_or_else(|| {
        EvalErrorKind::UnboundSymbol {
            name: alloc::string::String::from(&*symbol.name),
        }
        .into()
    })
}

fn execute_all(env: &mut Env, items: &[Value]) -> Result<Vec<Value>, EvalError> {
    items.iter().map(|item| item.execute(env)).collect()
}

fn apply_list(env: &mut Env, items: &[Value]) -> Result<Value, EvalError> {
    let Some((head, rest)) = items.split_first() else {
        return Ok(Value::List(Vec::new()));
    };

    if let Value::Symbol(symbol) = head {
        if let Some(form) = env.special_form(symbol.atom) {
            return forms::apply(env, form, rest);
        }
    }

    match head.execute(env)? {
        Value::Primitive(primitive) => {
            let args = execute_all(env, rest)?;
            trace!(name = primitive.name(), args = args.len(), "applying primitive");
            primitive.call(&args)
        }
        Value::Lambda(lambda) => {
            let closure = Closure::new(lambda, env.current_frame());
            let args = execute_all(env, rest)?;
            closure.call(env, args)
        }
        Value::Closure(closure) => {
            let args = execute_all(env, rest)?;
            closure.call(env, args)
        }
        head => {
            let mut values = Vec::with_capacity(items.len());
            values.push(head);
            for item in rest {
                values.push(item.execute(env)?);
            }
            Ok(Value::List(values))
        }
    }
}
