//! List construction and access.
//!
//! Lists are values: every primitive here returns a fresh copy. A result built
//! from quoted data is quoted again, so it stays data when executed.

use crate::evaluator::{EvalError, arity, type_mismatch};
use crate::values::Value;
use crate::{Vec, vec};

fn one<'v>(function: &str, args: &'v [Value]) -> Result<&'v Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(arity(function, "1", args.len())),
    }
}

fn items<'v>(function: &str, arg: &'v Value) -> Result<&'v [Value], EvalError> {
    arg.as_list()
        .ok_or_else(|| type_mismatch(function, "List", arg.type_name()))
}

/// Re-applies the quote of `source` to `value`.
fn like(source: &Value, value: Value) -> Value {
    if source.is_quoted() {
        Value::quote(value)
    } else {
        value
    }
}

/// Collects its arguments.
pub fn list(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::List(args.to_vec()))
}

/// First element, or Nil for an empty list.
pub fn car(args: &[Value]) -> Result<Value, EvalError> {
    let arg = one("car", args)?;
    let first = items("car", arg)?.first().cloned().unwrap_or_default();
    Ok(like(arg, first))
}

/// Every element but the first.
pub fn cdr(args: &[Value]) -> Result<Value, EvalError> {
    let arg = one("cdr", args)?;
    let rest = items("cdr", arg)?.get(1..).unwrap_or_default().to_vec();
    Ok(like(arg, Value::List(rest)))
}

/// Prepends to a list. A Nil tail builds a one-element list.
pub fn cons(args: &[Value]) -> Result<Value, EvalError> {
    let [head, tail] = args else {
        return Err(arity("cons", "2", args.len()));
    };
    let rest: &[Value] = if tail.is_nil() {
        &[]
    } else {
        items("cons", tail)?
    };
    let head = if tail.is_quoted() {
        head.unquoted().clone()
    } else {
        head.clone()
    };
    let mut list: Vec<Value> = vec![head];
    list.extend_from_slice(rest);
    Ok(like(tail, Value::List(list)))
}
