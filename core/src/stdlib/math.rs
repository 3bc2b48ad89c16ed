//! Arithmetic and comparison.
//!
//! Results are integral when every operand is integral and the result is a
//! whole number.

use crate::evaluator::{EvalError, arity, type_mismatch};
use crate::values::{Number, Value};
use crate::Vec;

fn numbers(function: &str, args: &[Value]) -> Result<Vec<Number>, EvalError> {
    args.iter()
        .map(|arg| {
            arg.as_number()
                .ok_or_else(|| type_mismatch(function, "Number", arg.type_name()))
        })
        .collect()
}

fn all_integral(numbers: &[Number]) -> bool {
    numbers.iter().all(|n| n.is_integral())
}

fn fold(numbers: &[Number], init: f64, op: impl Fn(f64, f64) -> f64) -> Value {
    let value = numbers.iter().fold(init, |acc, n| op(acc, n.value()));
    Value::Number(Number::computed(value, all_integral(numbers)))
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Sum of all arguments; 0 when there are none.
pub fn add(args: &[Value]) -> Result<Value, EvalError> {
    let numbers = numbers("+", args)?;
    Ok(fold(&numbers, 0.0, |a, b| a + b))
}

/// Product of all arguments; 1 when there are none.
pub fn mul(args: &[Value]) -> Result<Value, EvalError> {
    let numbers = numbers("*", args)?;
    Ok(fold(&numbers, 1.0, |a, b| a * b))
}

/// Negates a single argument, otherwise subtracts the rest from the first.
pub fn sub(args: &[Value]) -> Result<Value, EvalError> {
    let numbers = numbers("-", args)?;
    match numbers.split_first() {
        None => Err(arity("-", "at least 1", 0)),
        Some((first, [])) => Ok(Value::Number(Number::computed(
            -first.value(),
            first.is_integral(),
        ))),
        Some((first, rest)) => {
            let value = rest.iter().fold(first.value(), |acc, n| acc - n.value());
            Ok(Value::Number(Number::computed(
                value,
                all_integral(&numbers),
            )))
        }
    }
}

/// Reciprocal of a single argument, otherwise divides the first by the rest.
pub fn div(args: &[Value]) -> Result<Value, EvalError> {
    let numbers = numbers("/", args)?;
    match numbers.split_first() {
        None => Err(arity("/", "at least 1", 0)),
        Some((first, [])) => Ok(Value::Number(Number::computed(
            1.0 / first.value(),
            first.is_integral(),
        ))),
        Some((first, rest)) => {
            let value = rest.iter().fold(first.value(), |acc, n| acc / n.value());
            Ok(Value::Number(Number::computed(
                value,
                all_integral(&numbers),
            )))
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// True when `holds` is true for every adjacent pair.
fn chain(
    function: &str,
    args: &[Value],
    holds: impl Fn(f64, f64) -> bool,
) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(arity(function, "at least 1", 0));
    }
    let numbers = numbers(function, args)?;
    let result = numbers
        .windows(2)
        .all(|pair| holds(pair[0].value(), pair[1].value()));
    Ok(Value::Boolean(result))
}

pub fn less(args: &[Value]) -> Result<Value, EvalError> {
    chain("<", args, |a, b| a < b)
}

pub fn greater(args: &[Value]) -> Result<Value, EvalError> {
    chain(">", args, |a, b| a > b)
}

/// Structural equality over any values, pairwise.
pub fn equal(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(arity("=", "at least 1", 0));
    }
    Ok(Value::Boolean(args.windows(2).all(|pair| pair[0] == pair[1])))
}
