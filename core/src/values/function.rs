//! Native functions exposed to sprig code.

use core::fmt;

use super::Value;
use crate::evaluator::EvalError;

/// Signature of a native function.
///
/// Primitives receive their arguments already executed and never touch the
/// environment.
///
/// # Example
///
/// ```
/// use sprig_core::evaluator::EvalError;
/// use sprig_core::values::{Primitive, Value};
///
/// fn always_nil(_args: &[Value]) -> Result<Value, EvalError> {
///     Ok(Value::Nil)
/// }
///
/// let nil = Primitive::new("NIL", always_nil);
/// assert_eq!(nil.call(&[]).unwrap(), Value::Nil);
/// ```
pub type NativeFn = fn(args: &[Value]) -> Result<Value, EvalError>;

/// A named native function.
#[derive(Clone, Copy)]
pub struct Primitive {
    name: &'static str,
    func: NativeFn,
}

impl Primitive {
    pub const fn new(name: &'static str, func: NativeFn) -> Self {
        Self { name, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Primitive").field(&self.name).finish()
    }
}
