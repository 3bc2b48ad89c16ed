//! The runtime value model.

pub mod function;
pub mod lambda;
pub mod number;
mod value;

pub use function::{NativeFn, Primitive};
pub use lambda::{Closure, Lambda};
pub use number::Number;
pub use value::{Symbol, Value};
