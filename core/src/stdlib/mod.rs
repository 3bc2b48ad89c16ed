//! sprig primitive library
//!
//! Native functions registered into the global frame of every new
//! environment:
//! - Math: `+ - * /` and the comparisons `< > =`
//! - List: `list car cdr cons`
//! - IO: `print`
//!
//! Primitives receive their arguments already executed and never see the
//! environment. Arguments may arrive wrapped in `Quote`; primitives look
//! through the wrapper.

pub mod io;
pub mod list;
pub mod math;

#[cfg(test)]
mod stdlib_test;

use crate::env::Env;
use crate::values::Primitive;

/// Every primitive with the name it is bound to.
pub const PRIMITIVES: &[(&str, Primitive)] = &[
    ("+", Primitive::new("ADD", math::add)),
    ("-", Primitive::new("SUB", math::sub)),
    ("*", Primitive::new("MUL", math::mul)),
    ("/", Primitive::new("DIV", math::div)),
    ("<", Primitive::new("LT", math::less)),
    (">", Primitive::new("GT", math::greater)),
    ("=", Primitive::new("EQ", math::equal)),
    ("list", Primitive::new("LIST", list::list)),
    ("car", Primitive::new("CAR", list::car)),
    ("cdr", Primitive::new("CDR", list::cdr)),
    ("cons", Primitive::new("CONS", list::cons)),
    ("print", Primitive::new("PRINT", io::print)),
];

/// Registers the whole library in the current frame of `env`.
pub fn register(env: &mut Env) {
    for (name, primitive) in PRIMITIVES {
        env.define_primitive(name, *primitive);
    }
}
