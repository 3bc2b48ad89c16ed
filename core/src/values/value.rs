use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use super::{Closure, Lambda, Number, Primitive};
use crate::atoms::Atom;

/// An interned symbol together with its display name.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub atom: Atom,
    pub name: Rc<str>,
}

impl Symbol {
    pub fn new(atom: Atom, name: Rc<str>) -> Self {
        Self { atom, name }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.atom == other.atom
    }
}

impl Eq for Symbol {}

/// A runtime value.
///
/// Leaves (`Nil`, `Boolean`, `Number`, `String`, `Symbol`) describe
/// themselves. `List` owns its elements and is copied on every construction.
/// `Quote` marks literal data: executing it is a no-op and the primitives look
/// through it.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(Number),
    String(Rc<str>),
    Symbol(Symbol),
    List(Vec<Value>),
    Primitive(Primitive),
    Lambda(Rc<Lambda>),
    Closure(Rc<Closure>),
    Quote(Box<Value>),
}

impl Value {
    pub fn bool(value: bool) -> Value {
        Value::Boolean(value)
    }

    pub fn int(value: i64) -> Value {
        Value::Number(Number::int(value))
    }

    pub fn float(value: f64) -> Value {
        Value::Number(Number::float(value))
    }

    pub fn string(value: &str) -> Value {
        Value::String(Rc::from(value))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        Value::List(items.into_iter().collect())
    }

    /// Marks `value` as literal data.
    ///
    /// Self-evaluating leaves are returned as they are since quoting them
    /// changes nothing.
    pub fn quote(value: Value) -> Value {
        match value {
            Value::List(_) | Value::Symbol(_) | Value::Quote(_) => Value::Quote(Box::new(value)),
            Value::Nil
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Primitive(_)
            | Value::Lambda(_)
            | Value::Closure(_) => value,
        }
    }

    /// Wraps an already executed list or symbol so that executing it again
    /// leaves it untouched.
    pub fn settled(self) -> Value {
        match self {
            Value::List(_) | Value::Symbol(_) => Value::Quote(Box::new(self)),
            other => other,
        }
    }

    /// Strips every `Quote` layer.
    pub fn unquoted(&self) -> &Value {
        let mut value = self;
        while let Value::Quote(inner) = value {
            value = inner;
        }
        value
    }

    pub fn into_unquoted(self) -> Value {
        let mut value = self;
        loop {
            match value {
                Value::Quote(inner) => value = *inner,
                other => return other,
            }
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, Value::Quote(_))
    }

    /// Nil, `false`, the empty string and the empty list are false.
    /// Everything else, zero included, is true.
    pub fn is_truthy(&self) -> bool {
        match self.unquoted() {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.unquoted(), Value::Nil)
    }

    pub fn as_number(&self) -> Option<Number> {
        match self.unquoted() {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unquoted() {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.unquoted() {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self.unquoted() {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self.unquoted() {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::List(_) => "List",
            Value::Primitive(_) => "Primitive",
            Value::Lambda(_) => "Lambda",
            Value::Closure(_) => "Closure",
            Value::Quote(inner) => inner.type_name(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Nil
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Structural equality, transparent to quoting. Callables compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.unquoted(), other.unquoted()) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Primitive(a), Value::Primitive(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Symbol(s) => f.write_str(&s.name),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            Value::Primitive(p) => write!(f, "Primitive: {}", p.name()),
            Value::Lambda(lambda) => write!(f, "#<lambda {}>", lambda.signature()),
            Value::Closure(closure) => write!(f, "#<closure {}>", closure.lambda().signature()),
            Value::Quote(inner) => write!(f, "{}", inner),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Symbol(s) => write!(f, "Symbol({})", s.name),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Primitive(p) => write!(f, "Primitive({})", p.name()),
            Value::Lambda(lambda) => write!(f, "Lambda{}", lambda.signature()),
            Value::Closure(closure) => write!(f, "Closure{}", closure.lambda().signature()),
            Value::Quote(inner) => f.debug_tuple("Quote").field(inner).finish(),
        }
    }
}
