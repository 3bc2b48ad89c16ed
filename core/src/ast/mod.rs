//! Abstract syntax tree.
//!
//! Nodes are allocated in a [`bumpalo::Bump`] arena by the parser and are
//! immutable afterwards; one tree can be evaluated any number of times against
//! different environments. Every node remembers where it came from and the
//! source text it was built from.

mod eval;


use core::fmt;

use crate::syntax::{Position, Span};
use crate::values::Number;

#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    Number(Number),
    String(&'a str),
    Boolean(bool),
    Nil,
    Symbol(&'a str),
    List(&'a [Node<'a>]),
    /// `(quote x)` or `'x`.
    Quote(&'a Node<'a>),
    If {
        test: &'a Node<'a>,
        then: &'a Node<'a>,
        otherwise: &'a Node<'a>,
    },
    Define {
        target: &'a Node<'a>,
        value: &'a Node<'a>,
    },
    Set {
        target: &'a Node<'a>,
        value: &'a Node<'a>,
    },
    /// `bindings` is a List node of `(symbol expr)` pairs.
    Let {
        bindings: &'a Node<'a>,
        body: &'a [Node<'a>],
    },
    /// `params` is a List node of symbols.
    Lambda {
        params: &'a Node<'a>,
        body: &'a [Node<'a>],
    },
    /// Root of a parse, wrapping one top-level form.
    Start(&'a Node<'a>),
}

#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub kind: NodeKind<'a>,
    pub pos: Position,
    pub span: Span,
    /// Source text of the node: the token for leaves, the whole form otherwise.
    pub text: &'a str,
}

impl<'a> Node<'a> {
    pub fn new(kind: NodeKind<'a>, pos: Position, span: Span, text: &'a str) -> Self {
        Self {
            kind,
            pos,
            span,
            text,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Number(_) => "Number",
            NodeKind::String(_) => "String",
            NodeKind::Boolean(_) => "Boolean",
            NodeKind::Nil => "Nil",
            NodeKind::Symbol(_) => "Symbol",
            NodeKind::List(_) => "List",
            NodeKind::Quote(_) => "Quote",
            NodeKind::If { .. } => "If",
            NodeKind::Define { .. } => "Define",
            NodeKind::Set { .. } => "Set",
            NodeKind::Let { .. } => "Let",
            NodeKind::Lambda { .. } => "Lambda",
            NodeKind::Start(_) => "Start",
        }
    }

    pub fn symbol_name(&self) -> Option<&'a str> {
        match self.kind {
            NodeKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn list_items(&self) -> Option<&'a [Node<'a>]> {
        match self.kind {
            NodeKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// The form wrapped by a `Start` node, or the node itself.
    pub fn root(&self) -> &Node<'a> {
        match &self.kind {
            NodeKind::Start(root) => root,
            _ => self,
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, nodes: &[Node<'_>]) -> fmt::Result {
    f.write_str("(")?;
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", node)?;
    }
    f.write_str(")")
}

/// Renders the node back as source.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Number(n) => write!(f, "{}", n),
            NodeKind::String(s) => write!(f, "{:?}", s),
            NodeKind::Boolean(true) => f.write_str("true"),
            NodeKind::Boolean(false) => f.write_str("false"),
            NodeKind::Nil => f.write_str("nil"),
            NodeKind::Symbol(name) => f.write_str(name),
            NodeKind::List(items) => write_seq(f, items),
            NodeKind::Quote(inner) => write!(f, "'{}", inner),
            NodeKind::If {
                test,
                then,
                otherwise,
            } => write!(f, "(if {} {} {})", test, then, otherwise),
            NodeKind::Define { target, value } => write!(f, "(define {} {})", target, value),
            NodeKind::Set { target, value } => write!(f, "(set {} {})", target, value),
            NodeKind::Let { bindings, body } => {
                write!(f, "(let {}", bindings)?;
                for statement in body.iter() {
                    write!(f, " {}", statement)?;
                }
                f.write_str(")")
            }
            NodeKind::Lambda { params, body } => {
                write!(f, "(lambda {}", params)?;
                for statement in body.iter() {
                    write!(f, " {}", statement)?;
                }
                f.write_str(")")
            }
            NodeKind::Start(root) => write!(f, "{}", root),
        }
    }
}

impl Node<'_> {
    /// Indented tree dump used by `--debug-parse`.
    pub fn dump(&self) -> alloc::string::String {
        let mut out = alloc::string::String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut alloc::string::String, indent: usize) {
        use core::fmt::Write;

        let _ = write!(out, "{:indent$}{} @{}", "", self.kind_name(), self.pos, indent = indent);
        match &self.kind {
            NodeKind::Number(n) => {
                let _ = writeln!(out, " {}", n);
            }
            NodeKind::String(s) => {
                let _ = writeln!(out, " {:?}", s);
            }
            NodeKind::Boolean(b) => {
                let _ = writeln!(out, " {}", b);
            }
            NodeKind::Symbol(name) => {
                let _ = writeln!(out, " {}", name);
            }
            NodeKind::Nil => out.push('\n'),
            NodeKind::List(items) => {
                out.push('\n');
                for item in items.iter() {
                    item.dump_into(out, indent + 2);
                }
            }
            NodeKind::Quote(inner) | NodeKind::Start(inner) => {
                out.push('\n');
                inner.dump_into(out, indent + 2);
            }
            NodeKind::If {
                test,
                then,
                otherwise,
            } => {
                out.push('\n');
                for child in [test, then, otherwise] {
                    child.dump_into(out, indent + 2);
                }
            }
            NodeKind::Define { target, value } | NodeKind::Set { target, value } => {
                out.push('\n');
                target.dump_into(out, indent + 2);
                value.dump_into(out, indent + 2);
            }
            NodeKind::Let { bindings: head, body } | NodeKind::Lambda { params: head, body } => {
                out.push('\n');
                head.dump_into(out, indent + 2);
                for statement in body.iter() {
                    statement.dump_into(out, indent + 2);
                }
            }
        }
    }
}
