//! Lexical environments.
//!
//! An [`Env`] tracks the current [`Frame`] of a singly linked frame chain, the
//! [`AtomTable`] shared by every frame, and an error flag raised by failed
//! lookups. Block scopes are entered with [`Env::push`] / [`Env::pop`] or,
//! preferably, with [`Env::with_scope`], which restores the frame on every
//! exit path.

mod frame;


pub use frame::{Frame, FrameRef};

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use tracing::{debug, trace};

use crate::atoms::{Atom, AtomTable};
use crate::api::ExecutionOptions;
use crate::evaluator::{EvalError, EvalErrorKind, SpecialForm};
use crate::stdlib;
use crate::values::{Primitive, Symbol, Value};

/// Atoms of the reserved words that name special forms.
#[derive(Debug, Clone, Copy)]
struct Keywords {
    if_: Atom,
    define: Atom,
    set: Atom,
    let_: Atom,
    lambda: Atom,
    quote: Atom,
}

impl Keywords {
    fn intern(atoms: &mut AtomTable) -> Self {
        Self {
            if_: atoms.intern("if"),
            define: atoms.intern("define"),
            set: atoms.intern("set"),
            let_: atoms.intern("let"),
            lambda: atoms.intern("lambda"),
            quote: atoms.intern("quote"),
        }
    }

    fn form(&self, atom: Atom) -> Option<SpecialForm> {
        match atom {
            a if a == self.if_ => Some(SpecialForm::If),
            a if a == self.define => Some(SpecialForm::Define),
            a if a == self.set => Some(SpecialForm::Set),
            a if a == self.let_ => Some(SpecialForm::Let),
            a if a == self.lambda => Some(SpecialForm::Lambda),
            a if a == self.quote => Some(SpecialForm::Quote),
            _ => None,
        }
    }
}

pub struct Env {
    atoms: AtomTable,
    keywords: Keywords,
    global: FrameRef,
    current: FrameRef,
    had_error: bool,
    depth: usize,
    options: ExecutionOptions,
}

impl Env {
    /// An environment whose global frame holds the primitive library.
    pub fn new() -> Self {
        Self::with_options(ExecutionOptions::default())
    }

    pub fn with_options(options: ExecutionOptions) -> Self {
        let mut env = Self::bare(options);
        stdlib::register(&mut env);
        env
    }

    /// An environment with an empty global frame.
    pub fn bare(options: ExecutionOptions) -> Self {
        let mut atoms = AtomTable::new();
        let keywords = Keywords::intern(&mut atoms);
        let global = Frame::global();
        Self {
            atoms,
            keywords,
            current: global.clone(),
            global,
            had_error: false,
            depth: 0,
            options,
        }
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    pub fn intern(&mut self, name: &str) -> Atom {
        self.atoms.intern(name)
    }

    /// Interns `name` and pairs the id with its display name.
    pub fn symbol(&mut self, name: &str) -> Symbol {
        let atom = self.atoms.intern(name);
        let name = self
            .atoms
            .name(atom)
            .cloned()
            .unwrap_or_else(|| Rc::from(name));
        Symbol::new(atom, name)
    }

    pub fn name_of(&self, atom: Atom) -> Option<&str> {
        self.atoms.name(atom).map(|name| &**name)
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    /// The special form named by `atom`, if it is a reserved word.
    pub fn special_form(&self, atom: Atom) -> Option<SpecialForm> {
        self.keywords.form(atom)
    }

    /// Walks from the current frame to the global frame.
    ///
    /// A miss raises the error flag instead of failing, so callers can report
    /// it in their own terms.
    pub fn lookup(&mut self, atom: Atom) -> Option<Value> {
        let found = frame::lookup(&self.current, atom);
        if found.is_none() {
            self.had_error = true;
        }
        found
    }

    pub fn lookup_name(&mut self, name: &str) -> Option<Value> {
        match self.atoms.get(name) {
            Some(atom) => self.lookup(atom),
            None => {
                self.had_error = true;
                None
            }
        }
    }

    /// Binds `name` in the current frame, shadowing outer bindings.
    pub fn define(&mut self, name: &str, value: Value) {
        let atom = self.atoms.intern(name);
        self.define_atom(atom, value);
    }

    pub fn define_atom(&mut self, atom: Atom, value: Value) {
        self.current.borrow_mut().define(atom, value);
    }

    pub fn define_primitive(&mut self, name: &str, primitive: Primitive) {
        self.define(name, Value::Primitive(primitive));
    }

    /// Mutates the nearest frame that already binds `atom`.
    ///
    /// Returns `false`, and raises the error flag, when nothing binds it.
    pub fn set(&mut self, atom: Atom, value: Value) -> bool {
        let assigned = frame::assign(&self.current, atom, value);
        if !assigned {
            self.had_error = true;
        }
        assigned
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn clear_error(&mut self) {
        self.had_error = false;
    }

    /// Enters a new block scope chained to the current frame.
    pub fn push(&mut self) {
        self.current = Frame::child(&self.current);
        trace!(depth = self.depth(), "push frame");
    }

    /// Leaves the current block scope. The global frame is never popped.
    pub fn pop(&mut self) {
        let parent = self.current.borrow().parent().cloned();
        if let Some(parent) = parent {
            self.current = parent;
            trace!(depth = self.depth(), "pop frame");
        }
    }

    /// Runs `f` inside a fresh block scope, popping it on every exit path.
    pub fn with_scope<T>(&mut self, f: impl FnOnce(&mut Env) -> T) -> T {
        self.push();
        let result = f(self);
        self.pop();
        result
    }

    /// Runs `f` with `frame` as the current frame, then restores the caller's.
    pub(crate) fn with_frame<T>(&mut self, frame: FrameRef, f: impl FnOnce(&mut Env) -> T) -> T {
        let saved = core::mem::replace(&mut self.current, frame);
        let result = f(self);
        self.current = saved;
        result
    }

    /// Tracks nesting of calls and scopes against the configured limit.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Env) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        if self.depth >= self.options.max_depth {
            debug!(depth = self.depth, "evaluation depth limit reached");
            return Err(EvalErrorKind::StackOverflow {
                depth: self.depth + 1,
                max_depth: self.options.max_depth,
            }
            .into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub fn current_frame(&self) -> FrameRef {
        self.current.clone()
    }

    pub fn global_frame(&self) -> FrameRef {
        self.global.clone()
    }

    /// Number of frames between the current frame and the global frame,
    /// inclusive. 1 at top level.
    pub fn depth(&self) -> usize {
        frame::chain_len(&self.current)
    }

    /// Drops every binding made since construction by rebuilding the global
    /// frame. Interned atoms survive.
    pub fn reset(&mut self) {
        self.global = Frame::global();
        self.current = self.global.clone();
        self.had_error = false;
        self.depth = 0;
        stdlib::register(self);
        debug!("environment reset");
    }

    /// Names bound in the global frame, sorted.
    pub fn global_names(&self) -> Vec<String> {
        let global = self.global.borrow();
        let mut names: Vec<String> = self
            .atoms
            .iter()
            .filter(|(atom, _)| global.contains(*atom))
            .map(|(_, name)| name.to_string())
            .collect();
        names.sort();
        names
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
