//! Symbol interning.
//!
//! Every symbol name seen by an [`Env`](crate::env::Env) is mapped to a small
//! integer [`Atom`] so frames can key their bindings by id and compare symbols
//! without touching the string data.

use alloc::rc::Rc;
use core::fmt;
use hashbrown::HashMap;

/// Interned symbol id. Stable and unique for the lifetime of its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

impl Atom {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bijection between symbol names and [`Atom`]s.
#[derive(Debug, Default)]
pub struct AtomTable {
    ids: HashMap<Rc<str>, Atom>,
    names: Vec<Rc<str>>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, allocating a fresh one on first sight.
    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(atom) = self.ids.get(name) {
            return *atom;
        }
        let atom = Atom(self.names.len() as u32);
        let name: Rc<str> = Rc::from(name);
        self.names.push(name.clone());
        self.ids.insert(name, atom);
        atom
    }

    /// Looks up an existing id without interning.
    pub fn get(&self, name: &str) -> Option<Atom> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, atom: Atom) -> Option<&Rc<str>> {
        self.names.get(atom.index())
    }

    /// Every interned name, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (Atom(index as u32), &**name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
