use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use hashbrown::HashMap;

use crate::atoms::Atom;
use crate::values::Value;

/// Shared handle to a frame.
///
/// A frame stays alive as long as its scope, any child frame, or any closure
/// that captured it still holds a handle. Mutation through one handle is seen
/// by all of them.
pub type FrameRef = Rc<RefCell<Frame>>;

/// One level of the lexical scope chain.
#[derive(Default)]
pub struct Frame {
    bindings: HashMap<Atom, Value>,
    parent: Option<FrameRef>,
}

impl Frame {
    /// A frame with no parent.
    pub fn global() -> FrameRef {
        Rc::new(RefCell::new(Frame::default()))
    }

    pub fn child(parent: &FrameRef) -> FrameRef {
        Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent: Some(parent.clone()),
        }))
    }

    pub fn parent(&self) -> Option<&FrameRef> {
        self.parent.as_ref()
    }

    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Creates or overwrites a binding in this frame only.
    pub fn define(&mut self, atom: Atom, value: Value) {
        self.bindings.insert(atom, value);
    }

    /// Looks up a binding in this frame only.
    pub fn get(&self, atom: Atom) -> Option<&Value> {
        self.bindings.get(&atom)
    }

    pub fn contains(&self, atom: Atom) -> bool {
        self.bindings.contains_key(&atom)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("bindings", &self.bindings.len())
            .field("global", &self.is_global())
            .finish()
    }
}

/// Walks from `frame` to the global frame and returns the first binding.
pub fn lookup(frame: &FrameRef, atom: Atom) -> Option<Value> {
    let mut current = frame.clone();
    loop {
        let parent = {
            let borrowed = current.borrow();
            if let Some(value) = borrowed.get(atom) {
                return Some(value.clone());
            }
            borrowed.parent.clone()
        };
        current = parent?;
    }
}

/// Overwrites the nearest existing binding of `atom`, walking outward.
///
/// Returns `false` if no frame in the chain binds it.
pub fn assign(frame: &FrameRef, atom: Atom, value: Value) -> bool {
    let mut current = frame.clone();
    loop {
        let parent = {
            let mut borrowed = current.borrow_mut();
            if borrowed.contains(atom) {
                borrowed.define(atom, value);
                return true;
            }
            borrowed.parent.clone()
        };
        match parent {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

/// Number of frames from `frame` up to and including the global frame.
pub fn chain_len(frame: &FrameRef) -> usize {
    let mut len = 1;
    let mut current = frame.clone();
    loop {
        let parent = current.borrow().parent.clone();
        match parent {
            Some(parent) => {
                len += 1;
                current = parent;
            }
            None => return len,
        }
    }
}
