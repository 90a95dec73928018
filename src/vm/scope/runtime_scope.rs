use super::ScopeKind;
use crate::value::Value;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type ScopeRef = Rc<Scope>;

/// Variables of a single lexical scope
pub struct Scope {
    kind: ScopeKind,
    variables: RefCell<FxHashMap<Rc<str>, Value>>,
}

impl Scope {
    /// Create a new, empty scope
    pub fn new(kind: ScopeKind) -> ScopeRef {
        Rc::new(Scope {
            kind,
            variables: RefCell::new(FxHashMap::default()),
        })
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Set a variable in this scope (returns old value if present)
    pub fn set(&self, name: &str, value: Value) -> Option<Value> {
        self.variables.borrow_mut().insert(Rc::from(name), value)
    }

    /// Get a variable from this scope
    pub fn get(&self, name: &str) -> Option<Value> {
        self.variables.borrow().get(name).cloned()
    }

    /// Check if a variable is defined in this scope
    pub fn contains(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }

    /// Variable names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .variables
            .borrow()
            .keys()
            .map(|k| k.to_string())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.variables.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<scope:{:?} vars={:?}>", self.kind, self.names())
    }
}
