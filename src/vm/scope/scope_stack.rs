use super::runtime_scope::{Scope, ScopeRef};
use super::ScopeKind;

/// Manages the runtime scope stack during execution
#[derive(Debug)]
pub struct ScopeStack {
    /// Stack of scopes (index 0 is the top-level scope)
    stack: Vec<ScopeRef>,
}

impl ScopeStack {
    /// Create a new scope stack with a top-level scope
    pub fn new() -> Self {
        ScopeStack {
            stack: vec![Scope::new(ScopeKind::TopLevel)],
        }
    }

    /// Push a scope onto the stack
    pub fn push(&mut self, scope: ScopeRef) {
        self.stack.push(scope);
    }

    /// Pop the current scope. The top-level scope is never popped.
    pub fn pop(&mut self) -> ScopeRef {
        assert!(
            self.stack.len() > 1,
            "VM bug: scope stack underflow (pop without matching push)"
        );
        self.stack.pop().expect("VM bug: scope stack underflow")
    }

    /// Get the current depth (1 = only the top-level scope)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current(&self) -> &ScopeRef {
        self.stack.last().expect("VM bug: scope stack is empty")
    }

    /// The scope directly below the current one
    pub fn previous(&self) -> Option<&ScopeRef> {
        let len = self.stack.len();
        if len < 2 {
            return None;
        }
        self.stack.get(len - 2)
    }

    /// The top-level scope
    pub fn root(&self) -> &ScopeRef {
        &self.stack[0]
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
