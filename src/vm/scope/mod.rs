//! Local-variable scopes
//!
//! A scope is shared storage: the activation that created it and any
//! binding or block that captured it hold the same `Rc`, so writes through
//! one are visible to the others.

mod runtime_scope;
mod scope_stack;

pub use runtime_scope::{Scope, ScopeRef};
pub use scope_stack::ScopeStack;

/// Type of scope (what kind of code owns the variables)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Outermost scope of the execution context
    TopLevel,
    /// Method body
    Method,
    /// Block body with its own locals
    Block,
}
