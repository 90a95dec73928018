//! Lexical bindings
//!
//! A `LexicalBinding` captures a (frame, scope, wrapper) triple so code can
//! later be evaluated "as if" still inside the original activation. Capture
//! shares the handles, never copies them: the captured frame and scope stay
//! alive as long as the binding does, and local-variable writes through the
//! binding are visible to the activation that owns the scope.
//!
//! # Capture policies
//!
//! | Constructor | Frame | Scope |
//! |---|---|---|
//! | [`LexicalBinding::from_block`] | block's captured frame | block's captured scope |
//! | [`LexicalBinding::new`] | current | current |
//! | [`LexicalBinding::for_eval`] | previous (caller's) | current |
//! | [`LexicalBinding::of_caller`] | previous | previous |

mod capture;
mod replay;

pub use replay::Evaluator;

use crate::value::{Module, Value};
use crate::vm::{FrameRef, ScopeRef};
use std::fmt;
use std::rc::Rc;

pub struct LexicalBinding {
    frame: FrameRef,
    scope: ScopeRef,
    wrapper: Option<Rc<Module>>,
}

impl LexicalBinding {
    pub fn frame(&self) -> &FrameRef {
        &self.frame
    }

    pub fn scope(&self) -> &ScopeRef {
        &self.scope
    }

    pub fn wrapper(&self) -> Option<&Rc<Module>> {
        self.wrapper.as_ref()
    }

    /// `self` of the captured frame
    pub fn receiver(&self) -> &Value {
        self.frame.self_value()
    }

    pub fn local_variable_get(&self, name: &str) -> Option<Value> {
        self.scope.get(name)
    }

    pub fn local_variable_set(&self, name: &str, value: Value) {
        self.scope.set(name, value);
    }

    pub fn local_variable_defined(&self, name: &str) -> bool {
        self.scope.contains(name)
    }

    pub fn local_variables(&self) -> Vec<String> {
        self.scope.names()
    }
}

impl fmt::Debug for LexicalBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalBinding")
            .field("frame", &self.frame)
            .field("scope", &self.scope)
            .field("wrapper", &self.wrapper.as_ref().map(|w| w.name()))
            .finish()
    }
}
