use super::LexicalBinding;
use crate::vm::{Block, VM};
use std::rc::Rc;
use tracing::debug;

impl LexicalBinding {
    /// Binding over the context an existing block captured
    pub fn from_block(block: &Block) -> Rc<Self> {
        debug!(frame = ?block.frame(), "binding from block");
        Rc::new(LexicalBinding {
            frame: block.frame().clone(),
            scope: block.scope().clone(),
            wrapper: block.wrapper().cloned(),
        })
    }

    /// Binding over the current frame and scope
    pub fn new(vm: &VM) -> Rc<Self> {
        debug!(frame = ?vm.current_frame(), "binding of current frame");
        Rc::new(LexicalBinding {
            frame: vm.current_frame().clone(),
            scope: vm.current_scope().clone(),
            wrapper: vm.wrapper().cloned(),
        })
    }

    /// The caller's frame with the current scope: what `eval` without an
    /// explicit binding sees. At the outermost level the current frame
    /// stands in for the missing caller.
    pub fn for_eval(vm: &VM) -> Rc<Self> {
        let frame = vm.previous_frame().unwrap_or_else(|| vm.current_frame());
        debug!(frame = ?frame, "binding for eval");
        Rc::new(LexicalBinding {
            frame: frame.clone(),
            scope: vm.current_scope().clone(),
            wrapper: vm.wrapper().cloned(),
        })
    }

    /// The caller's frame and scope
    pub fn of_caller(vm: &VM) -> Rc<Self> {
        let frame = vm.previous_frame().unwrap_or_else(|| vm.current_frame());
        let scope = vm.previous_scope().unwrap_or_else(|| vm.current_scope());
        debug!(frame = ?frame, "binding of caller");
        Rc::new(LexicalBinding {
            frame: frame.clone(),
            scope: scope.clone(),
            wrapper: vm.wrapper().cloned(),
        })
    }
}
