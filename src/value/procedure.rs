//! Proc objects: a block reified as a first-class value

use crate::binding::LexicalBinding;
use crate::error::{LResult, SourceLoc};
use crate::value::{Arity, BoundMethod, Value};
use crate::vm::block::{Block, BlockBody};
use crate::vm::VM;
use std::fmt;
use std::rc::Rc;

pub struct Proc {
    block: Rc<Block>,
    position: SourceLoc,
}

impl Proc {
    pub fn new(block: Rc<Block>, position: SourceLoc) -> Self {
        Proc { block, position }
    }

    /// Activate the underlying block through the yield protocol
    pub fn call(&self, vm: &mut VM, args: &[Value]) -> LResult<Value> {
        vm.yield_block(&self.block, args)
    }

    pub fn arity(&self) -> Arity {
        self.block.body().arity()
    }

    pub fn block(&self) -> &Rc<Block> {
        &self.block
    }

    /// Where the proc was created
    pub fn position(&self) -> &SourceLoc {
        &self.position
    }

    /// Binding over the context the block captured
    pub fn binding(&self) -> Rc<LexicalBinding> {
        LexicalBinding::from_block(&self.block)
    }

    /// The method this proc forwards to, for procs built by `to_proc`
    pub fn method(&self) -> Option<&Rc<BoundMethod>> {
        match self.block.body() {
            BlockBody::Method(method) => Some(method),
            BlockBody::Native { .. } => None,
        }
    }
}

impl PartialEq for Proc {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.block, &other.block)
    }
}

impl fmt::Display for Proc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#<Proc:0x{:x}@{}>",
            Rc::as_ptr(&self.block) as usize,
            self.position
        )
    }
}

impl fmt::Debug for Proc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proc")
            .field("body", self.block.body())
            .field("position", &self.position)
            .finish()
    }
}
