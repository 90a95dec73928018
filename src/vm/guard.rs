//! Scoped acquisition for VM stacks.
//!
//! Each `VM::push_*` method returns a `StackGuard` that dereferences to the
//! VM and undoes the push when dropped. Code between push and pop can use
//! `?` freely: the pop runs on success, on error return, and during panic
//! unwinding alike.

use crate::error::SourceLoc;
use crate::value::Module;
use crate::vm::block::Block;
use crate::vm::core::VM;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

/// What a guard undoes when it goes out of scope
pub(crate) enum Restore {
    /// Pop a frame and restore the source position saved at push time
    Frame(SourceLoc),
    IterMode,
    Scope,
    Block,
    /// Put back the block stack that was set aside for a block body
    Blocks(Vec<Rc<Block>>),
    Wrapper(Option<Rc<Module>>),
}

#[must_use = "dropping a StackGuard immediately undoes the push"]
pub struct StackGuard<'a> {
    vm: &'a mut VM,
    restore: Option<Restore>,
}

impl<'a> StackGuard<'a> {
    pub(crate) fn new(vm: &'a mut VM, restore: Restore) -> Self {
        StackGuard {
            vm,
            restore: Some(restore),
        }
    }
}

impl Deref for StackGuard<'_> {
    type Target = VM;

    fn deref(&self) -> &VM {
        self.vm
    }
}

impl DerefMut for StackGuard<'_> {
    fn deref_mut(&mut self) -> &mut VM {
        self.vm
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        match self.restore.take() {
            Some(Restore::Frame(position)) => self.vm.leave_frame(position),
            Some(Restore::IterMode) => self.vm.leave_iter_mode(),
            Some(Restore::Scope) => self.vm.leave_scope(),
            Some(Restore::Block) => self.vm.leave_block(),
            Some(Restore::Blocks(saved)) => self.vm.restore_blocks(saved),
            Some(Restore::Wrapper(previous)) => self.vm.restore_wrapper(previous),
            None => {}
        }
    }
}
