//! Iteration drivers
//!
//! `iterate` supplies a block to whatever the driver calls next. The
//! method-proc driver uses it to turn a `BoundMethod` into a `Proc`: the
//! block is built around the method and picked up by `proc_from_block`
//! inside a fresh frame entered as a block-taking call.

use crate::error::{LError, LResult};
use crate::value::{BoundMethod, Proc, Value};
use crate::vm::block::BlockBody;
use crate::vm::core::VM;
use crate::vm::stack::IterMode;
use std::rc::Rc;
use tracing::debug;

impl VM {
    /// Run `driver` with a block around `body` supplied to it.
    ///
    /// The block captures the current context. While the driver runs the
    /// iteration mode is `Pre`, so the next method call it makes is
    /// entered with the block.
    pub fn iterate<R>(
        &mut self,
        body: BlockBody,
        driver: impl FnOnce(&mut VM) -> LResult<R>,
    ) -> LResult<R> {
        let block = self.capture_block(body);
        let mut vm = self.push_block(block);
        let mut vm = vm.push_iter_mode(IterMode::Pre);
        driver(&mut vm)
    }

    /// Reify the block given to the current activation as a `Proc`
    pub fn proc_from_block(&mut self) -> LResult<Rc<Proc>> {
        if !self.is_block_given() {
            return Err(LError::argument_error(
                "tried to create Proc object without a block",
            ));
        }
        let block = self
            .current_block()
            .cloned()
            .expect("VM bug: block given without an active block");
        let proc = Proc::new(block, self.position().clone());
        debug!(proc = %proc, "proc created");
        Ok(Rc::new(proc))
    }

    /// Build a `Proc` whose body forwards to `method`
    pub fn method_proc(&mut self, method: Rc<BoundMethod>) -> LResult<Rc<Proc>> {
        self.iterate(BlockBody::Method(method), |vm| {
            let mut vm = vm.push_iter_mode(IterMode::Cur);
            let frame = Rc::new(vm.new_frame(Value::Nil));
            let mut vm = vm.push_frame(frame);
            vm.proc_from_block()
        })
    }
}
