//! Blocks and the yield protocol
//!
//! A block is captured from the context that supplies it: the current
//! frame, scope, wrapper module and self, plus the block that was active
//! at that point. Yielding re-enters that context under `IterMode::Cur`
//! and runs the block body there.

use crate::error::{LError, LResult, SourceLoc};
use crate::value::{Arity, BoundMethod, Module, Value};
use crate::vm::core::VM;
use crate::vm::frame::FrameRef;
use crate::vm::scope::ScopeRef;
use crate::vm::stack::IterMode;
use std::fmt;
use std::rc::Rc;

pub type NativeBlockFn = Rc<dyn Fn(&mut VM, &[Value]) -> LResult<Value>>;

/// What runs when a block is activated
#[derive(Clone)]
pub enum BlockBody {
    Native { arity: Arity, func: NativeBlockFn },
    /// Forwards to a method object, splatting a lone array argument
    Method(Rc<BoundMethod>),
}

impl BlockBody {
    /// A native block accepting any number of arguments
    pub fn native(func: impl Fn(&mut VM, &[Value]) -> LResult<Value> + 'static) -> Self {
        BlockBody::Native {
            arity: Arity::AtLeast(0),
            func: Rc::new(func),
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            BlockBody::Native { arity, .. } => *arity,
            BlockBody::Method(method) => method.arity(),
        }
    }

    /// Run the body once. The caller has already restored the block's
    /// context.
    pub fn activate(&self, vm: &mut VM, args: &[Value]) -> LResult<Value> {
        match self {
            BlockBody::Native { func, .. } => func(vm, args),
            BlockBody::Method(method) => method_block_call(vm, method, args),
        }
    }
}

impl fmt::Debug for BlockBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockBody::Native { arity, .. } => write!(f, "<native block/{}>", arity),
            BlockBody::Method(method) => write!(f, "<{}>", method),
        }
    }
}

// One activation of a method block: a single array argument is spread
// into the argument list, anything else is passed as received.
fn method_block_call(vm: &mut VM, method: &BoundMethod, args: &[Value]) -> LResult<Value> {
    match args {
        [Value::Array(items)] => {
            let items = items.borrow().clone();
            method.call(vm, Some(&items))
        }
        _ => method.call(vm, Some(args)),
    }
}

/// A block together with the context it was created in
#[derive(Debug)]
pub struct Block {
    frame: FrameRef,
    scope: ScopeRef,
    wrapper: Option<Rc<Module>>,
    self_value: Value,
    body: BlockBody,
    position: SourceLoc,
    outer: Option<Rc<Block>>,
}

impl Block {
    pub fn frame(&self) -> &FrameRef {
        &self.frame
    }

    pub fn scope(&self) -> &ScopeRef {
        &self.scope
    }

    pub fn wrapper(&self) -> Option<&Rc<Module>> {
        self.wrapper.as_ref()
    }

    pub fn self_value(&self) -> &Value {
        &self.self_value
    }

    pub fn body(&self) -> &BlockBody {
        &self.body
    }

    pub fn position(&self) -> &SourceLoc {
        &self.position
    }

    /// The block that was active where this one was captured. A `yield`
    /// inside this block's body goes there.
    pub fn outer(&self) -> Option<&Rc<Block>> {
        self.outer.as_ref()
    }
}

impl VM {
    /// Capture the current context around `body`
    pub fn capture_block(&self, body: BlockBody) -> Rc<Block> {
        Rc::new(Block {
            frame: self.current_frame().clone(),
            scope: self.current_scope().clone(),
            wrapper: self.wrapper().cloned(),
            self_value: self.current_self().clone(),
            body,
            position: self.position().clone(),
            outer: self.current_block().cloned(),
        })
    }

    /// Activate `block` with `args` inside the context it captured.
    ///
    /// While the body runs, the only visible block is the one that was
    /// active at capture time, so a `yield` in the body reaches the
    /// enclosing method's block rather than re-entering this one.
    pub fn yield_block(&mut self, block: &Rc<Block>, args: &[Value]) -> LResult<Value> {
        if self.frames().depth() >= self.config().max_call_depth {
            return Err(LError::stack_overflow(self.config().max_call_depth)
                .with_stack_trace(self.capture_stack_trace()));
        }
        let mut vm = self.enter_block_context(block.outer.clone());
        let mut vm = vm.push_iter_mode(IterMode::Cur);
        let mut vm = vm.push_frame(block.frame.clone());
        let mut vm = vm.push_scope(block.scope.clone());
        let mut vm = vm.push_wrapper(block.wrapper.clone());
        block.body.activate(&mut vm, args)
    }

    /// Yield to the block given to the current activation
    pub fn yield_values(&mut self, args: &[Value]) -> LResult<Value> {
        if !self.is_block_given() {
            return Err(LError::no_block_given());
        }
        let block = self
            .current_block()
            .cloned()
            .expect("VM bug: block given without an active block");
        self.yield_block(&block, args)
    }
}
