use crate::config::VmConfig;
use crate::error::{LError, LResult, SourceLoc, StackFrame};
use crate::resolve::{MethodTableResolver, Resolver};
use crate::value::{BoundMethod, MethodImpl, Module, Object, Value, Visibility};
use crate::vm::block::Block;
use crate::vm::classes::BuiltinClasses;
use crate::vm::frame::{Frame, FrameRef};
use crate::vm::guard::{Restore, StackGuard};
use crate::vm::scope::{Scope, ScopeKind, ScopeRef, ScopeStack};
use crate::vm::stack::{CallFrameStack, IterMode};
use std::rc::Rc;
use tracing::{debug, trace};

/// An execution context: one call-frame stack, one scope stack and the
/// blocks supplied to active calls. Not shared across threads.
pub struct VM {
    config: VmConfig,
    stack: CallFrameStack,
    scopes: ScopeStack,
    blocks: Vec<Rc<Block>>,
    wrapper: Option<Rc<Module>>,
    position: SourceLoc,
    classes: BuiltinClasses,
    resolver: Rc<dyn Resolver>,
    top_self: Value,
}

impl VM {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        let classes = BuiltinClasses::new();
        let top_self = Value::Object(Object::new(classes.object.clone()));
        let mut stack = CallFrameStack::with_capacity(config.initial_frame_capacity);
        stack.push_frame(Rc::new(Frame::new(
            top_self.clone(),
            IterMode::Not,
            SourceLoc::unknown(),
        )));
        VM {
            config,
            stack,
            scopes: ScopeStack::new(),
            blocks: Vec::new(),
            wrapper: None,
            position: SourceLoc::unknown(),
            classes,
            resolver: Rc::new(MethodTableResolver),
            top_self,
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn classes(&self) -> &BuiltinClasses {
        &self.classes
    }

    /// The object top-level code runs as
    pub fn top_self(&self) -> &Value {
        &self.top_self
    }

    pub fn set_resolver(&mut self, resolver: Rc<dyn Resolver>) {
        self.resolver = resolver;
    }

    pub fn position(&self) -> &SourceLoc {
        &self.position
    }

    pub fn set_position(&mut self, position: SourceLoc) {
        self.position = position;
    }

    /// Module wrapping the code currently being loaded, if any
    pub fn wrapper(&self) -> Option<&Rc<Module>> {
        self.wrapper.as_ref()
    }

    // --- Stack inspection ---

    pub fn frames(&self) -> &CallFrameStack {
        &self.stack
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn current_frame(&self) -> &FrameRef {
        self.stack
            .current_frame()
            .expect("VM bug: root frame was popped")
    }

    pub fn previous_frame(&self) -> Option<&FrameRef> {
        self.stack.previous_frame()
    }

    pub fn current_scope(&self) -> &ScopeRef {
        self.scopes.current()
    }

    pub fn previous_scope(&self) -> Option<&ScopeRef> {
        self.scopes.previous()
    }

    pub fn current_iter_mode(&self) -> IterMode {
        self.stack.current_iter_mode()
    }

    pub fn current_self(&self) -> &Value {
        self.current_frame().self_value()
    }

    /// The block supplied to the innermost call that received one. Inside
    /// a block body this is the block that was active where the running
    /// block was captured.
    pub fn current_block(&self) -> Option<&Rc<Block>> {
        self.blocks.last()
    }

    /// True inside an activation that was entered with a block
    pub fn is_block_given(&self) -> bool {
        !self.blocks.is_empty() && self.current_frame().is_block_given()
    }

    /// True when a block has been supplied for the next call
    pub fn block_pending(&self) -> bool {
        !self.blocks.is_empty() && self.current_iter_mode() == IterMode::Pre
    }

    /// Current call chain for error reports, innermost first
    pub fn capture_stack_trace(&self) -> Vec<StackFrame> {
        self.stack
            .frames()
            .map(|frame| StackFrame {
                function_name: frame.name().map(str::to_string),
                location: Some(frame.position().clone()),
            })
            .collect()
    }

    // --- Dispatch ---

    pub fn class_of(&self, value: &Value) -> Rc<Module> {
        self.classes.class_of(value)
    }

    /// Resolve `name` on `receiver` into a fresh method object
    pub fn method(&self, receiver: &Value, name: &str) -> LResult<Rc<BoundMethod>> {
        let class = self.class_of(receiver);
        let resolved = self.resolver.resolve(receiver, &class, name)?;
        Ok(Rc::new(BoundMethod::new(
            resolved,
            Rc::from(name),
            receiver.clone(),
        )))
    }

    /// Resolve and call `name` on `receiver`
    pub fn funcall(&mut self, receiver: &Value, name: &str, args: &[Value]) -> LResult<Value> {
        let method = self.method(receiver, name)?;
        method.call(self, Some(args))
    }

    /// A frame for `self_value` that records the current iteration mode
    /// and source position
    pub fn new_frame(&self, self_value: Value) -> Frame {
        Frame::new(self_value, self.current_iter_mode(), self.position.clone())
    }

    /// Invoke an already-resolved implementation in a new activation.
    ///
    /// The activation is entered with a block when one is pending; its
    /// frame, scope and iteration mode are popped on every exit path.
    pub fn call0(
        &mut self,
        module: &Rc<Module>,
        receiver: &Value,
        name: &Rc<str>,
        args: &[Value],
        visibility: Visibility,
        implementation: &dyn MethodImpl,
    ) -> LResult<Value> {
        if self.stack.depth() >= self.config.max_call_depth {
            return Err(LError::stack_overflow(self.config.max_call_depth)
                .with_stack_trace(self.capture_stack_trace()));
        }
        let mode = if self.block_pending() {
            IterMode::Cur
        } else {
            IterMode::Not
        };
        let frame = Frame::new(receiver.clone(), mode, self.position.clone())
            .with_method(name.clone(), module.clone())
            .with_args(args)
            .with_visibility(visibility);

        let mut vm = self.push_iter_mode(mode);
        let mut vm = vm.push_frame(Rc::new(frame));
        let mut vm = vm.push_scope(Scope::new(ScopeKind::Method));
        implementation.invoke(&mut vm, receiver, args)
    }

    // --- Guarded pushes ---

    pub fn push_frame(&mut self, frame: FrameRef) -> StackGuard<'_> {
        if self.config.trace_stacks {
            trace!(depth = self.stack.depth() + 1, frame = ?frame, "push frame");
        }
        self.stack.push_frame(frame);
        let saved = self.position.clone();
        StackGuard::new(self, Restore::Frame(saved))
    }

    pub fn push_iter_mode(&mut self, mode: IterMode) -> StackGuard<'_> {
        if self.config.trace_stacks {
            trace!(depth = self.stack.iter_depth() + 1, ?mode, "push iter mode");
        }
        self.stack.push_iter_mode(mode);
        StackGuard::new(self, Restore::IterMode)
    }

    pub fn push_scope(&mut self, scope: ScopeRef) -> StackGuard<'_> {
        self.scopes.push(scope);
        StackGuard::new(self, Restore::Scope)
    }

    pub fn push_block(&mut self, block: Rc<Block>) -> StackGuard<'_> {
        self.blocks.push(block);
        StackGuard::new(self, Restore::Block)
    }

    /// Replace the block stack with `outer` alone for the duration of a
    /// block body
    pub(crate) fn enter_block_context(&mut self, outer: Option<Rc<Block>>) -> StackGuard<'_> {
        let saved = std::mem::replace(&mut self.blocks, outer.into_iter().collect());
        StackGuard::new(self, Restore::Blocks(saved))
    }

    pub fn push_wrapper(&mut self, wrapper: Option<Rc<Module>>) -> StackGuard<'_> {
        let previous = std::mem::replace(&mut self.wrapper, wrapper);
        StackGuard::new(self, Restore::Wrapper(previous))
    }

    pub(crate) fn leave_frame(&mut self, position: SourceLoc) {
        let frame = self.stack.pop_frame();
        if self.config.trace_stacks {
            trace!(depth = self.stack.depth(), frame = ?frame, "pop frame");
        }
        self.position = position;
    }

    pub(crate) fn leave_iter_mode(&mut self) {
        let mode = self.stack.pop_iter_mode();
        if self.config.trace_stacks {
            trace!(depth = self.stack.iter_depth(), ?mode, "pop iter mode");
        }
    }

    pub(crate) fn leave_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn leave_block(&mut self) {
        self.blocks
            .pop()
            .expect("VM bug: block stack underflow (pop without matching push)");
    }

    pub(crate) fn restore_blocks(&mut self, saved: Vec<Rc<Block>>) {
        self.blocks = saved;
    }

    pub(crate) fn restore_wrapper(&mut self, previous: Option<Rc<Module>>) {
        self.wrapper = previous;
    }

    /// Load-time wrapping: run `f` with `wrapper` as the current wrapper
    /// module
    pub fn with_wrapper<R>(&mut self, wrapper: Rc<Module>, f: impl FnOnce(&mut VM) -> R) -> R {
        debug!(wrapper = wrapper.name(), "entering wrapper module");
        let mut vm = self.push_wrapper(Some(wrapper));
        f(&mut vm)
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}
