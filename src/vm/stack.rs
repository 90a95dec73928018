//! The call-frame stack and its parallel iteration-mode stack.
//!
//! Both stacks are strictly LIFO. Every push must be matched by exactly
//! one pop; popping an empty stack is a bug in the caller and panics.
//! Inside the VM, pushes go through `StackGuard` so the pop also runs when
//! the code in between fails.

use crate::vm::frame::FrameRef;
use smallvec::SmallVec;

/// Block status of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterMode {
    /// No block
    #[default]
    Not,
    /// The next call is about to receive a block
    Pre,
    /// Executing inside a call that received a block, or a block body
    Cur,
}

type FrameVec = SmallVec<[FrameRef; 32]>;
type IterVec = SmallVec<[IterMode; 32]>;

#[derive(Debug, Default)]
pub struct CallFrameStack {
    frames: FrameVec,
    iters: IterVec,
}

impl CallFrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CallFrameStack {
            frames: SmallVec::with_capacity(capacity),
            iters: SmallVec::with_capacity(capacity),
        }
    }

    pub fn push_frame(&mut self, frame: FrameRef) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) -> FrameRef {
        self.frames
            .pop()
            .expect("VM bug: frame stack underflow (pop without matching push)")
    }

    pub fn current_frame(&self) -> Option<&FrameRef> {
        self.frames.last()
    }

    /// The caller's frame: one below the current one
    pub fn previous_frame(&self) -> Option<&FrameRef> {
        let len = self.frames.len();
        if len < 2 {
            return None;
        }
        self.frames.get(len - 2)
    }

    pub fn push_iter_mode(&mut self, mode: IterMode) {
        self.iters.push(mode);
    }

    pub fn pop_iter_mode(&mut self) -> IterMode {
        self.iters
            .pop()
            .expect("VM bug: iteration-mode stack underflow (pop without matching push)")
    }

    /// The innermost iteration mode; `Not` when nothing has been pushed
    pub fn current_iter_mode(&self) -> IterMode {
        self.iters.last().copied().unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn iter_depth(&self) -> usize {
        self.iters.len()
    }

    /// Active frames, innermost first
    pub fn frames(&self) -> impl Iterator<Item = &FrameRef> {
        self.frames.iter().rev()
    }
}
