//! Execution context for the callable core
//!
//! The `VM` owns the call-frame stack (frames plus iteration modes), the
//! scope stack and the blocks supplied to active calls. Every push is made
//! through a [`StackGuard`], so stacks unwind on any exit path.

pub mod block;
pub mod classes;
pub mod core;
pub mod frame;
pub mod guard;
pub mod iterate;
pub mod scope;
pub mod stack;

pub use block::{Block, BlockBody, NativeBlockFn};
pub use classes::BuiltinClasses;
pub use self::core::VM;
pub use frame::{Frame, FrameRef};
pub use guard::StackGuard;
pub use scope::{Scope, ScopeKind, ScopeRef, ScopeStack};
pub use stack::{CallFrameStack, IterMode};
