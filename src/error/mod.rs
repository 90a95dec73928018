//! Unified error system for calyx

mod builders;
mod sourceloc;
mod types;

pub use sourceloc::SourceLoc;
pub use types::{ErrorKind, LError, LResult, StackFrame};
