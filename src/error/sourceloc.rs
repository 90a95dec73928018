//! Source location tracking
//!
//! Frames record the location that was current when they were pushed, and
//! the VM restores it when they pop. Errors may carry one for reporting.

use std::fmt;
use std::rc::Rc;

/// A file/line position in the program being executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoc {
    pub file: Rc<str>,
    pub line: usize,
}

impl SourceLoc {
    pub fn new(file: impl Into<Rc<str>>, line: usize) -> Self {
        SourceLoc {
            file: file.into(),
            line,
        }
    }

    /// Location used before any code has been loaded
    pub fn unknown() -> Self {
        SourceLoc::new("-", 0)
    }

    pub fn is_unknown(&self) -> bool {
        self.line == 0 && &*self.file == "-"
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        SourceLoc::unknown()
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
