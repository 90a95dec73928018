//! Activation records
//!
//! Frames are immutable once built and handed around as `FrameRef`. The
//! call-frame stack owns one reference while the activation runs; a block
//! or binding that captured the frame keeps it alive after the pop.

use crate::error::SourceLoc;
use crate::value::{Module, Value, Visibility};
use crate::vm::stack::IterMode;
use std::fmt;
use std::rc::Rc;

pub type FrameRef = Rc<Frame>;

/// A single call activation: self, dispatch linkage and block status
#[derive(Clone)]
pub struct Frame {
    self_value: Value,
    name: Option<Rc<str>>,
    module: Option<Rc<Module>>,
    args: Rc<[Value]>,
    visibility: Visibility,
    position: SourceLoc,
    iter: IterMode,
}

impl Frame {
    /// An anonymous frame for `self_value`, recording the iteration mode
    /// and source position current at creation
    pub fn new(self_value: Value, iter: IterMode, position: SourceLoc) -> Self {
        Frame {
            self_value,
            name: None,
            module: None,
            args: Rc::from(Vec::new()),
            visibility: Visibility::Public,
            position,
            iter,
        }
    }

    /// Attach the method name and the module it dispatches under
    pub fn with_method(mut self, name: Rc<str>, module: Rc<Module>) -> Self {
        self.name = Some(name);
        self.module = Some(module);
        self
    }

    pub fn with_args(mut self, args: &[Value]) -> Self {
        self.args = Rc::from(args.to_vec());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn self_value(&self) -> &Value {
        &self.self_value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn module(&self) -> Option<&Rc<Module>> {
        self.module.as_ref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn position(&self) -> &SourceLoc {
        &self.position
    }

    pub fn iter(&self) -> IterMode {
        self.iter
    }

    /// Whether the activation was entered with a block
    pub fn is_block_given(&self) -> bool {
        self.iter == IterMode::Cur
    }

    /// An independent copy with its own identity
    pub fn duplicate(&self) -> FrameRef {
        Rc::new(self.clone())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.module, &self.name) {
            (Some(module), Some(name)) => write!(f, "<frame {}#{}", module.name(), name)?,
            (None, Some(name)) => write!(f, "<frame {}", name)?,
            _ => write!(f, "<frame (anonymous)")?,
        }
        write!(f, " at {} iter={:?}>", self.position, self.iter)
    }
}
