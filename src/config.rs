//! VM configuration
//!
//! Limits and diagnostics switches for an execution context.

/// Configuration for a [`VM`](crate::VM)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum number of active frames before calls fail with a stack
    /// overflow error (default: 1000)
    pub max_call_depth: usize,
    /// Frames reserved up front in the call-frame stack (default: 64)
    pub initial_frame_capacity: usize,
    /// Emit a `tracing` event for every frame/iteration-mode push and pop
    /// (default: false)
    pub trace_stacks: bool,
}

impl VmConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self {
            max_call_depth: 1000,
            initial_frame_capacity: 64,
            trace_stacks: false,
        }
    }

    /// Set the maximum call depth
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Set the initial frame capacity
    pub fn with_initial_frame_capacity(mut self, capacity: usize) -> Self {
        self.initial_frame_capacity = capacity;
        self
    }

    /// Enable or disable stack tracing
    pub fn with_trace_stacks(mut self, enabled: bool) -> Self {
        self.trace_stacks = enabled;
        self
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self::new()
    }
}
