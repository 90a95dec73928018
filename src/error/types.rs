//! Error type definitions for calyx

use super::sourceloc::SourceLoc;
use std::error::Error as StdError;
use std::fmt;

/// Failure categories raised (or passed through) by the callable core.
///
/// Stack underflow is deliberately absent: an unbalanced pop is a bug in
/// the caller and panics instead of producing a value of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    // Argument-related errors
    ArityMismatch {
        expected: usize,
        got: usize,
    },
    ArityAtLeast {
        minimum: usize,
        got: usize,
    },
    ArityRange {
        min: usize,
        max: usize,
        got: usize,
    },
    ArgumentError {
        message: String,
    },

    // Type-related errors
    TypeError {
        message: String,
    },

    // Resolution errors (produced by resolvers, passed through unchanged)
    NameError {
        name: String,
    },
    NoMethodError {
        name: String,
        receiver: String,
    },

    // Control flow
    NoBlockGiven,
    StackOverflow {
        depth: usize,
    },

    // Generic error for fallback
    Generic {
        message: String,
    },
}

/// One entry of a captured call trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function_name: Option<String>,
    pub location: Option<SourceLoc>,
}

/// An error with optional location and trace information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LError {
    pub kind: ErrorKind,
    pub location: Option<SourceLoc>,
    pub stack_trace: Vec<StackFrame>,
}

pub type LResult<T> = Result<T, LError>;

impl LError {
    pub fn new(kind: ErrorKind) -> Self {
        LError {
            kind,
            location: None,
            stack_trace: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn with_location(mut self, location: SourceLoc) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_stack_trace(mut self, trace: Vec<StackFrame>) -> Self {
        self.stack_trace = trace;
        self
    }

    /// ArgumentError-kind: wrong argument count or malformed arguments
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ArityMismatch { .. }
                | ErrorKind::ArityAtLeast { .. }
                | ErrorKind::ArityRange { .. }
                | ErrorKind::ArgumentError { .. }
        )
    }

    /// TypeError-kind: e.g. rebinding to an incompatible receiver
    pub fn is_type_error(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeError { .. })
    }

    /// NameError/NoMethodError-kind: resolver failures
    pub fn is_name_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NameError { .. } | ErrorKind::NoMethodError { .. }
        )
    }

    /// Get a human-readable description of the error
    pub fn description(&self) -> String {
        match &self.kind {
            ErrorKind::ArityMismatch { expected, got } => {
                format!(
                    "Argument error: expected {} argument{}, got {}",
                    expected,
                    if *expected == 1 { "" } else { "s" },
                    got
                )
            }
            ErrorKind::ArityAtLeast { minimum, got } => {
                format!(
                    "Argument error: expected at least {} argument{}, got {}",
                    minimum,
                    if *minimum == 1 { "" } else { "s" },
                    got
                )
            }
            ErrorKind::ArityRange { min, max, got } => {
                format!("Argument error: expected {}-{} arguments, got {}", min, max, got)
            }
            ErrorKind::ArgumentError { message } => format!("Argument error: {}", message),
            ErrorKind::TypeError { message } => format!("Type error: {}", message),
            ErrorKind::NameError { name } => {
                format!("Name error: undefined method '{}'", name)
            }
            ErrorKind::NoMethodError { name, receiver } => {
                format!("No method error: undefined method '{}' for {}", name, receiver)
            }
            ErrorKind::NoBlockGiven => "Local jump error: no block given".to_string(),
            ErrorKind::StackOverflow { depth } => {
                format!("Stack overflow: call depth exceeded {}", depth)
            }
            ErrorKind::Generic { message } => format!("Error: {}", message),
        }
    }
}

impl fmt::Display for LError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        for frame in &self.stack_trace {
            write!(
                f,
                "\n    in {}",
                frame.function_name.as_deref().unwrap_or("<anonymous>")
            )?;
            if let Some(loc) = &frame.location {
                write!(f, " at {}", loc)?;
            }
        }
        Ok(())
    }
}

impl StdError for LError {}

impl From<LError> for String {
    fn from(err: LError) -> String {
        err.description()
    }
}

impl From<String> for LError {
    fn from(message: String) -> Self {
        LError::new(ErrorKind::Generic { message })
    }
}

impl From<&str> for LError {
    fn from(message: &str) -> Self {
        LError::new(ErrorKind::Generic {
            message: message.to_string(),
        })
    }
}
