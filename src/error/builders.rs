//! Builder methods for constructing LError instances

use super::types::{ErrorKind, LError};

impl LError {
    // Arity errors
    pub fn arity_mismatch(expected: usize, got: usize) -> Self {
        LError::new(ErrorKind::ArityMismatch { expected, got })
    }

    pub fn arity_at_least(minimum: usize, got: usize) -> Self {
        LError::new(ErrorKind::ArityAtLeast { minimum, got })
    }

    pub fn arity_range(min: usize, max: usize, got: usize) -> Self {
        LError::new(ErrorKind::ArityRange { min, max, got })
    }

    pub fn argument_error(message: impl Into<String>) -> Self {
        LError::new(ErrorKind::ArgumentError {
            message: message.into(),
        })
    }

    // Type errors
    pub fn type_error(message: impl Into<String>) -> Self {
        LError::new(ErrorKind::TypeError {
            message: message.into(),
        })
    }

    // Resolution
    pub fn name_error(name: impl Into<String>) -> Self {
        LError::new(ErrorKind::NameError { name: name.into() })
    }

    pub fn no_method(name: impl Into<String>, receiver: impl Into<String>) -> Self {
        LError::new(ErrorKind::NoMethodError {
            name: name.into(),
            receiver: receiver.into(),
        })
    }

    // Control flow
    pub fn no_block_given() -> Self {
        LError::new(ErrorKind::NoBlockGiven)
    }

    pub fn stack_overflow(depth: usize) -> Self {
        LError::new(ErrorKind::StackOverflow { depth })
    }

    // Generic
    pub fn generic(message: impl Into<String>) -> Self {
        LError::new(ErrorKind::Generic {
            message: message.into(),
        })
    }
}
