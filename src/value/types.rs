//! Core value types for the calyx runtime
//!
//! - `Arity` - Callable arity specification
//! - `Visibility` - Method visibility recorded on frames

use crate::error::{LError, LResult};
use std::fmt;

/// Callable arity specification.
///
/// Specifies how many arguments a method implementation accepts.
///
/// # Examples
///
/// ```
/// use calyx::value::Arity;
/// assert!(Arity::Exact(2).matches(2));
/// assert!(!Arity::Exact(2).matches(1));
/// assert_eq!(Arity::AtLeast(1).value(), -2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exact number of arguments required
    Exact(usize),
    /// At least this many arguments
    AtLeast(usize),
    /// Between min and max arguments (inclusive)
    Range(usize, usize),
}

impl Arity {
    pub fn matches(&self, n: usize) -> bool {
        match self {
            Arity::Exact(expected) => n == *expected,
            Arity::AtLeast(min) => n >= *min,
            Arity::Range(min, max) => n >= *min && n <= *max,
        }
    }

    /// Validate an argument count, producing the ArgumentError-kind
    /// failure that matches this arity's shape.
    pub fn check(&self, got: usize) -> LResult<()> {
        if self.matches(got) {
            return Ok(());
        }
        Err(match *self {
            Arity::Exact(expected) => LError::arity_mismatch(expected, got),
            Arity::AtLeast(min) => LError::arity_at_least(min, got),
            Arity::Range(min, max) => LError::arity_range(min, max, got),
        })
    }

    /// Integer encoding of the arity: `n` for exactly `n` arguments,
    /// `-(n + 1)` when `n` or more are accepted.
    pub fn value(&self) -> i64 {
        match *self {
            Arity::Exact(n) => n as i64,
            Arity::AtLeast(n) | Arity::Range(n, _) => -(n as i64) - 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "{}+", n),
            Arity::Range(min, max) => write!(f, "{}-{}", min, max),
        }
    }
}

/// Method visibility as seen by dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}
