//! Method resolution
//!
//! Dispatch is pluggable: the VM asks a `Resolver` to turn a receiver and a
//! name into an implementation plus the modules that describe where it was
//! found. Errors from a resolver reach the caller unchanged.

use crate::error::{LError, LResult};
use crate::value::{MethodImpl, Module, Value, Visibility};
use std::rc::Rc;

/// Outcome of a successful lookup
#[derive(Clone)]
pub struct Resolved {
    pub implementation: Rc<dyn MethodImpl>,
    /// Module whose method table holds the implementation
    pub implementation_module: Rc<Module>,
    /// Class the lookup started from
    pub origin_module: Rc<Module>,
    /// Name the implementation was defined under
    pub origin_name: Rc<str>,
    pub visibility: Visibility,
}

pub trait Resolver {
    /// Look up `name` for `receiver`, starting at `class`
    fn resolve(&self, receiver: &Value, class: &Rc<Module>, name: &str) -> LResult<Resolved>;
}

/// Walks the ancestor chain of the receiver's class
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodTableResolver;

impl Resolver for MethodTableResolver {
    fn resolve(&self, receiver: &Value, class: &Rc<Module>, name: &str) -> LResult<Resolved> {
        let (owner, entry) = class
            .lookup(name)
            .ok_or_else(|| LError::no_method(name, receiver.type_name()))?;
        Ok(Resolved {
            implementation: entry.implementation,
            implementation_module: owner,
            origin_module: class.clone(),
            origin_name: entry.original_name,
            visibility: entry.visibility,
        })
    }
}
