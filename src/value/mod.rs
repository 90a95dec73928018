//! Value representation for the calyx runtime
//!
//! Immediates are stored inline; everything with identity (objects,
//! modules, method objects, procs, bindings) is reference-counted and
//! compares by pointer.

pub mod display;
pub mod method;
pub mod module;
pub mod object;
pub mod procedure;
pub mod types;

pub use method::{BoundMethod, MethodImpl, NativeMethod, NativeMethodFn, UnboundMethod};
pub use module::{MethodEntry, Module, ModuleKind};
pub use object::Object;
pub use procedure::Proc;
pub use types::{Arity, Visibility};

use crate::binding::LexicalBinding;
use std::cell::RefCell;
use std::rc::Rc;

/// A runtime value
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Symbol(Rc<str>),
    /// Mutable sequence; the only value the block splat rule expands
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<Object>),
    Module(Rc<Module>),
    Method(Rc<BoundMethod>),
    UnboundMethod(Rc<UnboundMethod>),
    Proc(Rc<Proc>),
    Binding(Rc<LexicalBinding>),
}

impl Value {
    pub const NIL: Value = Value::Nil;
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    pub fn int(n: i64) -> Value {
        Value::Int(n)
    }

    pub fn float(n: f64) -> Value {
        Value::Float(n)
    }

    pub fn string(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    pub fn symbol(s: &str) -> Value {
        Value::Symbol(Rc::from(s))
    }

    pub fn array(items: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only nil and false are falsy
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Snapshot of an array's elements
    pub fn as_array(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) => Some(items.borrow().clone()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Rc<Object>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Rc<BoundMethod>> {
        match self {
            Value::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_proc(&self) -> Option<&Rc<Proc>> {
        match self {
            Value::Proc(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_binding(&self) -> Option<&Rc<LexicalBinding>> {
        match self {
            Value::Binding(b) => Some(b),
            _ => None,
        }
    }

    /// Objects and method objects carry a taint flag; other values are clean
    pub fn is_tainted(&self) -> bool {
        match self {
            Value::Object(obj) => obj.is_tainted(),
            Value::Method(m) => m.is_tainted(),
            _ => false,
        }
    }

    /// Name of the value's type, used in error messages
    pub fn type_name(&self) -> String {
        match self {
            Value::Nil => "NilClass".to_string(),
            Value::Bool(true) => "TrueClass".to_string(),
            Value::Bool(false) => "FalseClass".to_string(),
            Value::Int(_) => "Integer".to_string(),
            Value::Float(_) => "Float".to_string(),
            Value::Str(_) => "String".to_string(),
            Value::Symbol(_) => "Symbol".to_string(),
            Value::Array(_) => "Array".to_string(),
            Value::Object(obj) => obj.class().name().to_string(),
            Value::Module(m) if m.is_module() => "Module".to_string(),
            Value::Module(_) => "Class".to_string(),
            Value::Method(_) => "Method".to_string(),
            Value::UnboundMethod(_) => "UnboundMethod".to_string(),
            Value::Proc(_) => "Proc".to_string(),
            Value::Binding(_) => "Binding".to_string(),
        }
    }

    /// Reference identity; immediates are identical when equal
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            (Value::Method(a), Value::Method(b)) => Rc::ptr_eq(a, b),
            (Value::UnboundMethod(a), Value::UnboundMethod(b)) => Rc::ptr_eq(a, b),
            (Value::Proc(a), Value::Proc(b)) => a == b,
            (Value::Binding(a), Value::Binding(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}
