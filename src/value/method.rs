//! Method objects
//!
//! A `BoundMethod` pairs a resolved implementation with a receiver; an
//! `UnboundMethod` carries the same identity metadata without one. Both are
//! immutable apart from the taint flag and are created fresh on every
//! request. A method taken from a tainted receiver starts out tainted.

use crate::error::{LError, LResult};
use crate::resolve::Resolved;
use crate::value::types::{Arity, Visibility};
use crate::value::{Module, Proc, Value};
use crate::vm::{IterMode, VM};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// An invocable method body as stored in a method table
pub trait MethodImpl {
    fn arity(&self) -> Arity;

    /// Run the body. Arity has already been checked by the caller.
    fn invoke(&self, vm: &mut VM, receiver: &Value, args: &[Value]) -> LResult<Value>;
}

pub type NativeMethodFn = fn(&mut VM, &Value, &[Value]) -> LResult<Value>;

/// A method body backed by a plain function pointer
#[derive(Clone, Copy)]
pub struct NativeMethod {
    arity: Arity,
    func: NativeMethodFn,
}

impl NativeMethod {
    pub fn new(arity: Arity, func: NativeMethodFn) -> Self {
        NativeMethod { arity, func }
    }
}

impl MethodImpl for NativeMethod {
    fn arity(&self) -> Arity {
        self.arity
    }

    fn invoke(&self, vm: &mut VM, receiver: &Value, args: &[Value]) -> LResult<Value> {
        (self.func)(vm, receiver, args)
    }
}

/// A method implementation tied to a receiver
#[derive(Clone)]
pub struct BoundMethod {
    implementation_module: Rc<Module>,
    name: Rc<str>,
    origin_module: Rc<Module>,
    origin_name: Rc<str>,
    implementation: Rc<dyn MethodImpl>,
    visibility: Visibility,
    receiver: Value,
    tainted: Cell<bool>,
}

impl BoundMethod {
    pub fn new(resolved: Resolved, name: Rc<str>, receiver: Value) -> Self {
        debug!(
            owner = resolved.implementation_module.name(),
            name = &*name,
            "bound method created"
        );
        BoundMethod {
            implementation_module: resolved.implementation_module,
            name,
            origin_module: resolved.origin_module,
            origin_name: resolved.origin_name,
            implementation: resolved.implementation,
            visibility: resolved.visibility,
            tainted: Cell::new(receiver.is_tainted()),
            receiver,
        }
    }

    /// Module whose method table holds the implementation
    pub fn owner(&self) -> &Rc<Module> {
        &self.implementation_module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class the lookup started from
    pub fn origin_module(&self) -> &Rc<Module> {
        &self.origin_module
    }

    /// Name the implementation was defined under
    pub fn origin_name(&self) -> &str {
        &self.origin_name
    }

    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn implementation(&self) -> &Rc<dyn MethodImpl> {
        &self.implementation
    }

    /// The implementation's declared arity, unchanged
    pub fn arity(&self) -> Arity {
        self.implementation.arity()
    }

    /// Visibility of the method table entry, recorded on each call frame
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Invoke the method on its receiver.
    ///
    /// `None` is treated as an empty argument list. The argument count is
    /// checked before anything is pushed; a mismatch never reaches the
    /// implementation. A block supplied for this call (see
    /// [`VM::block_pending`]) is passed on to the implementation.
    pub fn call(&self, vm: &mut VM, args: Option<&[Value]>) -> LResult<Value> {
        let args = args.unwrap_or(&[]);
        self.implementation.arity().check(args.len())?;

        let mode = if vm.block_pending() {
            IterMode::Pre
        } else {
            IterMode::Not
        };
        let mut vm = vm.push_iter_mode(mode);
        vm.call0(
            &self.implementation_module,
            &self.receiver,
            &self.name,
            args,
            self.visibility,
            self.implementation.as_ref(),
        )
    }

    /// `[]` form of [`BoundMethod::call`]
    pub fn aref(&self, vm: &mut VM, args: &[Value]) -> LResult<Value> {
        self.call(vm, Some(args))
    }

    /// Detach from the receiver. The result remembers where it came from
    /// and inherits this method's taint.
    pub fn unbind(self: &Rc<Self>) -> Rc<UnboundMethod> {
        let unbound = UnboundMethod {
            implementation_module: self.implementation_module.clone(),
            name: self.name.clone(),
            origin_module: self.origin_module.clone(),
            origin_name: self.origin_name.clone(),
            implementation: self.implementation.clone(),
            visibility: self.visibility,
            provenance: Some(self.clone()),
            tainted: Cell::new(self.is_tainted()),
        };
        Rc::new(unbound)
    }

    /// Wrap this method in a block-style callable.
    ///
    /// Invoking the proc with a single array argument splats it; any other
    /// argument list is passed through.
    pub fn to_proc(self: &Rc<Self>, vm: &mut VM) -> LResult<Rc<Proc>> {
        vm.method_proc(self.clone())
    }

    pub fn taint(&self) {
        self.tainted.set(true);
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted.get()
    }
}

impl fmt::Display for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Method: ")?;
        write_target(
            f,
            Some(&self.receiver),
            &self.origin_module,
            &self.implementation_module,
            &self.name,
        )?;
        write!(f, ">")
    }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("owner", &self.implementation_module)
            .field("name", &self.name)
            .field("origin_module", &self.origin_module)
            .field("origin_name", &self.origin_name)
            .field("arity", &self.arity())
            .field("receiver", &self.receiver)
            .finish()
    }
}

/// A method implementation detached from any receiver
pub struct UnboundMethod {
    implementation_module: Rc<Module>,
    name: Rc<str>,
    origin_module: Rc<Module>,
    origin_name: Rc<str>,
    implementation: Rc<dyn MethodImpl>,
    visibility: Visibility,
    provenance: Option<Rc<BoundMethod>>,
    tainted: Cell<bool>,
}

impl UnboundMethod {
    pub fn new(resolved: Resolved, name: Rc<str>) -> Self {
        debug!(
            owner = resolved.implementation_module.name(),
            name = &*name,
            "unbound method created"
        );
        UnboundMethod {
            implementation_module: resolved.implementation_module,
            name,
            origin_module: resolved.origin_module,
            origin_name: resolved.origin_name,
            implementation: resolved.implementation,
            visibility: resolved.visibility,
            provenance: None,
            tainted: Cell::new(false),
        }
    }

    pub fn owner(&self) -> &Rc<Module> {
        &self.implementation_module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin_module(&self) -> &Rc<Module> {
        &self.origin_module
    }

    pub fn origin_name(&self) -> &str {
        &self.origin_name
    }

    pub fn arity(&self) -> Arity {
        self.implementation.arity()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The bound method this was detached from, if any
    pub fn provenance(&self) -> Option<&Rc<BoundMethod>> {
        self.provenance.as_ref()
    }

    /// Attach to `receiver`, producing a bound method with the same
    /// identity metadata. Lookup is not repeated.
    pub fn rebind(&self, vm: &VM, receiver: &Value) -> LResult<Rc<BoundMethod>> {
        let class = vm.class_of(receiver);
        if !Rc::ptr_eq(&class, &self.origin_module) {
            if self.origin_module.is_singleton() {
                return Err(LError::type_error(
                    "singleton method called for a different object",
                ));
            }
            if class.is_singleton() && class.defines(&self.origin_name) {
                return Err(LError::type_error(format!(
                    "method `{}' overridden",
                    self.origin_name
                )));
            }
            if !class.is_descendant_of(&self.origin_module) {
                return Err(LError::type_error(format!(
                    "bind argument must be an instance of {}",
                    self.origin_module.name()
                )));
            }
        }

        debug!(name = &*self.name, receiver = %receiver, "rebinding method");
        Ok(Rc::new(BoundMethod {
            implementation_module: self.implementation_module.clone(),
            name: self.name.clone(),
            origin_module: self.origin_module.clone(),
            origin_name: self.origin_name.clone(),
            implementation: self.implementation.clone(),
            visibility: self.visibility,
            receiver: receiver.clone(),
            tainted: Cell::new(self.is_tainted() || receiver.is_tainted()),
        }))
    }

    /// Unbound methods have no receiver to run on
    pub fn call(&self, _vm: &mut VM, _args: Option<&[Value]>) -> LResult<Value> {
        Err(LError::type_error(
            "you cannot call unbound method; bind first",
        ))
    }

    pub fn unbind(self: &Rc<Self>) -> Rc<UnboundMethod> {
        self.clone()
    }

    pub fn taint(&self) {
        self.tainted.set(true);
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted.get()
    }
}

impl fmt::Display for UnboundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<UnboundMethod: ")?;
        write_target(
            f,
            None,
            &self.origin_module,
            &self.implementation_module,
            &self.name,
        )?;
        write!(f, ">")
    }
}

impl fmt::Debug for UnboundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnboundMethod")
            .field("owner", &self.implementation_module)
            .field("name", &self.name)
            .field("origin_module", &self.origin_module)
            .field("origin_name", &self.origin_name)
            .field("arity", &self.arity())
            .field("bound", &self.provenance.is_some())
            .finish()
    }
}

// `recv.name` for singleton methods, `Origin(Owner)#name` otherwise
fn write_target(
    f: &mut fmt::Formatter<'_>,
    receiver: Option<&Value>,
    origin: &Module,
    owner: &Module,
    name: &str,
) -> fmt::Result {
    match receiver {
        Some(receiver) if owner.is_singleton() => write!(f, "{:?}.{}", receiver, name),
        _ => {
            write!(f, "{}", origin.name())?;
            if !std::ptr::eq(origin, owner) {
                write!(f, "({})", owner.name())?;
            }
            write!(f, "#{}", name)
        }
    }
}
