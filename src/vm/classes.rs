//! Builtin classes every execution context starts with

use crate::value::{Module, Value};
use std::rc::Rc;

/// Classes that immediates and core objects report from `VM::class_of`
#[derive(Debug, Clone)]
pub struct BuiltinClasses {
    pub object: Rc<Module>,
    pub kernel: Rc<Module>,
    pub module: Rc<Module>,
    pub class: Rc<Module>,
    pub nil: Rc<Module>,
    pub true_class: Rc<Module>,
    pub false_class: Rc<Module>,
    pub integer: Rc<Module>,
    pub float: Rc<Module>,
    pub string: Rc<Module>,
    pub symbol: Rc<Module>,
    pub array: Rc<Module>,
    pub method: Rc<Module>,
    pub unbound_method: Rc<Module>,
    pub proc_class: Rc<Module>,
    pub binding: Rc<Module>,
}

impl BuiltinClasses {
    pub fn new() -> Self {
        let object = Module::new_class("Object", None);
        let kernel = Module::new_module("Kernel");
        object.include(kernel.clone());
        let module = Module::new_class("Module", Some(object.clone()));
        let class = Module::new_class("Class", Some(module.clone()));
        let method = Module::new_class("Method", Some(object.clone()));
        let sub = |name: &str| Module::new_class(name, Some(object.clone()));

        BuiltinClasses {
            nil: sub("NilClass"),
            true_class: sub("TrueClass"),
            false_class: sub("FalseClass"),
            integer: sub("Integer"),
            float: sub("Float"),
            string: sub("String"),
            symbol: sub("Symbol"),
            array: sub("Array"),
            unbound_method: Module::new_class("UnboundMethod", Some(method.clone())),
            proc_class: sub("Proc"),
            binding: sub("Binding"),
            method,
            class,
            module,
            kernel,
            object,
        }
    }

    /// The class dispatch starts from for `value`
    pub fn class_of(&self, value: &Value) -> Rc<Module> {
        match value {
            Value::Nil => self.nil.clone(),
            Value::Bool(true) => self.true_class.clone(),
            Value::Bool(false) => self.false_class.clone(),
            Value::Int(_) => self.integer.clone(),
            Value::Float(_) => self.float.clone(),
            Value::Str(_) => self.string.clone(),
            Value::Symbol(_) => self.symbol.clone(),
            Value::Array(_) => self.array.clone(),
            Value::Object(obj) => obj.internal_class(),
            Value::Module(m) if m.is_module() => self.module.clone(),
            Value::Module(_) => self.class.clone(),
            Value::Method(_) => self.method.clone(),
            Value::UnboundMethod(_) => self.unbound_method.clone(),
            Value::Proc(_) => self.proc_class.clone(),
            Value::Binding(_) => self.binding.clone(),
        }
    }
}

impl Default for BuiltinClasses {
    fn default() -> Self {
        Self::new()
    }
}
