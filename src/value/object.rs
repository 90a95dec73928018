//! Plain runtime objects

use crate::value::module::Module;
use crate::value::Value;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// An instance of a class, with an optional singleton class
pub struct Object {
    class: Rc<Module>,
    singleton: RefCell<Option<Rc<Module>>>,
    ivars: RefCell<FxHashMap<Rc<str>, Value>>,
    tainted: Cell<bool>,
}

impl Object {
    pub fn new(class: Rc<Module>) -> Rc<Object> {
        Rc::new(Object {
            class,
            singleton: RefCell::new(None),
            ivars: RefCell::new(FxHashMap::default()),
            tainted: Cell::new(false),
        })
    }

    /// The class the object was instantiated from
    pub fn class(&self) -> &Rc<Module> {
        &self.class
    }

    /// The singleton class, created on first request
    pub fn singleton_class(&self) -> Rc<Module> {
        self.singleton
            .borrow_mut()
            .get_or_insert_with(|| {
                let name = format!("#<Class:#<{}>>", self.class.name());
                Module::new_singleton(&name, self.class.clone())
            })
            .clone()
    }

    pub fn existing_singleton(&self) -> Option<Rc<Module>> {
        self.singleton.borrow().clone()
    }

    /// The class dispatch starts from: the singleton class if one exists
    pub fn internal_class(&self) -> Rc<Module> {
        self.existing_singleton()
            .unwrap_or_else(|| self.class.clone())
    }

    pub fn ivar_get(&self, name: &str) -> Value {
        self.ivars.borrow().get(name).cloned().unwrap_or(Value::Nil)
    }

    pub fn ivar_set(&self, name: &str, value: Value) {
        self.ivars.borrow_mut().insert(Rc::from(name), value);
    }

    pub fn taint(&self) {
        self.tainted.set(true);
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted.get()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{}>", self.class.name())
    }
}
