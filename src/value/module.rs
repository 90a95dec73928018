//! Classes and modules
//!
//! A minimal class model: enough structure for method tables, ancestor
//! walks and the kind-of checks that rebinding needs. Modules are shared
//! through `Rc` and compare by identity.

use crate::error::{LError, LResult};
use crate::resolve::Resolved;
use crate::value::method::{MethodImpl, NativeMethod, NativeMethodFn, UnboundMethod};
use crate::value::types::{Arity, Visibility};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Class,
    Module,
    /// Per-object class holding singleton methods
    Singleton,
}

/// An entry in a method table
#[derive(Clone)]
pub struct MethodEntry {
    pub implementation: Rc<dyn MethodImpl>,
    /// Name the implementation was first defined under (differs for aliases)
    pub original_name: Rc<str>,
    pub visibility: Visibility,
}

pub struct Module {
    name: Rc<str>,
    kind: ModuleKind,
    superclass: Option<Rc<Module>>,
    includes: RefCell<Vec<Rc<Module>>>,
    methods: RefCell<FxHashMap<Rc<str>, MethodEntry>>,
}

impl Module {
    fn build(name: &str, kind: ModuleKind, superclass: Option<Rc<Module>>) -> Rc<Module> {
        Rc::new(Module {
            name: Rc::from(name),
            kind,
            superclass,
            includes: RefCell::new(Vec::new()),
            methods: RefCell::new(FxHashMap::default()),
        })
    }

    pub fn new_class(name: &str, superclass: Option<Rc<Module>>) -> Rc<Module> {
        Module::build(name, ModuleKind::Class, superclass)
    }

    pub fn new_module(name: &str) -> Rc<Module> {
        Module::build(name, ModuleKind::Module, None)
    }

    pub(crate) fn new_singleton(name: &str, superclass: Rc<Module>) -> Rc<Module> {
        Module::build(name, ModuleKind::Singleton, Some(superclass))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn is_module(&self) -> bool {
        self.kind == ModuleKind::Module
    }

    pub fn is_singleton(&self) -> bool {
        self.kind == ModuleKind::Singleton
    }

    pub fn superclass(&self) -> Option<&Rc<Module>> {
        self.superclass.as_ref()
    }

    /// Mix `module` into this one. Later includes take precedence.
    pub fn include(&self, module: Rc<Module>) {
        let mut includes = self.includes.borrow_mut();
        if !includes.iter().any(|m| Rc::ptr_eq(m, &module)) {
            includes.push(module);
        }
    }

    pub fn define_method(&self, name: &str, implementation: Rc<dyn MethodImpl>) {
        self.define_method_with_visibility(name, implementation, Visibility::Public);
    }

    pub fn define_method_with_visibility(
        &self,
        name: &str,
        implementation: Rc<dyn MethodImpl>,
        visibility: Visibility,
    ) {
        let name: Rc<str> = Rc::from(name);
        self.methods.borrow_mut().insert(
            name.clone(),
            MethodEntry {
                implementation,
                original_name: name,
                visibility,
            },
        );
    }

    /// Define a method backed by a plain function pointer
    pub fn define_native(&self, name: &str, arity: Arity, func: NativeMethodFn) {
        self.define_method(name, Rc::new(NativeMethod::new(arity, func)));
    }

    /// Make `new_name` another name for whatever `old_name` resolves to
    pub fn alias_method(self: &Rc<Self>, new_name: &str, old_name: &str) -> LResult<()> {
        let (_, entry) = self.lookup(old_name).ok_or_else(|| LError::name_error(old_name))?;
        self.methods.borrow_mut().insert(Rc::from(new_name), entry);
        Ok(())
    }

    /// Whether this module's own table defines `name`
    pub fn defines(&self, name: &str) -> bool {
        self.methods.borrow().contains_key(name)
    }

    pub fn own_method(&self, name: &str) -> Option<MethodEntry> {
        self.methods.borrow().get(name).cloned()
    }

    /// Method resolution order: self, included modules (most recent
    /// first, transitively), then the superclass chain.
    pub fn ancestors(self: &Rc<Self>) -> Vec<Rc<Module>> {
        let mut out: Vec<Rc<Module>> = Vec::new();
        let mut current = Some(self.clone());
        while let Some(module) = current {
            push_unique(&mut out, module.clone());
            for included in module.includes.borrow().iter().rev() {
                for m in included.ancestors() {
                    push_unique(&mut out, m);
                }
            }
            current = module.superclass.clone();
        }
        out
    }

    /// True when `other` is this module or appears among its ancestors
    pub fn is_descendant_of(self: &Rc<Self>, other: &Rc<Module>) -> bool {
        Rc::ptr_eq(self, other) || self.ancestors().iter().any(|m| Rc::ptr_eq(m, other))
    }

    /// Find `name` along the ancestor chain, returning the defining module
    pub fn lookup(self: &Rc<Self>, name: &str) -> Option<(Rc<Module>, MethodEntry)> {
        self.ancestors()
            .into_iter()
            .find_map(|m| m.own_method(name).map(|entry| (m, entry)))
    }

    /// Detached method object for `name` as seen from this module
    pub fn instance_method(self: &Rc<Self>, name: &str) -> LResult<UnboundMethod> {
        let (owner, entry) = self
            .lookup(name)
            .ok_or_else(|| LError::name_error(name))?;
        let resolved = Resolved {
            implementation: entry.implementation,
            implementation_module: owner,
            origin_module: self.clone(),
            origin_name: entry.original_name,
            visibility: entry.visibility,
        };
        Ok(UnboundMethod::new(resolved, Rc::from(name)))
    }
}

fn push_unique(out: &mut Vec<Rc<Module>>, module: Rc<Module>) {
    if !out.iter().any(|m| Rc::ptr_eq(m, &module)) {
        out.push(module);
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?} {}>", self.kind, self.name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
