// LexicalBinding: capture policies over a real A -> B -> C call chain
use crate::common::Fixture;
use calyx::value::{Arity, Module, Object};
use calyx::{LResult, LexicalBinding, Value, VM};
use std::rc::Rc;

fn stash(recv: &Value, key: &str, binding: Rc<LexicalBinding>) {
    if let Some(obj) = recv.as_object() {
        obj.ivar_set(key, Value::Binding(binding));
    }
}

fn fetch(recv: &Value, key: &str) -> Rc<LexicalBinding> {
    let obj = recv.as_object().expect("receiver is an object");
    obj.ivar_get(key)
        .as_binding()
        .cloned()
        .unwrap_or_else(|| panic!("no binding stored under {}", key))
}

fn method_a(vm: &mut VM, recv: &Value, _args: &[Value]) -> LResult<Value> {
    vm.current_scope().set("depth", Value::int(1));
    stash(recv, "@a", LexicalBinding::new(vm));
    vm.funcall(recv, "b", &[])
}

fn method_b(vm: &mut VM, recv: &Value, _args: &[Value]) -> LResult<Value> {
    vm.current_scope().set("depth", Value::int(2));
    stash(recv, "@b", LexicalBinding::new(vm));
    vm.funcall(recv, "c", &[])
}

fn method_c(vm: &mut VM, recv: &Value, _args: &[Value]) -> LResult<Value> {
    vm.current_scope().set("depth", Value::int(3));
    stash(recv, "@c_new", LexicalBinding::new(vm));
    stash(recv, "@c_eval", LexicalBinding::for_eval(vm));
    stash(recv, "@c_caller", LexicalBinding::of_caller(vm));
    Ok(Value::NIL)
}

fn run_chain() -> (VM, Value) {
    let mut vm = VM::new();
    let class = Module::new_class("Chain", None);
    class.define_native("a", Arity::Exact(0), method_a);
    class.define_native("b", Arity::Exact(0), method_b);
    class.define_native("c", Arity::Exact(0), method_c);
    let recv = Value::Object(Object::new(class));
    vm.funcall(&recv, "a", &[]).unwrap();
    (vm, recv)
}

#[test]
fn test_new_binding_captures_own_frame_and_scope() {
    let (_vm, recv) = run_chain();
    let c = fetch(&recv, "@c_new");
    assert_eq!(c.frame().name(), Some("c"));
    assert_eq!(c.local_variable_get("depth"), Some(Value::int(3)));
}

#[test]
fn test_binding_for_eval_pairs_caller_frame_with_own_scope() {
    let (_vm, recv) = run_chain();
    let b = fetch(&recv, "@b");
    let c = fetch(&recv, "@c_new");
    let eval = fetch(&recv, "@c_eval");
    assert!(Rc::ptr_eq(eval.frame(), b.frame()));
    assert!(Rc::ptr_eq(eval.scope(), c.scope()));
}

#[test]
fn test_binding_of_caller_captures_caller_pair() {
    let (_vm, recv) = run_chain();
    let b = fetch(&recv, "@b");
    let caller = fetch(&recv, "@c_caller");
    assert!(Rc::ptr_eq(caller.frame(), b.frame()));
    assert!(Rc::ptr_eq(caller.scope(), b.scope()));
    assert_eq!(caller.local_variable_get("depth"), Some(Value::int(2)));
}

#[test]
fn test_captures_outlive_their_activations() {
    let (vm, recv) = run_chain();
    assert_eq!(vm.frames().depth(), 1);
    let a = fetch(&recv, "@a");
    assert_eq!(a.frame().name(), Some("a"));
    assert!(a.receiver().is_identical(&recv));
    assert_eq!(a.frame().args().len(), 0);
}

#[test]
fn test_bindings_share_scope_with_each_other() {
    let (_vm, recv) = run_chain();
    let c = fetch(&recv, "@c_new");
    let eval = fetch(&recv, "@c_eval");
    c.local_variable_set("shared", Value::int(7));
    assert_eq!(eval.local_variable_get("shared"), Some(Value::int(7)));
}

#[test]
fn test_replay_restores_captured_self() {
    let (mut vm, recv) = run_chain();
    let b = fetch(&recv, "@b");
    let seen = b
        .replay(&mut vm, |vm| {
            Ok((vm.current_self().clone(), vm.current_scope().get("depth")))
        })
        .unwrap();
    assert!(seen.0.is_identical(&recv));
    assert_eq!(seen.1, Some(Value::int(2)));
    assert!(vm.current_self().is_identical(vm.top_self()));
}

#[test]
fn test_wrapper_is_sampled_at_capture() {
    let mut fx = Fixture::new();
    let wrapper = Module::new_module("Script");
    let binding = fx
        .vm
        .with_wrapper(wrapper.clone(), |vm| LexicalBinding::new(vm));
    assert!(Rc::ptr_eq(binding.wrapper().unwrap(), &wrapper));
    assert!(LexicalBinding::new(&fx.vm).wrapper().is_none());
}
