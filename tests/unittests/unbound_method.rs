// UnboundMethod: detach, rebind, receiver compatibility
use crate::common::{depths, Fixture};
use calyx::value::{Arity, Module, Object};
use calyx::Value;
use std::rc::Rc;

#[test]
fn test_round_trip_behaves_like_original() {
    let mut fx = Fixture::new();
    let recv = fx.circle();
    let method = fx.vm.method(&recv, "echo2").unwrap();
    let rebound = method.unbind().rebind(&fx.vm, &recv).unwrap();

    let args = [Value::int(3), Value::int(4)];
    assert_eq!(
        method.call(&mut fx.vm, Some(&args)).unwrap(),
        rebound.call(&mut fx.vm, Some(&args)).unwrap()
    );
    assert_eq!(method.arity(), rebound.arity());
    assert!(Rc::ptr_eq(method.owner(), rebound.owner()));
    assert!(Rc::ptr_eq(method.origin_module(), rebound.origin_module()));
    assert_eq!(method.origin_name(), rebound.origin_name());
}

#[test]
fn test_rebind_to_other_instance_of_origin() {
    let mut fx = Fixture::new();
    let first = fx.shape();
    let second = fx.shape();
    let unbound = fx.vm.method(&first, "echo2").unwrap().unbind();
    let bound = unbound.rebind(&fx.vm, &second).unwrap();

    let out = bound.call(&mut fx.vm, Some(&[Value::NIL, Value::NIL])).unwrap();
    assert!(out.as_array().unwrap()[0].is_identical(&second));
}

#[test]
fn test_rebind_to_unrelated_receiver_fails() {
    let fx = Fixture::new();
    let unbound = fx.circle.instance_method("echo2").unwrap();
    let before = depths(&fx.vm);

    // a Shape is not a Circle
    let err = unbound.rebind(&fx.vm, &fx.shape()).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(
        err.description(),
        "Type error: bind argument must be an instance of Circle"
    );
    assert!(unbound.rebind(&fx.vm, &Value::string("s")).is_err());
    assert_eq!(depths(&fx.vm), before);
}

#[test]
fn test_module_method_binds_to_includers() {
    let mut fx = Fixture::new();
    let named = Module::new_module("Named");
    named.define_native("label", Arity::Exact(0), |_, _, _| Ok(Value::symbol("named")));
    fx.circle.include(named.clone());

    let unbound = named.instance_method("label").unwrap();
    let bound = unbound.rebind(&fx.vm, &fx.circle()).unwrap();
    assert_eq!(bound.call(&mut fx.vm, None).unwrap(), Value::symbol("named"));
    assert!(unbound.rebind(&fx.vm, &fx.shape()).is_err());
}

#[test]
fn test_unbind_records_provenance_and_taint() {
    let fx = Fixture::new();
    let method = fx.vm.method(&fx.shape(), "sum").unwrap();
    assert!(!method.unbind().is_tainted());

    method.taint();
    let unbound = method.unbind();
    assert!(unbound.is_tainted());
    assert!(Rc::ptr_eq(unbound.provenance().unwrap(), &method));
    assert!(unbound.rebind(&fx.vm, &fx.shape()).unwrap().is_tainted());
    assert!(fx.shape.instance_method("sum").unwrap().provenance().is_none());
}

#[test]
fn test_unbound_call_requires_bind() {
    let mut fx = Fixture::new();
    let unbound = fx.shape.instance_method("sum").unwrap();
    let err = unbound.call(&mut fx.vm, None).unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_singleton_method_stays_with_its_object() {
    let fx = Fixture::new();
    let special = Object::new(fx.shape.clone());
    special
        .singleton_class()
        .define_native("only_me", Arity::Exact(0), |_, _, _| Ok(Value::TRUE));
    let special = Value::Object(special);

    let unbound = fx.vm.method(&special, "only_me").unwrap().unbind();
    assert!(unbound.rebind(&fx.vm, &special).is_ok());
    let err = unbound.rebind(&fx.vm, &fx.shape()).unwrap_err();
    assert_eq!(
        err.description(),
        "Type error: singleton method called for a different object"
    );
}

#[test]
fn test_singleton_override_blocks_rebind() {
    let fx = Fixture::new();
    let unbound = fx.shape.instance_method("sum").unwrap();
    let obj = Object::new(fx.shape.clone());
    obj.singleton_class()
        .define_native("sum", Arity::AtLeast(0), |_, _, _| Ok(Value::int(-1)));

    let err = unbound.rebind(&fx.vm, &Value::Object(obj)).unwrap_err();
    assert_eq!(err.description(), "Type error: method `sum' overridden");
}

#[test]
fn test_tainted_receiver_infects_method_objects() {
    let fx = Fixture::new();
    let clean = fx.shape();
    let dirty = fx.shape();
    dirty.as_object().unwrap().taint();

    assert!(!fx.vm.method(&clean, "sum").unwrap().is_tainted());
    let method = fx.vm.method(&dirty, "sum").unwrap();
    assert!(method.is_tainted());
    assert!(method.unbind().is_tainted());

    let unbound = fx.shape.instance_method("sum").unwrap();
    assert!(!unbound.rebind(&fx.vm, &clean).unwrap().is_tainted());
    assert!(unbound.rebind(&fx.vm, &dirty).unwrap().is_tainted());
}
