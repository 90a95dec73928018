// BoundMethod: exact-arity calls, stack discipline, identity metadata
use crate::common::{calls_of, depths, Fixture};
use calyx::value::Arity;
use calyx::{ErrorKind, Value};
use std::rc::Rc;

#[test]
fn test_arity_two_scenario() {
    let mut fx = Fixture::new();
    let recv = fx.shape();
    let method = fx.vm.method(&recv, "echo2").unwrap();

    let ok = method
        .call(&mut fx.vm, Some(&[Value::int(1), Value::int(2)]))
        .unwrap();
    assert_eq!(
        ok.as_array().unwrap(),
        vec![recv.clone(), Value::int(1), Value::int(2)]
    );

    let short = method.call(&mut fx.vm, Some(&[Value::int(1)])).unwrap_err();
    assert!(short.is_argument_error());
    assert_eq!(*short.kind(), ErrorKind::ArityMismatch { expected: 2, got: 1 });

    // absent argument list is an empty one
    let absent = method.call(&mut fx.vm, None).unwrap_err();
    assert_eq!(*absent.kind(), ErrorKind::ArityMismatch { expected: 2, got: 0 });
}

#[test]
fn test_mismatch_never_invokes_implementation() {
    let mut fx = Fixture::new();
    let recv = fx.shape();
    let method = fx.vm.method(&recv, "count1").unwrap();

    assert!(method.call(&mut fx.vm, Some(&[])).is_err());
    assert!(method
        .call(&mut fx.vm, Some(&[Value::NIL, Value::NIL]))
        .is_err());
    assert_eq!(calls_of(&recv), 0);

    method.call(&mut fx.vm, Some(&[Value::NIL])).unwrap();
    assert_eq!(calls_of(&recv), 1);
}

#[test]
fn test_failure_propagates_unchanged_and_unwinds() {
    let mut fx = Fixture::new();
    let recv = fx.shape();
    let method = fx.vm.method(&recv, "fails").unwrap();
    let before = depths(&fx.vm);

    let err = method.call(&mut fx.vm, None).unwrap_err();
    assert_eq!(
        *err.kind(),
        ErrorKind::Generic {
            message: "implementation failed".into()
        }
    );
    assert_eq!(depths(&fx.vm), before);
}

#[test]
fn test_arity_reported_verbatim() {
    let fx = Fixture::new();
    let recv = fx.shape();
    assert_eq!(fx.vm.method(&recv, "echo2").unwrap().arity(), Arity::Exact(2));
    let sum = fx.vm.method(&recv, "sum").unwrap();
    assert_eq!(sum.arity(), Arity::AtLeast(0));
    assert_eq!(sum.arity().value(), -1);
}

#[test]
fn test_variadic_arity_accepts_any_count() {
    let mut fx = Fixture::new();
    let recv = fx.shape();
    let sum = fx.vm.method(&recv, "sum").unwrap();
    assert_eq!(sum.call(&mut fx.vm, None).unwrap(), Value::int(0));
    assert_eq!(
        sum.aref(&mut fx.vm, &[Value::int(1), Value::int(2), Value::int(3)])
            .unwrap(),
        Value::int(6)
    );
}

#[test]
fn test_extreme_integer_arguments_reach_implementation() {
    let mut fx = Fixture::new();
    let recv = fx.shape();
    let method = fx.vm.method(&recv, "sum").unwrap();
    let before = depths(&fx.vm);

    let args = [Value::int(i64::MAX), Value::int(i64::MAX), Value::int(2)];
    assert_eq!(
        method.call(&mut fx.vm, Some(&args)).unwrap(),
        Value::int(0)
    );
    assert_eq!(depths(&fx.vm), before);
}

#[test]
fn test_fresh_method_object_per_request() {
    let fx = Fixture::new();
    let recv = fx.circle();
    let a = fx.vm.method(&recv, "echo2").unwrap();
    let b = fx.vm.method(&recv, "echo2").unwrap();
    assert!(!Rc::ptr_eq(&a, &b));
    assert!(Rc::ptr_eq(a.owner(), &fx.shape));
    assert!(Rc::ptr_eq(a.origin_module(), &fx.circle));
    assert_eq!(a.name(), "echo2");
    assert!(a.receiver().is_identical(&recv));
}

#[test]
fn test_alias_keeps_origin_name() {
    let fx = Fixture::new();
    fx.shape.alias_method("both", "echo2").unwrap();
    let recv = fx.shape();
    let method = fx.vm.method(&recv, "both").unwrap();
    assert_eq!(method.name(), "both");
    assert_eq!(method.origin_name(), "echo2");
}

#[test]
fn test_unknown_method_is_resolver_error() {
    let fx = Fixture::new();
    let err = fx.vm.method(&fx.shape(), "nope").unwrap_err();
    assert!(err.is_name_error());
    assert_eq!(
        err.description(),
        "No method error: undefined method 'nope' for Shape"
    );
}

#[test]
fn test_no_block_reaches_plain_call() {
    let mut fx = Fixture::new();
    let recv = fx.shape();
    let method = fx.vm.method(&recv, "block_given").unwrap();
    assert_eq!(method.call(&mut fx.vm, None).unwrap(), Value::FALSE);
}

#[test]
fn test_method_value_display() {
    let fx = Fixture::new();
    let method = fx.vm.method(&fx.circle(), "sum").unwrap();
    assert_eq!(
        Value::Method(method).to_string(),
        "#<Method: Circle(Shape)#sum>"
    );
}
