// Property tests for the exact-arity call contract.

use super::strategies::{arb_args, arb_arity, arb_exact_arity, arb_immediate};
use crate::common::{calls_of, counted};
use calyx::value::{Module, Object};
use calyx::{Value, VM};
use proptest::prelude::*;

fn counting_receiver(arity: calyx::value::Arity) -> Value {
    let class = Module::new_class("Counter", None);
    class.define_native("count", arity, counted);
    Value::Object(Object::new(class))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn matching_count_invokes_once(
        args in arb_exact_arity().prop_flat_map(|n| prop::collection::vec(arb_immediate(), n))
    ) {
        let n = args.len();
        let mut vm = VM::new();
        let recv = counting_receiver(calyx::value::Arity::Exact(n));
        let method = vm.method(&recv, "count").unwrap();
        let result = method.call(&mut vm, Some(&args)).unwrap();
        prop_assert_eq!(result, Value::int(n as i64));
        prop_assert_eq!(calls_of(&recv), 1);
    }

    #[test]
    fn mismatched_count_never_invokes(n in 1usize..6, args in arb_args(5)) {
        prop_assume!(args.len() != n);
        let mut vm = VM::new();
        let recv = counting_receiver(calyx::value::Arity::Exact(n));
        let method = vm.method(&recv, "count").unwrap();
        let err = method.call(&mut vm, Some(&args)).unwrap_err();
        prop_assert!(err.is_argument_error());
        prop_assert_eq!(calls_of(&recv), 0);
    }

    #[test]
    fn arity_check_agrees_with_invocation(arity in arb_arity(), args in arb_args(6)) {
        let mut vm = VM::new();
        let recv = counting_receiver(arity);
        let method = vm.method(&recv, "count").unwrap();
        prop_assert_eq!(method.arity(), arity);
        let ok = method.call(&mut vm, Some(&args)).is_ok();
        prop_assert_eq!(ok, arity.matches(args.len()));
        prop_assert_eq!(calls_of(&recv), i64::from(ok));
    }
}
