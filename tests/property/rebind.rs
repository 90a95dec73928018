// Property tests for unbind/rebind round trips and receiver checks.

use super::strategies::arb_args;
use crate::common::Fixture;
use calyx::Value;
use proptest::prelude::*;

const METHODS: &[&str] = &["echo2", "sum", "count1"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn round_trip_matches_original(which in 0..METHODS.len(), args in arb_args(3), on_circle: bool) {
        let mut fx = Fixture::new();
        let recv = if on_circle { fx.circle() } else { fx.shape() };
        let method = fx.vm.method(&recv, METHODS[which]).unwrap();
        let rebound = method.unbind().rebind(&fx.vm, &recv).unwrap();

        prop_assert_eq!(method.arity(), rebound.arity());
        prop_assert_eq!(
            method.call(&mut fx.vm, Some(&args)),
            rebound.call(&mut fx.vm, Some(&args))
        );
    }

    #[test]
    fn foreign_receivers_are_rejected(n in any::<i64>(), which in 0..METHODS.len()) {
        let fx = Fixture::new();
        let unbound = fx.circle.instance_method(METHODS[which]).unwrap();
        for recv in [Value::int(n), Value::symbol("x"), fx.shape()] {
            let err = unbound.rebind(&fx.vm, &recv).unwrap_err();
            prop_assert!(err.is_type_error());
        }
        prop_assert!(unbound.rebind(&fx.vm, &fx.circle()).is_ok());
    }
}
