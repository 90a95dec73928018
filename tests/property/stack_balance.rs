// Property tests for stack balance: every call leaves the frame,
// iteration-mode and scope stacks exactly as deep as it found them.

use super::strategies::arb_args;
use crate::common::{depths, Fixture};
use calyx::vm::BlockBody;
use calyx::IterMode;
use proptest::prelude::*;

const METHODS: &[&str] = &["echo2", "sum", "count1", "fails", "block_given"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn call_is_balanced(which in 0..METHODS.len(), args in arb_args(4)) {
        let mut fx = Fixture::new();
        let recv = fx.circle();
        let method = fx.vm.method(&recv, METHODS[which]).unwrap();
        let before = depths(&fx.vm);
        let _ = method.call(&mut fx.vm, Some(&args));
        prop_assert_eq!(depths(&fx.vm), before);
        prop_assert_eq!(fx.vm.current_iter_mode(), IterMode::Not);
    }

    #[test]
    fn proc_call_is_balanced(which in 0..METHODS.len(), args in arb_args(4)) {
        let mut fx = Fixture::new();
        let recv = fx.shape();
        let method = fx.vm.method(&recv, METHODS[which]).unwrap();
        let before = depths(&fx.vm);
        let proc = method.to_proc(&mut fx.vm).unwrap();
        prop_assert_eq!(depths(&fx.vm), before);
        let _ = proc.call(&mut fx.vm, &args);
        prop_assert_eq!(depths(&fx.vm), before);
        prop_assert!(fx.vm.current_block().is_none());
    }

    #[test]
    fn nested_iteration_is_balanced(levels in 1usize..6, fail_at in 0usize..6) {
        fn nest(vm: &mut calyx::VM, level: usize, levels: usize, fail_at: usize) -> calyx::LResult<()> {
            if level == fail_at {
                return Err(calyx::LError::generic("stop"));
            }
            if level == levels {
                return Ok(());
            }
            vm.iterate(BlockBody::native(|_, _| Ok(calyx::Value::NIL)), |vm| {
                nest(vm, level + 1, levels, fail_at)
            })
        }

        let mut vm = calyx::VM::new();
        let before = depths(&vm);
        let result = nest(&mut vm, 0, levels, fail_at);
        prop_assert_eq!(result.is_err(), fail_at <= levels);
        prop_assert_eq!(depths(&vm), before);
        prop_assert!(vm.current_block().is_none());
    }
}
