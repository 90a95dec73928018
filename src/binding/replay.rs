//! Re-entering a captured context

use super::LexicalBinding;
use crate::error::LResult;
use crate::value::Value;
use crate::vm::VM;

/// Runs source text against a binding. Parsing and execution live outside
/// this crate; implementors are called with the binding's context already
/// restored on the VM.
pub trait Evaluator {
    fn evaluate(&self, vm: &mut VM, binding: &LexicalBinding, source: &str) -> LResult<Value>;
}

impl LexicalBinding {
    /// Run `f` with the captured frame, scope and wrapper installed as the
    /// current ones. All three are restored afterwards, whether `f`
    /// succeeds or fails.
    pub fn replay<R>(&self, vm: &mut VM, f: impl FnOnce(&mut VM) -> LResult<R>) -> LResult<R> {
        let mut vm = vm.push_frame(self.frame.clone());
        let mut vm = vm.push_scope(self.scope.clone());
        let mut vm = vm.push_wrapper(self.wrapper.clone());
        f(&mut vm)
    }

    pub fn eval(&self, vm: &mut VM, evaluator: &dyn Evaluator, source: &str) -> LResult<Value> {
        self.replay(vm, |vm| evaluator.evaluate(vm, self, source))
    }
}
