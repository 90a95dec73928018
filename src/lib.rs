//! # Calyx - method objects and lexical closures for an embedded runtime
//!
//! Calyx is the callable core of a small dynamic-language runtime: bound
//! and unbound method objects, procs built from methods, and bindings that
//! capture a caller's frame and local scope for later evaluation.
//!
//! ## Quick Start
//!
//! ```
//! use calyx::value::{Arity, Module, Object};
//! use calyx::{LResult, Value, VM};
//!
//! fn add(_vm: &mut VM, _recv: &Value, args: &[Value]) -> LResult<Value> {
//!     Ok(Value::int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0)))
//! }
//!
//! let mut vm = VM::new();
//! let calc = Module::new_class("Calc", None);
//! calc.define_native("add", Arity::Exact(2), add);
//! let recv = Value::Object(Object::new(calc));
//!
//! let method = vm.method(&recv, "add").unwrap();
//! assert_eq!(method.call(&mut vm, Some(&[Value::int(1), Value::int(2)])).unwrap(), Value::int(3));
//! assert!(method.call(&mut vm, Some(&[Value::int(1)])).unwrap_err().is_argument_error());
//!
//! // Methods convert to procs; a single array argument is splatted
//! let proc = method.to_proc(&mut vm).unwrap();
//! let pair = Value::array(vec![Value::int(4), Value::int(5)]);
//! assert_eq!(proc.call(&mut vm, &[pair]).unwrap(), Value::int(9));
//! ```
//!
//! ## Architecture
//!
//! 1. **CallFrameStack** - frames plus a parallel iteration-mode stack
//!    (`Not` / `Pre` / `Cur`), pushed through guards that pop on every exit
//! 2. **BoundMethod / UnboundMethod** - resolved implementations with or
//!    without a receiver; `unbind` and `rebind` move between the two
//! 3. **ProcBridge** - `iterate` and the method-proc driver turn a method
//!    into a block-style `Proc`
//! 4. **LexicalBinding** - four capture policies over the live frame and
//!    scope stacks, replayed by an external `Evaluator`

pub mod binding;
pub mod config;
pub mod error;
pub mod resolve;
pub mod value;
pub mod vm;

pub use binding::{Evaluator, LexicalBinding};
pub use config::VmConfig;
pub use error::{ErrorKind, LError, LResult, SourceLoc};
pub use resolve::{MethodTableResolver, Resolved, Resolver};
pub use value::{BoundMethod, Proc, UnboundMethod, Value};
pub use vm::{IterMode, VM};
