//! Evaluator for Cog.
//!
//! The compiler turns a parsed AST into a tree of closures ([`Unit`]s).
//! Running a unit needs a [`Frame`] for variables and an [`Exec`] that
//! carries the [`Supervisor`] deciding when to stop, so the same program
//! runs unchanged under the gas-metered scheduler in `cog_runtime` and
//! under a plain [`Budget`] in tests.
//!
//! - [`value`]: the dynamically typed value space
//! - [`frame`]: variable scopes with lexical and dynamic parents
//! - [`compile`]: AST to units, with the static block tree
//! - [`exec`]: units, control actions, and function calls
//! - [`operators`] / [`unary_operators`]: operator dispatch
//! - [`stack_trace`]: reports for exceptions nothing caught

pub mod compile;
pub mod errors;
pub mod exec;
pub mod frame;
pub mod function_val;
pub mod operators;
pub mod print_handler;
pub mod program;
pub mod property;
pub mod scope;
pub mod stack_trace;
pub mod supervisor;
pub mod unary_operators;
pub mod value;

pub use compile::{compile, compile_node, CompileError, CompileErrorKind};
pub use errors::{EvalError, EvalErrorKind};
pub use exec::{call_function, ControlAction, Exception, Exec, ExecResult, Fault, Unit};
pub use frame::{CallSite, Frame};
pub use function_val::{define_native, Closure, FuncProto, NativeFn};
pub use print_handler::{buffer_handler, print_native, stdout_handler, SharedPrintHandler};
pub use program::{invoke, Outcome, Program};
pub use scope::{BlockBuilder, BlockId, BlockKind, ScopeTree};
pub use stack_trace::{StackEntry, StackTrace, UnhandledException};
pub use supervisor::{Budget, HostJob, Supervisor};
pub use value::{Array, Dict, HostValue, Value};

/// Default limit on nested script calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

#[cfg(test)]
mod tests;
