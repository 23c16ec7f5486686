//! Function calls.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use cog_ir::Position;
use tracing::trace;

use super::{run_units, ControlAction, Exec, ExecResult};
use crate::errors::{native_failure, recursion_limit, EvalError};
use crate::frame::CallSite;
use crate::function_val::{Closure, FuncProto, NativeFn, ScriptFunction};
use crate::{Frame, Value};

/// Call `closure` with `args` from `caller`. `pos` is the call
/// expression, recorded for stack traces.
///
/// Missing arguments are `undefined`, extra ones are ignored. A function
/// that finishes without `return` yields `undefined`.
pub fn call_function(
    ex: &mut Exec<'_>,
    closure: &Arc<Closure>,
    args: Vec<Value>,
    caller: &Frame,
    pos: Position,
) -> ExecResult {
    match &closure.proto {
        FuncProto::Script(function) => {
            let env = closure.env.as_ref().unwrap_or(caller);
            call_script(ex, function, env, args, caller, pos)
        }
        FuncProto::Native(native) => {
            let result = if native.synchronized {
                let func = Arc::clone(&native.func);
                let name = Arc::clone(&native.name);
                ex.supervisor
                    .hand_off(Box::new(move || invoke_native(&name, &func, &args)))?
            } else {
                invoke_native(&native.name, &native.func, &args)
            };
            result.map_err(ControlAction::Error)
        }
    }
}

fn call_script(
    ex: &mut Exec<'_>,
    function: &ScriptFunction,
    env: &Frame,
    args: Vec<Value>,
    caller: &Frame,
    pos: Position,
) -> ExecResult {
    ex.depth
        .enter()
        .map_err(|exceeded| ControlAction::Error(recursion_limit(exceeded.max)))?;
    trace!(function = %function.name, depth = ex.depth.depth(), "call");

    let call = CallSite {
        function: Arc::clone(&function.name),
        pos,
    };
    let frame = Frame::activation(env, caller, function.block, call);
    let mut args = args.into_iter();
    for param in &function.params {
        frame.define(Arc::clone(param), args.next().unwrap_or_default());
    }

    let result = run_units(&function.body, ex, &frame);
    ex.depth.leave();
    match result {
        Err(ControlAction::Return(value)) => Ok(value),
        Ok(_) | Err(ControlAction::Break | ControlAction::Continue) => Ok(Value::Undefined),
        Err(other) => Err(other),
    }
}

/// Run a host function, turning a panic into an error.
pub(crate) fn invoke_native(name: &str, func: &NativeFn, args: &[Value]) -> Result<Value, EvalError> {
    match catch_unwind(AssertUnwindSafe(|| func(args))) {
        Ok(result) => result,
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panicked".to_string());
            Err(native_failure(name, message))
        }
    }
}
