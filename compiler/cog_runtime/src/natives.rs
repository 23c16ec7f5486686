//! Script-visible interrupt control.

use std::sync::Arc;
use std::time::Duration;

use cog_eval::errors::native_failure;
use cog_eval::{define_native, Closure, EvalError, Frame, Value};
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::interrupts::Interrupts;

fn int_arg(function: &str, args: &[Value], index: usize) -> Result<i64, EvalError> {
    args.get(index)
        .and_then(Value::as_int)
        .ok_or_else(|| native_failure(function, format!("argument {} must be an int", index + 1)))
}

fn function_arg(function: &str, args: &[Value], index: usize) -> Result<Arc<Closure>, EvalError> {
    args.get(index)
        .and_then(|value| value.as_function().cloned())
        .ok_or_else(|| {
            native_failure(function, format!("argument {} must be a function", index + 1))
        })
}

pub(crate) fn install(global: &Frame, interrupts: &Arc<Mutex<Interrupts>>, clock: &Clock) {
    let irq = Arc::clone(interrupts);
    define_native(global, "cli", false, move |_| {
        irq.lock().disable();
        Ok(Value::Undefined)
    });

    let irq = Arc::clone(interrupts);
    define_native(global, "sti", false, move |_| {
        irq.lock().enable();
        Ok(Value::Undefined)
    });

    let irq = Arc::clone(interrupts);
    define_native(global, "setInterruptHandler", false, move |args| {
        let id = int_arg("setInterruptHandler", args, 0)?;
        let handler = function_arg("setInterruptHandler", args, 1)?;
        irq.lock().register(id, handler);
        Ok(Value::Undefined)
    });

    let irq = Arc::clone(interrupts);
    define_native(global, "removeInterruptHandler", false, move |args| {
        let id = int_arg("removeInterruptHandler", args, 0)?;
        Ok(Value::bool(irq.lock().remove(id)))
    });

    let irq = Arc::clone(interrupts);
    define_native(global, "raiseInterrupt", false, move |args| {
        let id = int_arg("raiseInterrupt", args, 0)?;
        irq.lock().raise(id, args[1..].to_vec());
        Ok(Value::Undefined)
    });

    let irq = Arc::clone(interrupts);
    let timer_clock = clock.clone();
    define_native(global, "setTimeout", false, move |args| {
        let handler = function_arg("setTimeout", args, 0)?;
        let millis = int_arg("setTimeout", args, 1)?;
        let millis = u64::try_from(millis)
            .map_err(|_| native_failure("setTimeout", "argument 2 must not be negative"))?;
        let delay = Duration::from_millis(millis);
        let id = irq.lock().set_timeout(handler, timer_clock.now(), delay);
        Ok(Value::Int(id))
    });

    let irq = Arc::clone(interrupts);
    define_native(global, "clearTimeout", false, move |args| {
        let id = int_arg("clearTimeout", args, 0)?;
        Ok(Value::bool(irq.lock().clear_timeout(id)))
    });
}
