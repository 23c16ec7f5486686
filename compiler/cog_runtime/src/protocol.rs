//! Messages between the host and the worker.
//!
//! Control strictly alternates: the host sends one command and then
//! blocks on events until a `Yielded` arrives; the worker sends one event
//! per hand-off and then blocks on the next command.

use cog_eval::{EvalError, HostJob, UnhandledException, Value};

pub(crate) enum Command {
    /// Run with this much gas.
    Resume { gas: u64 },
    /// Result of the last `HostCall`.
    HostReply(Result<Value, EvalError>),
    /// Unwind and exit.
    Shutdown,
}

pub(crate) enum Event {
    /// The tick is over; control returns to the host.
    Yielded { status: TickStatus, executed: u64 },
    /// Run this on the host thread and reply with `HostReply`.
    HostCall(HostJob),
    /// An exception escaped the main program or a handler.
    Unhandled(UnhandledException),
    /// An interrupt handler returned.
    InterruptDone { id: i64, value: Value },
}

/// How a tick ended.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TickStatus {
    /// Nothing to run.
    #[default]
    Idle,
    /// Out of gas with work remaining.
    Suspended,
    /// The main program finished with this value.
    Completed(Value),
    /// The main program ended with an uncaught exception.
    Failed,
}

/// Summary of the most recent `continue_script`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Units executed, handlers included.
    pub executed: u64,
    pub status: TickStatus,
}
