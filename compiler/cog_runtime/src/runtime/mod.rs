//! Host-facing scheduler API.

use std::sync::Arc;
use std::time::Duration;

use cog_eval::{define_native, Closure, EvalError, Frame, Program, UnhandledException, Value};
use crossbeam::channel::RecvTimeoutError;
use tracing::{debug, warn};

use crate::builder::RuntimeBuilder;
use crate::clock::Clock;
use crate::error::{PrepareError, SchedulerError};
use crate::protocol::{Command, Event, TickStats, TickStatus};
use crate::worker::{Shared, Worker, WorkerLink};

type UnhandledHook = Box<dyn FnMut(&UnhandledException) + Send>;
type InterruptHook = Box<dyn FnMut(i64, &Value) + Send>;

/// Where the scheduler is between (or during) ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeState {
    /// No program running.
    Idle,
    /// A tick is in progress.
    Running,
    /// The worker is waiting on a synchronized native running on the host.
    AwaitingHostCallback,
    /// A program ran out of gas and waits for the next tick.
    Suspended,
    /// Disposed or failed; every further tick is refused.
    Terminated,
}

/// One Cog program slot with its globals, interrupt table, and worker.
///
/// The host drives execution in bounded steps with
/// [`continue_script`](Runtime::continue_script). Between steps the
/// worker is parked, so the host may freely define globals, swap
/// programs, and raise interrupts.
pub struct Runtime {
    shared: Arc<Shared>,
    link: Option<WorkerLink>,
    clock: Clock,
    handoff_timeout: Duration,
    state: RuntimeState,
    last: TickStats,
    on_unhandled: Option<UnhandledHook>,
    on_interrupt_done: Option<InterruptHook>,
}

impl Runtime {
    /// A runtime with default settings.
    pub fn new() -> Result<Self, SchedulerError> {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub(crate) fn start(builder: RuntimeBuilder) -> Result<Self, SchedulerError> {
        let shared = Arc::new(Shared::new());
        let link = Worker::spawn(
            Arc::clone(&shared),
            builder.max_call_depth,
            builder.worker_stack_size,
        )
        .map_err(SchedulerError::Spawn)?;
        debug!(
            max_call_depth = builder.max_call_depth,
            timeout = ?builder.handoff_timeout,
            "runtime started"
        );
        Ok(Runtime {
            shared,
            link: Some(link),
            clock: builder.clock,
            handoff_timeout: builder.handoff_timeout,
            state: RuntimeState::Idle,
            last: TickStats::default(),
            on_unhandled: None,
            on_interrupt_done: None,
        })
    }

    /// Lex, parse, and compile `source`.
    pub fn prepare(&self, source: &str) -> Result<Program, PrepareError> {
        crate::prepare(source)
    }

    /// Bind a host function as a global. A synchronized function runs on
    /// the thread calling `continue_script`; others run on the worker.
    pub fn add_native_function(
        &self,
        name: &str,
        synchronized: bool,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) {
        define_native(&self.shared.global, name, synchronized, func);
    }

    pub fn add_native_value(&self, name: &str, value: impl Into<Value>) {
        self.shared.global.define(name, value.into());
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.shared.global.get_local(name)
    }

    /// A global holding a function, ready to register as a handler.
    pub fn function(&self, name: &str) -> Option<Arc<Closure>> {
        self.global(name)
            .and_then(|value| value.as_function().cloned())
    }

    pub fn global_frame(&self) -> &Frame {
        &self.shared.global
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn state(&self) -> RuntimeState {
        self.state
    }

    pub fn last_tick(&self) -> &TickStats {
        &self.last
    }

    /// Queue `program` to start on the next tick. A suspended program is
    /// abandoned when the worker next wakes; globals are kept.
    pub fn set_program(&mut self, program: Program) -> Result<(), SchedulerError> {
        if self.state == RuntimeState::Terminated {
            return Err(SchedulerError::Terminated);
        }
        debug!(
            replacing = self.state == RuntimeState::Suspended,
            "program set"
        );
        *self.shared.next_program.lock() = Some(program);
        Ok(())
    }

    /// Let the worker execute at most `gas` units, then return. The result
    /// is the program's value on the tick it completes, and `null`
    /// otherwise.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn continue_script(&mut self, gas: u64) -> Result<Value, SchedulerError> {
        if self.state == RuntimeState::Terminated {
            return Err(SchedulerError::Terminated);
        }
        let Some(link) = &self.link else {
            return Err(SchedulerError::Terminated);
        };
        let commands = link.commands.clone();
        let events = link.events.clone();

        self.shared.interrupts.lock().fire_due(self.clock.now());
        self.state = RuntimeState::Running;
        if commands.send(Command::Resume { gas }).is_err() {
            return Err(self.fail(SchedulerError::WorkerLost));
        }

        loop {
            let event = match events.recv_timeout(self.handoff_timeout) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(self.fail(SchedulerError::HandoffTimeout(self.handoff_timeout)));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(self.fail(SchedulerError::WorkerLost));
                }
            };
            match event {
                Event::HostCall(job) => {
                    self.state = RuntimeState::AwaitingHostCallback;
                    let result = job();
                    self.state = RuntimeState::Running;
                    if commands.send(Command::HostReply(result)).is_err() {
                        return Err(self.fail(SchedulerError::WorkerLost));
                    }
                }
                Event::Unhandled(report) => self.report_unhandled(&report),
                Event::InterruptDone { id, value } => {
                    if let Some(hook) = self.on_interrupt_done.as_mut() {
                        hook(id, &value);
                    }
                }
                Event::Yielded { status, executed } => {
                    debug!(executed, ?status, "tick finished");
                    self.state = if status == TickStatus::Suspended {
                        RuntimeState::Suspended
                    } else {
                        RuntimeState::Idle
                    };
                    let value = match &status {
                        TickStatus::Completed(value) => value.clone(),
                        _ => Value::Null,
                    };
                    self.last = TickStats { executed, status };
                    return Ok(value);
                }
            }
        }
    }

    fn report_unhandled(&mut self, report: &UnhandledException) {
        match self.on_unhandled.as_mut() {
            Some(hook) => hook(report),
            None => warn!(interrupt = report.interrupt_id, "{report}"),
        }
    }

    /// Give up on the worker. It is left to exit at its next suspension
    /// point; a runaway worker is detached rather than joined.
    fn fail(&mut self, err: SchedulerError) -> SchedulerError {
        warn!(%err, "terminating runtime");
        self.state = RuntimeState::Terminated;
        if let Some(link) = self.link.take() {
            if link.commands.try_send(Command::Shutdown).is_err() {
                debug!("worker not listening for shutdown");
            }
        }
        err
    }

    pub fn register_interrupt_handler(&self, id: i64, handler: Arc<Closure>) {
        self.shared.interrupts.lock().register(id, handler);
    }

    pub fn remove_interrupt_handler(&self, id: i64) -> bool {
        self.shared.interrupts.lock().remove(id)
    }

    pub fn has_interrupt_handler(&self, id: i64) -> bool {
        self.shared.interrupts.lock().is_registered(id)
    }

    /// Raised interrupts not yet taken by the worker.
    pub fn pending_interrupts(&self) -> usize {
        self.shared.interrupts.lock().pending_len()
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.shared.interrupts.lock().is_enabled()
    }

    /// Queue interrupt `id`; its handler runs at the start of a later
    /// tick, with `args` as arguments.
    pub fn raise_interrupt(&self, id: i64, args: Vec<Value>) {
        self.shared.interrupts.lock().raise(id, args);
    }

    /// `sti`.
    pub fn enable_interrupts(&self) {
        self.shared.interrupts.lock().enable();
    }

    /// `cli`. Raised interrupts stay queued.
    pub fn disable_interrupts(&self) {
        self.shared.interrupts.lock().disable();
    }

    /// Run `handler` once, no earlier than `delay` from now. Returns the
    /// timer's (negative) interrupt id.
    pub fn set_timeout(&self, handler: Arc<Closure>, delay: Duration) -> i64 {
        let now = self.clock.now();
        self.shared.interrupts.lock().set_timeout(handler, now, delay)
    }

    pub fn clear_timeout(&self, id: i64) -> bool {
        self.shared.interrupts.lock().clear_timeout(id)
    }

    /// Called for every exception that escapes the main program or an
    /// interrupt handler. Without one, escapes are logged.
    pub fn set_unhandled_exception_handler(
        &mut self,
        hook: impl FnMut(&UnhandledException) + Send + 'static,
    ) {
        self.on_unhandled = Some(Box::new(hook));
    }

    /// Called with the id and return value of every handler that
    /// completes.
    pub fn set_interrupt_complete_handler(&mut self, hook: impl FnMut(i64, &Value) + Send + 'static) {
        self.on_interrupt_done = Some(Box::new(hook));
    }

    /// Expose `cli`, `sti`, `setInterruptHandler`,
    /// `removeInterruptHandler`, `raiseInterrupt`, `setTimeout`, and
    /// `clearTimeout` to scripts.
    pub fn install_interrupt_natives(&self) {
        crate::natives::install(
            &self.shared.global,
            &self.shared.interrupts,
            &self.clock,
        );
    }

    /// Stop the worker and drop every global, handler, and queued
    /// program. Closures and frames can reference each other; clearing
    /// the tables here breaks those cycles.
    pub fn dispose(&mut self) {
        if let Some(link) = self.link.take() {
            if link.commands.send(Command::Shutdown).is_ok() && link.handle.join().is_err() {
                warn!("worker panicked");
            }
        }
        if self.state != RuntimeState::Terminated {
            debug!("runtime disposed");
        }
        self.state = RuntimeState::Terminated;
        self.shared.interrupts.lock().clear();
        self.shared.next_program.lock().take();
        self.shared.global.clear();
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.dispose();
    }
}
