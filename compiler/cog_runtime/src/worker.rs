//! The worker: a thread used as a fiber.
//!
//! The worker owns program execution. It never runs while the host does:
//! it wakes on a command, runs until it must hand control back (out of
//! gas, a host call, or nothing left to do), sends exactly one event for
//! that, and blocks again. The scheduler's gas accounting lives here, in
//! the worker's [`Supervisor`] implementation, so every compiled unit
//! passes through [`Worker::tick`] before it runs.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use cog_eval::{
    invoke, EvalError, Fault, Frame, HostJob, Outcome, Program, Supervisor, UnhandledException,
    Value,
};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::interrupts::{Fired, Interrupts};
use crate::protocol::{Command, Event, TickStatus};

/// State reachable from both sides. The host only touches it while the
/// worker is blocked.
pub(crate) struct Shared {
    pub global: Frame,
    pub interrupts: Arc<Mutex<Interrupts>>,
    /// Program to start next; replaces a running one at its next
    /// suspension.
    pub next_program: Mutex<Option<Program>>,
}

impl Shared {
    pub fn new() -> Self {
        Shared {
            global: Frame::global(),
            interrupts: Arc::new(Mutex::new(Interrupts::new())),
            next_program: Mutex::new(None),
        }
    }
}

/// Host end of the channels.
pub(crate) struct WorkerLink {
    pub commands: Sender<Command>,
    pub events: Receiver<Event>,
    pub handle: JoinHandle<()>,
}

pub(crate) struct Worker {
    shared: Arc<Shared>,
    commands: Receiver<Command>,
    events: Sender<Event>,
    max_call_depth: usize,
    gas: u64,
    executed: u64,
    running_main: bool,
}

impl Worker {
    pub fn spawn(
        shared: Arc<Shared>,
        max_call_depth: usize,
        stack_size: usize,
    ) -> io::Result<WorkerLink> {
        // One message is ever in flight in each direction.
        let (command_tx, command_rx) = channel::bounded(1);
        let (event_tx, event_rx) = channel::bounded(1);
        let worker = Worker {
            shared,
            commands: command_rx,
            events: event_tx,
            max_call_depth,
            gas: 0,
            executed: 0,
            running_main: false,
        };
        let handle = thread::Builder::new()
            .name("cog-worker".to_string())
            .stack_size(stack_size)
            .spawn(move || worker.serve())?;
        Ok(WorkerLink {
            commands: command_tx,
            events: event_rx,
            handle,
        })
    }

    fn serve(mut self) {
        debug!("worker started");
        while let Some(gas) = self.next_resume() {
            self.start_tick(gas);
            let status = match self.run_tick() {
                Ok(status) => status,
                Err(fault) => {
                    debug!(%fault, "worker stopping");
                    return;
                }
            };
            let executed = self.executed;
            if self.emit(Event::Yielded { status, executed }).is_err() {
                return;
            }
        }
        debug!("worker shut down");
    }

    fn start_tick(&mut self, gas: u64) {
        self.gas = gas;
        self.executed = 0;
    }

    /// Block until the host says to run. `None` means shut down.
    fn next_resume(&self) -> Option<u64> {
        loop {
            match self.commands.recv() {
                Ok(Command::Resume { gas }) => return Some(gas),
                Ok(Command::HostReply(_)) => warn!("host reply with no call outstanding"),
                Ok(Command::Shutdown) | Err(_) => return None,
            }
        }
    }

    fn emit(&self, event: Event) -> Result<(), Fault> {
        self.events.send(event).map_err(|_| Fault::Terminated)
    }

    /// A tick that starts with no program running: handlers first, then
    /// any program waiting to start.
    fn run_tick(&mut self) -> Result<TickStatus, Fault> {
        self.drain_interrupts()?;
        let mut status = TickStatus::Idle;
        loop {
            let next = self.shared.next_program.lock().take();
            let Some(program) = next else {
                break;
            };
            status = self.run_main(&program)?;
        }
        Ok(status)
    }

    fn run_main(&mut self, program: &Program) -> Result<TickStatus, Fault> {
        debug!(statements = program.units().len(), "starting program");
        let global = self.shared.global.clone();
        let depth = self.max_call_depth;
        self.running_main = true;
        let outcome = program.execute(&global, self, depth);
        self.running_main = false;
        match outcome {
            Outcome::Completed(value) => Ok(TickStatus::Completed(value)),
            Outcome::Unhandled(exception) => {
                let report = UnhandledException::new(UnhandledException::MAIN, &exception);
                self.emit(Event::Unhandled(report))?;
                Ok(TickStatus::Failed)
            }
            Outcome::Faulted(Fault::Cancelled) => {
                debug!("program replaced");
                Ok(TickStatus::Idle)
            }
            Outcome::Faulted(fault) => Err(fault),
        }
    }

    /// Run queued interrupts while gas remains. Each handler is a fresh
    /// top-level call; a handler that runs out of gas suspends the whole
    /// worker like any other code.
    fn drain_interrupts(&mut self) -> Result<(), Fault> {
        while self.gas > 0 {
            let next = self.shared.interrupts.lock().take_next();
            let Some(Fired { id, handler, args }) = next else {
                break;
            };
            debug!(id, handler = handler.name(), "running interrupt handler");
            let entry = Frame::entry(&self.shared.global, &format!("interrupt {id}"));
            let depth = self.max_call_depth;
            let outcome = invoke(&handler, args, &entry, self, depth);
            self.shared.interrupts.lock().finish();
            match outcome {
                Outcome::Completed(value) => self.emit(Event::InterruptDone { id, value })?,
                Outcome::Unhandled(exception) => {
                    let report = UnhandledException::new(id, &exception);
                    self.emit(Event::Unhandled(report))?;
                }
                Outcome::Faulted(fault) => return Err(fault),
            }
        }
        Ok(())
    }

    /// Hand control back with the tick unfinished and wait to be resumed.
    fn suspend(&mut self) -> Result<(), Fault> {
        trace!(executed = self.executed, "out of gas");
        let executed = self.executed;
        self.emit(Event::Yielded {
            status: TickStatus::Suspended,
            executed,
        })?;
        let gas = self.next_resume().ok_or(Fault::Terminated)?;
        self.start_tick(gas);
        if self.main_replaced() {
            return Err(Fault::Cancelled);
        }
        self.drain_interrupts()?;
        if self.main_replaced() {
            return Err(Fault::Cancelled);
        }
        Ok(())
    }

    /// The suspended code is the main program itself (not a handler it
    /// was interrupted by) and another program is waiting to start.
    fn main_replaced(&self) -> bool {
        if !self.running_main {
            return false;
        }
        let in_handler = self.shared.interrupts.lock().in_handler();
        !in_handler && self.shared.next_program.lock().is_some()
    }
}

impl Supervisor for Worker {
    fn tick(&mut self) -> Result<(), Fault> {
        while self.gas == 0 {
            self.suspend()?;
        }
        self.gas -= 1;
        self.executed += 1;
        Ok(())
    }

    fn hand_off(&mut self, job: HostJob) -> Result<Result<Value, EvalError>, Fault> {
        self.emit(Event::HostCall(job))?;
        loop {
            match self.commands.recv() {
                Ok(Command::HostReply(result)) => return Ok(result),
                Ok(Command::Resume { .. }) => warn!("resume while a host call is outstanding"),
                Ok(Command::Shutdown) | Err(_) => return Err(Fault::Terminated),
            }
        }
    }
}
