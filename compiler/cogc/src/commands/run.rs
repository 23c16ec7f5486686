//! The `run` command: prepare a script and drive it to completion.

use std::sync::Arc;

use cog_eval::{print_native, stdout_handler, SharedPrintHandler, UnhandledException, Value};
use cog_runtime::{PrepareError, Runtime, TickStatus};
use parking_lot::Mutex;
use tracing::debug;

use super::{read_file, report};

/// Gas per tick when `--gas` is not given.
pub const DEFAULT_GAS: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Units per `continue_script` call.
    pub gas: u64,
    /// Give up after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            gas: DEFAULT_GAS,
            max_ticks: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunStatus {
    /// The program finished with this value.
    Completed(Value),
    /// The program ended with an uncaught exception.
    Failed,
    /// `--max-ticks` ran out first.
    TickLimit,
    /// The scheduler gave up.
    Terminated(String),
}

#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    pub ticks: u64,
    pub executed: u64,
    pub unhandled: Vec<UnhandledException>,
}

/// Split `run` arguments into the file path and options.
pub fn parse_run_options(args: &[String]) -> Result<(Option<&str>, RunOptions), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(gas) = arg.strip_prefix("--gas=") {
            options.gas = gas
                .parse()
                .map_err(|_| format!("invalid --gas value '{gas}'"))?;
        } else if let Some(ticks) = arg.strip_prefix("--max-ticks=") {
            options.max_ticks = Some(
                ticks
                    .parse()
                    .map_err(|_| format!("invalid --max-ticks value '{ticks}'"))?,
            );
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.as_str());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }
    Ok((path, options))
}

/// Run `source` with a synchronized `print` writing to `print`, plus the
/// interrupt natives.
pub fn run_source(
    source: &str,
    options: &RunOptions,
    print: SharedPrintHandler,
) -> Result<RunReport, PrepareError> {
    let program = cog_runtime::prepare(source)?;
    let mut report = RunReport {
        status: RunStatus::Completed(Value::Undefined),
        ticks: 0,
        executed: 0,
        unhandled: Vec::new(),
    };

    let mut runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            report.status = RunStatus::Terminated(err.to_string());
            return Ok(report);
        }
    };
    let unhandled: Arc<Mutex<Vec<UnhandledException>>> = Arc::default();
    let sink = Arc::clone(&unhandled);
    runtime.set_unhandled_exception_handler(move |exception| sink.lock().push(exception.clone()));
    runtime.add_native_function("print", true, print_native(print));
    runtime.install_interrupt_natives();

    report.status = match runtime.set_program(program) {
        Ok(()) => drive(&mut runtime, options, &mut report),
        Err(err) => RunStatus::Terminated(err.to_string()),
    };
    debug!(ticks = report.ticks, executed = report.executed, "run finished");
    runtime.dispose();
    report.unhandled = std::mem::take(&mut *unhandled.lock());
    Ok(report)
}

fn drive(runtime: &mut Runtime, options: &RunOptions, report: &mut RunReport) -> RunStatus {
    loop {
        if options.max_ticks.is_some_and(|max| report.ticks >= max) {
            return RunStatus::TickLimit;
        }
        let value = match runtime.continue_script(options.gas) {
            Ok(value) => value,
            Err(err) => return RunStatus::Terminated(err.to_string()),
        };
        report.ticks += 1;
        report.executed += runtime.last_tick().executed;
        match &runtime.last_tick().status {
            TickStatus::Suspended => {}
            TickStatus::Completed(_) => return RunStatus::Completed(value),
            TickStatus::Failed => return RunStatus::Failed,
            TickStatus::Idle => return RunStatus::Completed(Value::Undefined),
        }
    }
}

/// Run a script file, printing to stdout. Exits with status 1 when the
/// script cannot be prepared or does not finish cleanly.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_file(path);
    let outcome = match run_source(&content, options, stdout_handler()) {
        Ok(outcome) => outcome,
        Err(err) => {
            report(&[err.to_diagnostic()], &content, path);
            std::process::exit(1);
        }
    };

    let diagnostics: Vec<_> = outcome
        .unhandled
        .iter()
        .map(UnhandledException::to_diagnostic)
        .collect();
    if !diagnostics.is_empty() {
        report(&diagnostics, &content, path);
    }

    match outcome.status {
        RunStatus::Completed(value) => {
            if !matches!(value, Value::Undefined) {
                println!("{value}");
            }
        }
        RunStatus::Failed => std::process::exit(1),
        RunStatus::TickLimit => {
            eprintln!(
                "error: program still running after {} ticks ({} units)",
                outcome.ticks, outcome.executed
            );
            std::process::exit(1);
        }
        RunStatus::Terminated(reason) => {
            eprintln!("error: {reason}");
            std::process::exit(1);
        }
    }
}
