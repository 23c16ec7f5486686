//! Cooperative scheduler for Cog programs.
//!
//! A [`Runtime`] owns one worker thread that runs compiled programs in
//! bounded steps. The host calls [`Runtime::continue_script`] with a gas
//! allowance; the worker runs at most that many units, then parks until
//! the next call. Synchronized natives are shipped back to the host
//! thread for the duration of the call. Interrupts raised by the host or
//! by scripts run as fresh top-level calls at the start of a tick.
//!
//! ```ignore
//! let mut runtime = Runtime::new()?;
//! runtime.add_native_function("print", true, print_native(stdout_handler()));
//! runtime.set_program(cog_runtime::prepare("print(1 + 1);")?)?;
//! loop {
//!     runtime.continue_script(1_000)?;
//!     if runtime.state() == RuntimeState::Idle {
//!         break;
//!     }
//! }
//! ```

mod builder;
mod clock;
mod error;
mod interrupts;
mod natives;
mod protocol;
mod runtime;
mod worker;

pub use builder::{RuntimeBuilder, DEFAULT_HANDOFF_TIMEOUT, DEFAULT_WORKER_STACK_SIZE};
pub use clock::Clock;
pub use error::{PrepareError, SchedulerError};
pub use protocol::{TickStats, TickStatus};
pub use runtime::{Runtime, RuntimeState};

use cog_eval::Program;
use tracing::debug;

/// Lex, parse, and compile `source` into a runnable program.
pub fn prepare(source: &str) -> Result<Program, PrepareError> {
    let ast = cog_parse::parse(source)?;
    let program = cog_eval::compile(&ast)?;
    debug!(
        statements = program.units().len(),
        blocks = program.scopes().len(),
        "prepared program"
    );
    Ok(program)
}
