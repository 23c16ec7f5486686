//! Executable units and the state threaded through them.

mod call;
mod control;

use std::fmt;
use std::sync::Arc;

use cog_ir::Position;
use cog_stack::{ensure_sufficient_stack, DepthLimit};

pub use call::call_function;
pub use control::{ControlAction, Exception, ExecResult, Fault};

use crate::supervisor::Supervisor;
use crate::{Frame, Value};

/// Per-run execution state.
pub struct Exec<'a> {
    pub(crate) supervisor: &'a mut dyn Supervisor,
    pub(crate) depth: DepthLimit,
}

impl<'a> Exec<'a> {
    pub fn new(supervisor: &'a mut dyn Supervisor, max_call_depth: usize) -> Self {
        Exec {
            supervisor,
            depth: DepthLimit::new(max_call_depth),
        }
    }

    pub fn supervisor(&mut self) -> &mut dyn Supervisor {
        &mut *self.supervisor
    }

    /// Current script call depth.
    pub fn depth(&self) -> usize {
        self.depth.depth()
    }
}

type RunFn = dyn Fn(&mut Exec<'_>, &Frame) -> ExecResult + Send + Sync;

/// One compiled AST node: a closure plus the node's position and kind.
#[derive(Clone)]
pub struct Unit {
    run: Arc<RunFn>,
    pos: Position,
    label: &'static str,
}

impl Unit {
    pub fn new(
        pos: Position,
        label: &'static str,
        run: impl Fn(&mut Exec<'_>, &Frame) -> ExecResult + Send + Sync + 'static,
    ) -> Self {
        Unit {
            run: Arc::new(run),
            pos,
            label,
        }
    }

    /// Run the unit in `frame`. Costs one tick of gas, paid before the
    /// body runs; runtime errors come back located at this unit.
    #[inline]
    pub fn exec(&self, ex: &mut Exec<'_>, frame: &Frame) -> ExecResult {
        ex.supervisor.tick()?;
        ensure_sufficient_stack(|| (self.run)(ex, frame))
            .map_err(|action| action.locate(frame, self.pos))
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit({} @ {})", self.label, self.pos)
    }
}

/// Run `units` in order in `frame`; the value of the last one, or
/// `undefined` if there are none.
pub fn run_units(units: &[Unit], ex: &mut Exec<'_>, frame: &Frame) -> ExecResult {
    let mut last = Value::Undefined;
    for unit in units {
        last = unit.exec(ex, frame)?;
    }
    Ok(last)
}
