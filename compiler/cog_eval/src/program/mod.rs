//! Compiled programs and top-level entry points.

use std::sync::Arc;

use cog_ir::Position;

use crate::exec::{call_function, run_units, ControlAction, Exception, Exec, Fault, Unit};
use crate::function_val::{Closure, FuncProto};
use crate::scope::ScopeTree;
use crate::supervisor::Supervisor;
use crate::{Frame, Value};

/// Statements of the synthetic `main` function plus the block tree.
/// Cheap to clone; compiled state is shared.
#[derive(Clone, Debug)]
pub struct Program {
    main: Arc<[Unit]>,
    scopes: Arc<ScopeTree>,
}

/// How a top-level run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Finished; the value of the last statement (for `main`) or the
    /// return value (for a call).
    Completed(Value),
    /// An exception reached the top.
    Unhandled(Exception),
    /// The supervisor stopped execution.
    Faulted(Fault),
}

impl Outcome {
    fn from_result(result: Result<Value, ControlAction>) -> Self {
        match result {
            Ok(value) | Err(ControlAction::Return(value)) => Outcome::Completed(value),
            Err(ControlAction::Break | ControlAction::Continue) => {
                Outcome::Completed(Value::Undefined)
            }
            Err(ControlAction::Throw(exception)) => Outcome::Unhandled(exception),
            // Units locate their own errors; only a bare entry point
            // can see one here.
            Err(ControlAction::Error(err)) => {
                Outcome::Unhandled(Exception::from_error(err, Frame::global(), Position::DUMMY))
            }
            Err(ControlAction::Fault(fault)) => Outcome::Faulted(fault),
        }
    }

    pub fn completed(self) -> Option<Value> {
        match self {
            Outcome::Completed(value) => Some(value),
            _ => None,
        }
    }
}

impl Program {
    pub(crate) fn new(main: Vec<Unit>, scopes: ScopeTree) -> Self {
        Program {
            main: main.into(),
            scopes: Arc::new(scopes),
        }
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    /// Top-level statements.
    pub fn units(&self) -> &[Unit] {
        &self.main
    }

    /// Run `main` with `global` as its frame, so top-level `var`s are
    /// globals.
    pub fn execute(
        &self,
        global: &Frame,
        supervisor: &mut dyn Supervisor,
        max_call_depth: usize,
    ) -> Outcome {
        let mut ex = Exec::new(supervisor, max_call_depth);
        Outcome::from_result(run_units(&self.main, &mut ex, global))
    }
}

/// Call `closure` as a fresh top-level call from `entry`, outside any
/// running program's frames. Interrupt handlers run this way.
pub fn invoke(
    closure: &Arc<Closure>,
    args: Vec<Value>,
    entry: &Frame,
    supervisor: &mut dyn Supervisor,
    max_call_depth: usize,
) -> Outcome {
    let mut ex = Exec::new(supervisor, max_call_depth);
    let pos = match &closure.proto {
        FuncProto::Script(function) => function.pos,
        FuncProto::Native(_) => Position::DUMMY,
    };
    let result =
        call_function(&mut ex, closure, args, entry, pos).map_err(|action| action.locate(entry, pos));
    Outcome::from_result(result)
}
