//! Non-local exits.
//!
//! Every unit returns an [`ExecResult`]. `Ok` carries the unit's value;
//! `Err` carries a [`ControlAction`] that unwinds until a block that
//! handles it: loops take `Break`/`Continue`, functions take `Return`,
//! `try` takes `Throw`. Nothing takes a [`Fault`].

use std::fmt;

use cog_ir::Position;

use crate::errors::EvalError;
use crate::{Frame, Value};

pub type ExecResult = Result<Value, ControlAction>;

#[derive(Clone, Debug)]
pub enum ControlAction {
    Break,
    Continue,
    Return(Value),
    Throw(Exception),
    /// Runtime failure not yet tied to a position; the unit that sees it
    /// turns it into `Throw`.
    Error(EvalError),
    Fault(Fault),
}

impl ControlAction {
    /// Attach a location to an unlocated error.
    #[must_use]
    pub fn locate(self, frame: &Frame, pos: Position) -> Self {
        match self {
            ControlAction::Error(err) => {
                ControlAction::Throw(Exception::from_error(err, frame.clone(), pos))
            }
            other => other,
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

impl From<Fault> for ControlAction {
    fn from(fault: Fault) -> Self {
        ControlAction::Fault(fault)
    }
}

/// A thrown script value and where it was thrown.
#[derive(Clone)]
pub struct Exception {
    pub payload: Value,
    pub frame: Frame,
    pub pos: Position,
    /// Set when the exception wraps a runtime error.
    pub error: Option<EvalError>,
}

impl Exception {
    pub fn thrown(payload: Value, frame: Frame, pos: Position) -> Self {
        Exception {
            payload,
            frame,
            pos,
            error: None,
        }
    }

    /// Runtime errors are thrown as their message string.
    pub fn from_error(err: EvalError, frame: Frame, pos: Position) -> Self {
        Exception {
            payload: Value::string(err.message.as_str()),
            frame,
            pos,
            error: Some(err),
        }
    }

    pub fn message(&self) -> String {
        self.payload.to_string()
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("payload", &self.payload)
            .field("pos", &self.pos)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Stops execution outright; never catchable by script code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("execution terminated")]
    Terminated,
    #[error("program replaced")]
    Cancelled,
    #[error("gas exhausted")]
    GasExhausted,
}
