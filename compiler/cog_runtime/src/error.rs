//! Errors at the host boundary.

use cog_diagnostic::{Diagnostic, ErrorCode};
use cog_eval::CompileError;
use cog_parse::ParseError;

/// Why `prepare` rejected a source text. No partial program is kept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrepareError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Compile(#[from] CompileError),
}

impl PrepareError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PrepareError::Parse(err) => err.code,
            PrepareError::Compile(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PrepareError::Parse(err) => err.to_diagnostic(),
            PrepareError::Compile(err) => err.to_diagnostic(),
        }
    }
}

/// Failures of the scheduler itself. Each one leaves the runtime
/// terminated for good.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("the runtime has been terminated")]
    Terminated,
    #[error("worker did not answer within {0:?}")]
    HandoffTimeout(std::time::Duration),
    #[error("worker thread exited unexpectedly")]
    WorkerLost,
    #[error("could not start the worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

impl SchedulerError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::E6091
    }
}
