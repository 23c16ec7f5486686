//! The seam between executing units and whoever is driving them.
//!
//! Every unit calls [`Supervisor::tick`] before it runs, and synchronized
//! native functions go through [`Supervisor::hand_off`]. The scheduler in
//! `cog_runtime` uses these two hooks to suspend on gas exhaustion and to
//! run host callbacks on the host's thread; [`Budget`] is the standalone
//! version used by tests and one-shot evaluation.

use crate::errors::EvalError;
use crate::exec::Fault;
use crate::Value;

/// Work that must run on the host's thread.
pub type HostJob = Box<dyn FnOnce() -> Result<Value, EvalError> + Send>;

pub trait Supervisor {
    /// Called once before every unit. An error stops execution.
    fn tick(&mut self) -> Result<(), Fault>;

    /// Run `job` where the host wants it and wait for the result.
    fn hand_off(&mut self, job: HostJob) -> Result<Result<Value, EvalError>, Fault>;
}

/// Counts units and optionally caps them. Host jobs run inline.
#[derive(Clone, Copy, Debug, Default)]
pub struct Budget {
    limit: Option<u64>,
    executed: u64,
}

impl Budget {
    pub const fn unlimited() -> Self {
        Budget {
            limit: None,
            executed: 0,
        }
    }

    /// Fail with [`Fault::GasExhausted`] once `limit` units have run.
    pub const fn limited(limit: u64) -> Self {
        Budget {
            limit: Some(limit),
            executed: 0,
        }
    }

    pub const fn executed(&self) -> u64 {
        self.executed
    }
}

impl Supervisor for Budget {
    #[inline]
    fn tick(&mut self) -> Result<(), Fault> {
        if self.limit.is_some_and(|limit| self.executed >= limit) {
            return Err(Fault::GasExhausted);
        }
        self.executed += 1;
        Ok(())
    }

    fn hand_off(&mut self, job: HostJob) -> Result<Result<Value, EvalError>, Fault> {
        Ok(job())
    }
}
