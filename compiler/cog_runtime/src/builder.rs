//! `RuntimeBuilder` for configuring a [`Runtime`].

use std::time::Duration;

use cog_eval::DEFAULT_MAX_CALL_DEPTH;

use crate::clock::Clock;
use crate::error::SchedulerError;
use crate::runtime::Runtime;

/// How long the host waits on the worker before declaring it lost.
pub const DEFAULT_HANDOFF_TIMEOUT: Duration = Duration::from_secs(5);

/// Stack for the worker thread. Deep scripts recurse through the
/// evaluator, which grows the stack on demand beyond this.
pub const DEFAULT_WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Builder for [`Runtime`] instances.
///
/// ```ignore
/// let runtime = Runtime::builder()
///     .handoff_timeout(Duration::from_millis(500))
///     .max_call_depth(128)
///     .build()?;
/// ```
#[derive(Clone, Debug)]
pub struct RuntimeBuilder {
    pub(crate) handoff_timeout: Duration,
    pub(crate) max_call_depth: usize,
    pub(crate) worker_stack_size: usize,
    pub(crate) clock: Clock,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        RuntimeBuilder {
            handoff_timeout: DEFAULT_HANDOFF_TIMEOUT,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            worker_stack_size: DEFAULT_WORKER_STACK_SIZE,
            clock: Clock::monotonic(),
        }
    }

    /// Longest the host waits for any single worker event.
    #[must_use]
    pub fn handoff_timeout(mut self, timeout: Duration) -> Self {
        self.handoff_timeout = timeout;
        self
    }

    /// Script call depth at which calls start failing with a catchable
    /// recursion error.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn worker_stack_size(mut self, bytes: usize) -> Self {
        self.worker_stack_size = bytes;
        self
    }

    /// Time source for timers.
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Start the worker thread.
    pub fn build(self) -> Result<Runtime, SchedulerError> {
        Runtime::start(self)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        RuntimeBuilder::new()
    }
}
