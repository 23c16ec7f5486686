//! Stack safety for the recursive phases of Cog.
//!
//! The parser, the compiler, and the closure tree the compiler produces all
//! recurse once per AST level, so a deeply nested script can exhaust the
//! native stack. Two tools guard against that:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand (via
//!   `stacker` on native targets; a plain call on wasm).
//! - [`DepthLimit`] counts script-level call depth so runaway recursion
//!   in a script surfaces as a catchable error instead of exhausting
//!   memory.

use std::fmt;

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one
/// is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Counter for nested script calls.
#[derive(Clone, Copy, Debug)]
pub struct DepthLimit {
    depth: usize,
    max: usize,
}

/// Returned by [`DepthLimit::enter`] when the limit would be exceeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub max: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maximum recursion depth of {} exceeded", self.max)
    }
}

impl std::error::Error for DepthExceeded {}

impl DepthLimit {
    pub const fn new(max: usize) -> Self {
        DepthLimit { depth: 0, max }
    }

    /// Record one more level of nesting. On error the depth is unchanged.
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.depth >= self.max {
            return Err(DepthExceeded { max: self.max });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub const fn max(&self) -> usize {
        self.max
    }
}
