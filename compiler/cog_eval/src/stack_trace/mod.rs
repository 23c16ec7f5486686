//! Stack traces for exceptions that escape.
//!
//! Frames do not form an explicit call stack; each function activation
//! remembers its caller through the dynamic parent link. Walking those
//! links from the throw site and keeping only function frames rebuilds
//! the chain of calls, most recent first.

use std::fmt;
use std::sync::Arc;

use cog_diagnostic::{Diagnostic, ErrorCode};
use cog_ir::Position;

use crate::exec::Exception;
use crate::scope::BlockKind;
use crate::{Frame, Value};

/// One entry: the function and the position executing in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackEntry {
    pub function: Arc<str>,
    pub pos: Position,
}

impl fmt::Display for StackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos == Position::DUMMY {
            write!(f, "at {}", self.function)
        } else {
            write!(f, "at {} ({})", self.function, self.pos)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackTrace {
    pub entries: Vec<StackEntry>,
}

impl StackTrace {
    /// Trace for something happening at `pos` while `frame` runs.
    pub fn capture(frame: &Frame, pos: Position) -> Self {
        let mut entries = Vec::new();
        let mut at = pos;
        let mut current = Some(frame);
        while let Some(frame) = current {
            if frame.kind() == BlockKind::Function {
                if let Some(call) = frame.call_site() {
                    entries.push(StackEntry {
                        function: Arc::clone(&call.function),
                        pos: at,
                    });
                    at = call.pos;
                }
            }
            current = frame.dynamic_parent();
        }
        StackTrace { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Function names, innermost first.
    pub fn functions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| &*e.function).collect()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "    {entry}")?;
        }
        Ok(())
    }
}

/// An exception no `try` caught, as reported to the host.
#[derive(Clone, Debug)]
pub struct UnhandledException {
    /// Interrupt whose handler threw, or `-1` for the main program.
    pub interrupt_id: i64,
    pub message: String,
    pub payload: Value,
    pub pos: Position,
    pub stack: StackTrace,
    pub code: ErrorCode,
}

impl UnhandledException {
    /// Id used for exceptions from the main program.
    pub const MAIN: i64 = -1;

    pub fn new(interrupt_id: i64, exception: &Exception) -> Self {
        UnhandledException {
            interrupt_id,
            message: exception.message(),
            payload: exception.payload.clone(),
            pos: exception.pos,
            stack: StackTrace::capture(&exception.frame, exception.pos),
            code: exception
                .error
                .as_ref()
                .map_or(ErrorCode::E6090, |err| err.code()),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code)
            .with_message(format!("uncaught exception: {}", self.message))
            .with_label(self.pos, "thrown here");
        if self.interrupt_id != Self::MAIN {
            diagnostic = diagnostic.with_note(format!("in handler for interrupt {}", self.interrupt_id));
        }
        for entry in &self.stack.entries {
            diagnostic = diagnostic.with_note(entry.to_string());
        }
        diagnostic
    }
}

impl fmt::Display for UnhandledException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uncaught exception: {}", self.message)?;
        if !self.stack.is_empty() {
            write!(f, "\n{}", self.stack)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
