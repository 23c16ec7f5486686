//! Diagnostic system for Cog.
//!
//! Every error a script author can see carries:
//! - An error code for searchability
//! - A message saying what went wrong
//! - A primary position saying where it went wrong
//! - Optional notes with surrounding context
//!
//! Lexing, parsing, and compiling each convert their own error types into
//! a [`Diagnostic`]; the [`emitter::TerminalEmitter`] renders them with a
//! source snippet.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{ColorMode, TerminalEmitter};
pub use error_code::ErrorCode;
