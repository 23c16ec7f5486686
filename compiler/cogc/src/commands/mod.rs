//! Command handlers for the `cog` CLI.
//!
//! Shared helpers for reading files and rendering diagnostics live in the
//! module root.

use cog_diagnostic::{ColorMode, Diagnostic, TerminalEmitter};

mod debug;
mod run;

pub use debug::{lex_file, lex_source, parse_file, parse_source};
pub use run::{parse_run_options, run_file, run_source, RunOptions, RunReport, RunStatus};

/// Read a source file or exit with a message.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn stderr_emitter() -> TerminalEmitter<std::io::Stderr> {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    TerminalEmitter::stderr(ColorMode::Auto, is_tty)
}

/// Print every diagnostic plus the closing summary line.
pub(crate) fn report(diagnostics: &[Diagnostic], source: &str, path: &str) {
    let mut emitter = stderr_emitter();
    for diagnostic in diagnostics {
        emitter.emit(diagnostic, source, path);
    }
    emitter.emit_summary(diagnostics.len());
    emitter.flush();
}
