//! Terminal Emitter
//!
//! Human-readable diagnostic output with a source snippet and optional
//! ANSI colors:
//!
//! ```text
//! error[E1001]: expected `;`, found `}`
//!   --> demo.cog:3:11
//!    |
//!  3 |     x = 1 }
//!    |           ^ expected `;`
//!    = note: while parsing a block
//! ```

use std::io::{self, Write};

use cog_ir::LineIndex;

use crate::{Diagnostic, Label, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// For `Auto`, `is_tty` decides; the other modes ignore it.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Write failures are ignored: diagnostics are best-effort output.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }

    /// Render one diagnostic against the source it was produced from.
    pub fn emit(&mut self, diagnostic: &Diagnostic, source: &str, file_name: &str) {
        // Header: severity[CODE]: message
        let color = Self::severity_color(diagnostic.severity);
        self.write_colored(&diagnostic.severity.to_string(), color);
        self.write_colored(&format!("[{}]", diagnostic.code), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let index = LineIndex::build(source);
        let gutter = diagnostic
            .labels
            .iter()
            .map(|label| label.pos.line.to_string().len())
            .max()
            .unwrap_or(1);

        if let Some(primary) = diagnostic.labels.iter().find(|l| l.is_primary) {
            let _ = writeln!(
                self.writer,
                "{:gutter$}--> {file_name}:{}",
                "",
                primary.pos,
                gutter = gutter + 1
            );
        }

        for label in &diagnostic.labels {
            self.emit_snippet(label, source, &index, gutter);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "{:gutter$} = ", "", gutter = gutter + 1);
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        let _ = writeln!(self.writer);
    }

    fn emit_snippet(&mut self, label: &Label, source: &str, index: &LineIndex, gutter: usize) {
        let Some(line_text) = index.line_text(source, label.pos.line) else {
            // Synthesized positions have no snippet; keep the message.
            let _ = writeln!(self.writer, "{:gutter$} = {}", "", label.message, gutter = gutter + 1);
            return;
        };

        let caret_col = label.pos.column.saturating_sub(1) as usize;
        let line_chars = line_text.chars().count();
        let width = label
            .pos
            .text(source)
            .and_then(|text| text.lines().next())
            .map_or(1, |text| text.chars().count())
            .clamp(1, line_chars.saturating_sub(caret_col).max(1));

        let _ = writeln!(self.writer, "{:gutter$} |", "", gutter = gutter + 1);
        let _ = writeln!(
            self.writer,
            " {:>gutter$} | {line_text}",
            label.pos.line,
            gutter = gutter
        );
        let _ = write!(
            self.writer,
            "{:gutter$} | {:caret_col$}",
            "",
            "",
            gutter = gutter + 1,
            caret_col = caret_col
        );
        let (marker, color) = if label.is_primary {
            ('^', colors::ERROR)
        } else {
            ('-', colors::SECONDARY)
        };
        let underline: String = std::iter::repeat(marker).take(width).collect();
        self.write_colored(&format!("{underline} {}", label.message), color);
        let _ = writeln!(self.writer);
    }

    /// Final "aborting due to N previous errors" line.
    pub fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(
                self.writer,
                ": aborting due to {error_count} previous error{}",
                plural_s(error_count)
            );
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests;
