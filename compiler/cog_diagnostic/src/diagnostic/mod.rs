use std::fmt;

use cog_ir::Position;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled source location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub pos: Position,
    pub message: String,
    /// Primary labels point at the error itself; secondary ones add context.
    pub is_primary: bool,
}

/// A rich diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create an error diagnostic whose message defaults to the code's
    /// description.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: code.description().to_string(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(code)
        }
    }

    #[must_use]
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    #[must_use]
    pub fn with_label(mut self, pos: Position, msg: impl Into<String>) -> Self {
        self.labels.push(Label {
            pos,
            message: msg.into(),
            is_primary: true,
        });
        self
    }

    #[must_use]
    pub fn with_secondary_label(mut self, pos: Position, msg: impl Into<String>) -> Self {
        self.labels.push(Label {
            pos,
            message: msg.into(),
            is_primary: false,
        });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Position of the first primary label, if any.
    pub fn primary_position(&self) -> Option<Position> {
        self.labels
            .iter()
            .find(|label| label.is_primary)
            .map(|label| label.pos)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(pos) = self.primary_position() {
            write!(f, " at {pos}")?;
        }
        Ok(())
    }
}
