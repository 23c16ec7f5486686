//! Compile-time errors.

use cog_diagnostic::{Diagnostic, ErrorCode};
use cog_ir::Position;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileErrorKind {
    #[error("invalid assignment target: cannot assign to {0}")]
    InvalidAssignmentTarget(&'static str),
    #[error("malformed parameter list: `{0}` is not a valid parameter name")]
    MalformedParameter(String),
    #[error("malformed parameter list: duplicate parameter `{0}`")]
    DuplicateParameter(String),
    #[error("`break` outside of a loop")]
    BreakOutsideLoop,
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop,
    #[error("`return` outside of a function")]
    ReturnOutsideFunction,
}

impl CompileErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileErrorKind::InvalidAssignmentTarget(_) => ErrorCode::E2001,
            CompileErrorKind::MalformedParameter(_) | CompileErrorKind::DuplicateParameter(_) => {
                ErrorCode::E2002
            }
            CompileErrorKind::BreakOutsideLoop => ErrorCode::E2003,
            CompileErrorKind::ContinueOutsideLoop => ErrorCode::E2004,
            CompileErrorKind::ReturnOutsideFunction => ErrorCode::E2005,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{pos}: {kind}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub pos: Position,
}

impl CompileError {
    #[cold]
    pub fn new(kind: CompileErrorKind, pos: Position) -> Self {
        CompileError { kind, pos }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.pos, "here");
        match self.kind {
            CompileErrorKind::BreakOutsideLoop | CompileErrorKind::ContinueOutsideLoop => {
                diagnostic.with_note("a function body hides the loops around it")
            }
            CompileErrorKind::ReturnOutsideFunction => {
                diagnostic.with_note("top-level code is not a function")
            }
            _ => diagnostic,
        }
    }
}
