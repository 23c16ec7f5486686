//! Runtime error values.
//!
//! An [`EvalError`] is an unlocated failure: an operator that cannot
//! handle its operands, a bad index, a native function that gave up. The
//! unit that observed it attaches its frame and position and turns it into
//! a script exception, so `try`/`catch` sees every runtime failure as an
//! ordinary thrown string.
//!
//! Factory functions (e.g. [`division_by_zero`]) are the public API; each
//! fills in both the structured [`EvalErrorKind`] and the message.

use std::fmt;

use cog_diagnostic::ErrorCode;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    DivisionByZero,
    /// No branch of an operator accepts these operand kinds.
    CantCast {
        op: &'static str,
        left: &'static str,
        right: Option<&'static str>,
    },
    /// Property access on a value that has no properties, or with a key
    /// of the wrong kind.
    InvalidProperty {
        target: &'static str,
        key: String,
    },
    /// Write to something that cannot be written.
    ReadOnly {
        target: &'static str,
    },
    UndefinedVariable {
        name: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    InvalidLength {
        requested: String,
    },
    RecursionLimit {
        max: usize,
    },
    NotCallable {
        type_name: &'static str,
    },
    /// A host function reported failure or panicked.
    Native {
        function: String,
        message: String,
    },
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::DivisionByZero => ErrorCode::E6001,
            EvalErrorKind::CantCast { .. }
            | EvalErrorKind::InvalidProperty { .. }
            | EvalErrorKind::ReadOnly { .. } => ErrorCode::E6010,
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E6020,
            EvalErrorKind::IndexOutOfBounds { .. } | EvalErrorKind::InvalidLength { .. } => {
                ErrorCode::E6025
            }
            EvalErrorKind::RecursionLimit { .. } => ErrorCode::E6031,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E6032,
            EvalErrorKind::Native { .. } | EvalErrorKind::Custom { .. } => ErrorCode::E6040,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::DivisionByZero => write!(f, "division by zero"),
            EvalErrorKind::CantCast {
                op,
                left,
                right: Some(right),
            } => write!(f, "can't cast types: {left} {op} {right}"),
            EvalErrorKind::CantCast {
                op,
                left,
                right: None,
            } => write!(f, "can't cast types: {op}{left}"),
            EvalErrorKind::InvalidProperty { target, key } => {
                write!(f, "cannot access `{key}` on {target}")
            }
            EvalErrorKind::ReadOnly { target } => write!(f, "cannot assign into {target}"),
            EvalErrorKind::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            EvalErrorKind::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            EvalErrorKind::InvalidLength { requested } => {
                write!(f, "invalid array length: {requested}")
            }
            EvalErrorKind::RecursionLimit { max } => {
                write!(f, "maximum recursion depth of {max} exceeded")
            }
            EvalErrorKind::NotCallable { type_name } => {
                write!(f, "value of type {type_name} is not callable")
            }
            EvalErrorKind::Native { function, message } => write!(f, "{function}: {message}"),
            EvalErrorKind::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built
    /// errors.
    pub message: String,
}

impl EvalError {
    /// Error with just a message (kind `Custom`).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<String> for EvalError {
    fn from(message: String) -> Self {
        EvalError::new(message)
    }
}

impl From<&str> for EvalError {
    fn from(message: &str) -> Self {
        EvalError::new(message)
    }
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Binary operator with unsupported operand kinds.
#[cold]
pub fn cant_cast(op: &'static str, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CantCast {
        op,
        left,
        right: Some(right),
    })
}

/// Unary operator with an unsupported operand kind.
#[cold]
pub fn cant_cast_unary(op: &'static str, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CantCast {
        op,
        left: operand,
        right: None,
    })
}

#[cold]
pub fn invalid_property(target: &'static str, key: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidProperty {
        target,
        key: key.to_string(),
    })
}

#[cold]
pub fn read_only(target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnly { target })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn invalid_length(requested: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLength {
        requested: requested.to_string(),
    })
}

#[cold]
pub fn recursion_limit(max: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { max })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn native_failure(function: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Native {
        function: function.to_string(),
        message: message.into(),
    })
}
