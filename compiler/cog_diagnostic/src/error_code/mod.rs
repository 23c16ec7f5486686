use std::fmt;

/// Error codes for all Cog diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Compile errors
/// - E6xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character in source
    E0002,
    /// Malformed number literal
    E0003,
    /// Invalid escape sequence
    E0004,
    /// Unterminated block comment
    E0005,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Invalid assignment target
    E1005,
    /// `finally` is not supported
    E1006,

    // Compile Errors (E2xxx)
    /// Invalid assignment target
    E2001,
    /// Malformed parameter list
    E2002,
    /// `break` outside a loop
    E2003,
    /// `continue` outside a loop
    E2004,
    /// `return` outside a function
    E2005,

    // Runtime Errors (E6xxx)
    /// Division by zero
    E6001,
    /// Operand types not supported by operator
    E6010,
    /// Undefined variable
    E6020,
    /// Index out of bounds
    E6025,
    /// Recursion limit exceeded
    E6031,
    /// Value is not callable
    E6032,
    /// Native function failed
    E6040,
    /// Uncaught script exception
    E6090,
    /// Execution terminated by the host
    E6091,
}

impl ErrorCode {
    /// All variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E6001,
        ErrorCode::E6010,
        ErrorCode::E6020,
        ErrorCode::E6025,
        ErrorCode::E6031,
        ErrorCode::E6032,
        ErrorCode::E6040,
        ErrorCode::E6090,
        ErrorCode::E6091,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6020 => "E6020",
            ErrorCode::E6025 => "E6025",
            ErrorCode::E6031 => "E6031",
            ErrorCode::E6032 => "E6032",
            ErrorCode::E6040 => "E6040",
            ErrorCode::E6090 => "E6090",
            ErrorCode::E6091 => "E6091",
        }
    }

    /// Default message for a diagnostic built from just a code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unexpected character",
            ErrorCode::E0003 => "malformed number literal",
            ErrorCode::E0004 => "invalid escape sequence",
            ErrorCode::E0005 => "unterminated block comment",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 | ErrorCode::E2001 => "invalid assignment target",
            ErrorCode::E1006 => "`finally` is not supported",
            ErrorCode::E2002 => "malformed parameter list",
            ErrorCode::E2003 => "`break` outside of a loop",
            ErrorCode::E2004 => "`continue` outside of a loop",
            ErrorCode::E2005 => "`return` outside of a function",
            ErrorCode::E6001 => "division by zero",
            ErrorCode::E6010 => "operand types not supported by operator",
            ErrorCode::E6020 => "undefined variable",
            ErrorCode::E6025 => "index out of bounds",
            ErrorCode::E6031 => "recursion limit exceeded",
            ErrorCode::E6032 => "value is not callable",
            ErrorCode::E6040 => "native function failed",
            ErrorCode::E6090 => "uncaught exception",
            ErrorCode::E6091 => "execution terminated",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_compile_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
