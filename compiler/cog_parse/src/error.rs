//! Parse error types.
//!
//! A [`ParseError`] carries an error code, a message, the offending
//! position, and an [`ErrorContext`] naming the construct being parsed,
//! for "while parsing a for loop" style messages.

use std::fmt;

use cog_diagnostic::{Diagnostic, ErrorCode};
use cog_ir::{LexError, Position, Token, TokenKind};

/// What was being parsed when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    Block,
    IfStatement,
    WhileLoop,
    ForLoop,
    VarDeclaration,
    FunctionDefinition,
    FunctionParams,
    TryCatch,
    CallArguments,
    IndexExpression,
    ArrayLiteral,
    ArrayAllocation,
    DictLiteral,
    Parenthesized,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::Block => "a block",
            Self::IfStatement => "an if statement",
            Self::WhileLoop => "a while loop",
            Self::ForLoop => "a for loop",
            Self::VarDeclaration => "a var declaration",
            Self::FunctionDefinition => "a function",
            Self::FunctionParams => "function parameters",
            Self::TryCatch => "a try/catch statement",
            Self::CallArguments => "call arguments",
            Self::IndexExpression => "an index expression",
            Self::ArrayLiteral => "an array literal",
            Self::ArrayAllocation => "an array allocation",
            Self::DictLiteral => "a dictionary literal",
            Self::Parenthesized => "a parenthesized expression",
        }
    }
}

/// Parser error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub pos: Position,
    /// Innermost construct being parsed, if known.
    pub context: Option<ErrorContext>,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, pos: Position) -> Self {
        ParseError {
            code,
            message: message.into(),
            pos,
            context: None,
            help: Vec::new(),
        }
    }

    /// Error for a lexical error token reaching the parser.
    #[cold]
    pub fn lexical(err: &LexError, pos: Position) -> Self {
        let code = match err {
            LexError::UnterminatedString => ErrorCode::E0001,
            LexError::UnexpectedCharacter(_) => ErrorCode::E0002,
            LexError::MalformedNumber(_) => ErrorCode::E0003,
            LexError::InvalidEscape(_) => ErrorCode::E0004,
            LexError::UnterminatedComment => ErrorCode::E0005,
        };
        ParseError::new(code, err.to_string(), pos)
    }

    /// `expected X, found Y`. Error tokens report their lexical error instead.
    #[cold]
    pub fn unexpected(found: &Token, expected: &str) -> Self {
        if let TokenKind::Error(err) = &found.kind {
            return ParseError::lexical(err, found.pos);
        }
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found {}", found.kind.display_name()),
            found.pos,
        )
    }

    #[cold]
    pub fn expected_expression(found: &Token) -> Self {
        if let TokenKind::Error(err) = &found.kind {
            return ParseError::lexical(err, found.pos);
        }
        ParseError::new(
            ErrorCode::E1002,
            format!("expected expression, found {}", found.kind.display_name()),
            found.pos,
        )
    }

    #[cold]
    pub fn expected_identifier(found: &Token, what: &str) -> Self {
        if let TokenKind::Error(err) = &found.kind {
            return ParseError::lexical(err, found.pos);
        }
        ParseError::new(
            ErrorCode::E1004,
            format!("expected {what}, found {}", found.kind.display_name()),
            found.pos,
        )
    }

    /// End of input reached before a closing delimiter.
    #[cold]
    pub fn unclosed(open: &TokenKind, open_pos: Position, at: Position) -> Self {
        ParseError::new(
            ErrorCode::E1003,
            format!("unclosed `{}`", open.symbol()),
            at,
        )
        .with_help(format!("the `{}` was opened at {open_pos}", open.symbol()))
    }

    #[cold]
    pub fn invalid_assignment_target(what: &str, pos: Position) -> Self {
        ParseError::new(
            ErrorCode::E1005,
            format!("invalid assignment target: cannot assign to {what}"),
            pos,
        )
        .with_help("only variables, `a[i]`, and `a.name` can be assigned")
    }

    #[cold]
    pub fn finally_unsupported(pos: Position) -> Self {
        ParseError::new(ErrorCode::E1006, "`finally` blocks are not supported", pos)
            .with_help("move cleanup code after the try/catch statement")
    }

    /// Attach context unless an inner rule already did.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.pos, "here");
        if let Some(context) = self.context {
            diag = diag.with_note(format!("while parsing {}", context.description()));
        }
        for help in &self.help {
            diag = diag.with_note(help);
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)?;
        if let Some(context) = self.context {
            write!(f, " (while parsing {})", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
