//! Recursive descent parser for Cog.
//!
//! Produces an owned [`Expr`] tree. Binary operators use precedence
//! climbing over [`BinaryOp::binding_power`](cog_ir::BinaryOp::binding_power).
//! Parsing is single pass without backtracking and stops at the first
//! error; there is no recovery.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError};

use cog_ir::{Expr, Token};

/// Parser state.
pub struct Parser {
    cursor: Cursor,
}

impl Parser {
    /// Create a parser over a lexed token stream. A missing trailing `Eof`
    /// is supplied.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse the whole stream into one node.
    ///
    /// A program of exactly one statement yields that statement; anything
    /// else yields a `Sequence` of the top-level statements.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        self.parse_program()
    }
}

/// Lex and parse a source text.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(cog_lexer::lex(source)).parse()
}

#[cfg(test)]
mod tests;
