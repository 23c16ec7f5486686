//! Token cursor for navigating the token stream.

use cog_ir::{Position, Token, TokenKind};
use tracing::trace;

use crate::ParseError;

/// Cursor over a lexed token stream.
///
/// Invariant: the stream is non-empty and ends with `Eof`, and the
/// cursor never moves past that final token.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(Position::DUMMY, |t| t.pos);
            tokens.push(Token::new(TokenKind::Eof, end));
        }
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_pos(&self) -> Position {
        self.current().pos
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> &TokenKind {
        let next = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[next].kind
    }

    /// Position of the most recently consumed token.
    pub fn previous_pos(&self) -> Position {
        self.pos
            .checked_sub(1)
            .map_or(Position::DUMMY, |prev| self.tokens[prev].pos)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token. At `Eof` the cursor stays put.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        trace!(
            pos = self.pos,
            kind = %token.kind.display_name(),
            line = token.pos.line,
            column = token.pos.column,
            "advance"
        );
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                self.current(),
                &format!("`{}`", kind.symbol()),
            ))
        }
    }

    /// Expect a closing delimiter, reporting the opener on end of input.
    pub fn expect_closing(
        &mut self,
        close: &TokenKind,
        open: &TokenKind,
        open_pos: Position,
    ) -> Result<Token, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::unclosed(open, open_pos, self.current_pos()));
        }
        self.expect(close)
    }

    /// Expect an identifier, returning its name and position.
    pub fn expect_ident(&mut self, what: &str) -> Result<(String, Position), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            let pos = self.advance().pos;
            Ok((name, pos))
        } else {
            Err(ParseError::expected_identifier(self.current(), what))
        }
    }
}
