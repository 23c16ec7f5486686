//! Lexer for Cog using logos.
//!
//! [`Lexer::next_token`] pulls one positioned token at a time;
//! [`lex`] collects the whole stream. Lexical problems never abort: they
//! come back as [`TokenKind::Error`] tokens and the parser decides what to
//! do with them. After the end of input the lexer keeps returning `Eof`.

mod convert;
mod escape;
mod number;
mod raw_token;

use cog_ir::{LexError, LineIndex, Span, Token, TokenKind};
use logos::Logos;

use convert::{convert_error, convert_token};
use raw_token::RawToken;

/// Streaming lexer over one source text.
pub struct Lexer<'src> {
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    lines: LineIndex,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            raw: RawToken::lexer(source),
            lines: LineIndex::build(source),
            finished: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Advance by one token.
    pub fn next_token(&mut self) -> Token {
        if self.finished {
            return self.eof();
        }
        let Some(result) = self.raw.next() else {
            self.finished = true;
            return self.eof();
        };

        let mut span = Span::from_range(self.raw.span());
        let slice = self.raw.slice();
        let kind = match result {
            Ok(raw) => convert_token(raw, slice),
            Err(err) => {
                let kind = convert_error(&err, slice);
                if let TokenKind::Error(LexError::UnexpectedCharacter(c)) = &kind {
                    span = Span::new(span.start, span.start + len_u32(*c));
                }
                kind
            }
        };
        Token::new(kind, self.lines.position(self.source, span))
    }

    fn eof(&self) -> Token {
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        Token::new(
            TokenKind::Eof,
            self.lines.position(self.source, Span::point(end)),
        )
    }
}

fn len_u32(c: char) -> u32 {
    // A char is at most four bytes.
    u32::try_from(c.len_utf8()).unwrap_or(4)
}

/// Lex a whole source. The result always ends with exactly one `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests;
