//! Raw token to `TokenKind` conversion.

use cog_ir::{LexError, TokenKind};

use crate::escape::unescape;
use crate::number::Number;
use crate::raw_token::{RawError, RawToken};

pub(crate) fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        // Literals
        RawToken::Number(Number::Int(n)) => TokenKind::Int(n),
        RawToken::Number(Number::Float(f)) => TokenKind::Float(f),
        RawToken::DoubleQuoted | RawToken::SingleQuoted => {
            let body = &slice[1..slice.len() - 1];
            match unescape(body) {
                Ok(text) => TokenKind::Str(text),
                Err(escape) => TokenKind::Error(LexError::InvalidEscape(escape)),
            }
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),
        RawToken::UnterminatedString => TokenKind::Error(LexError::UnterminatedString),
        RawToken::UnterminatedComment => TokenKind::Error(LexError::UnterminatedComment),
        // Skipped by logos; never produced.
        RawToken::LineComment | RawToken::BlockComment => {
            TokenKind::Error(LexError::UnterminatedComment)
        }

        // Keywords
        RawToken::Var => TokenKind::Var,
        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Finally => TokenKind::Finally,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Undefined => TokenKind::Undefined,
        RawToken::Array => TokenKind::Array,

        // Punctuation
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,

        // Operators
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,

        // Assignment
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::ShlEq => TokenKind::ShlEq,
        RawToken::ShrEq => TokenKind::ShrEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
    }
}

/// Turn a logos failure into an error token.
pub(crate) fn convert_error(err: &RawError, slice: &str) -> TokenKind {
    let lex_error = match err {
        RawError::MalformedNumber => LexError::MalformedNumber(slice.to_string()),
        RawError::Unexpected => {
            LexError::UnexpectedCharacter(slice.chars().next().unwrap_or('\0'))
        }
    };
    TokenKind::Error(lex_error)
}
