//! Raw Token Definition
//!
//! The logos-derived tokenizer. Literal payloads that need validation
//! (numbers) are decoded in callbacks; string bodies are unescaped later
//! in [`crate::convert`] so escape errors can carry the offending text.

use logos::Logos;

use crate::number::{scan_number, Number};

/// Failure reported by the logos state machine itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum RawError {
    /// No pattern matched.
    #[default]
    Unexpected,
    MalformedNumber,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    BlockComment,

    /// A block comment that runs to end of input. Every prefix of a
    /// complete comment lands here, so the longest match always picks the
    /// complete form when one exists.
    #[regex(r"/\*([^*]|\*+[^*/])*\**")]
    UnterminatedComment,

    // Keywords
    #[token("var")]
    Var,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("throw")]
    Throw,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("undefined")]
    Undefined,
    #[token("array")]
    Array,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // Assignment
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,

    /// Any numeric-looking run: digits, an optional fraction, an optional
    /// exponent (the only place a sign may appear), then any trailing
    /// letters, digits, `_`, or `.`. Validated by [`scan_number`] so `0x`,
    /// `12ab`, and `1.2.3` become one malformed-number error rather than a
    /// number followed by an identifier. A sign after a hex digit `e` ends
    /// the literal: `0x1e+5` is `0x1e + 5`.
    #[regex(
        r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]*)?[0-9a-zA-Z_.]*",
        |lex| scan_number(lex.slice())
    )]
    Number(Number),

    // String literals. A body cannot contain a raw newline.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    SingleQuoted,

    // Opening quote without a matching close on the same line.
    #[regex(r#""([^"\\\n]|\\.)*\\?"#)]
    #[regex(r"'([^'\\\n]|\\.)*\\?")]
    UnterminatedString,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
}
