//! Tokens produced by the lexer.

use std::fmt;

use crate::Position;

/// What went wrong while lexing one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    UnexpectedCharacter(char),
    /// The whole numeric-looking run, e.g. `0x` or `12ab`.
    MalformedNumber(String),
    UnterminatedString,
    UnterminatedComment,
    /// The escape as written, e.g. `\q`.
    InvalidEscape(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter(c) => write!(f, "unexpected character `{c}`"),
            LexError::MalformedNumber(text) => write!(f, "malformed number literal `{text}`"),
            LexError::UnterminatedString => write!(f, "unterminated string literal"),
            LexError::UnterminatedComment => write!(f, "unterminated block comment"),
            LexError::InvalidEscape(text) => write!(f, "invalid escape sequence `{text}`"),
        }
    }
}

/// A positioned token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Position) -> Self {
        Token { kind, pos }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Token kinds.
///
/// Literal payloads are carried inline. Lexical failures are ordinary
/// tokens of kind [`TokenKind::Error`] rather than a separate error path,
/// so the parser reports them with the same position machinery.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f32),
    Str(String),
    Ident(String),

    // Keywords
    Var,
    Function,
    Return,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Throw,
    Try,
    Catch,
    Finally,
    True,
    False,
    Null,
    Undefined,
    Array,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    PlusPlus,
    MinusMinus,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    AmpEq,
    PipeEq,
    CaretEq,

    /// End of input. Repeats once reached.
    Eof,
    /// Lexical error; the token's position covers the offending text.
    Error(LexError),
}

impl TokenKind {
    /// Keyword lookup for an identifier-shaped slice.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "var" => TokenKind::Var,
            "function" => TokenKind::Function,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "throw" => TokenKind::Throw,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "finally" => TokenKind::Finally,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "undefined" => TokenKind::Undefined,
            "array" => TokenKind::Array,
            _ => return None,
        };
        Some(kind)
    }

    /// Human-readable name used in parser messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(f) => format!("float `{f}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Error(err) => format!("invalid token ({err})"),
            other => format!("`{}`", other.symbol()),
        }
    }

    /// Source spelling of fixed tokens; empty for literal kinds.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Var => "var",
            TokenKind::Function => "function",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Throw => "throw",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Undefined => "undefined",
            TokenKind::Array => "array",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str(_)
            | TokenKind::Ident(_)
            | TokenKind::Eof
            | TokenKind::Error(_) => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "Int({n})"),
            TokenKind::Float(x) => write!(f, "Float({x})"),
            TokenKind::Str(s) => write!(f, "Str({s:?})"),
            TokenKind::Ident(name) => write!(f, "Ident({name})"),
            TokenKind::Eof => write!(f, "Eof"),
            TokenKind::Error(err) => write!(f, "Error({err})"),
            other => write!(f, "{}", other.symbol()),
        }
    }
}
