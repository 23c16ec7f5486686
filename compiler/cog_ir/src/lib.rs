//! Cog IR - shared data structures for the Cog scripting language.
//!
//! This crate contains the types every later phase agrees on:
//! - Spans and positions for source locations
//! - Tokens produced by the lexer
//! - AST nodes produced by the parser
//! - The canonical printer that renders an AST back to source text
//!
//! Nodes own their children (`Box<Expr>`). The tree is immutable after
//! parsing; the compiler only reads it and keeps nothing but positions.

mod position;
mod span;
mod token;

pub mod ast;
pub mod printer;

pub use ast::{AssignOp, BinaryOp, Expr, ExprKind, UnaryOp, UpdateOp, VarDeclarator};
pub use position::{LineIndex, Position};
pub use printer::{print_expr, print_program};
pub use span::Span;
pub use token::{LexError, Token, TokenKind};
