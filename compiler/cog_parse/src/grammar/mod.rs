//! Grammar rules, one file per layer.
//!
//! - `stmt`: program, statements, blocks
//! - `expr`: comma, assignment, binary, unary
//! - `postfix`: calls, indexing, member access, postfix updates
//! - `primary`: literals, identifiers, grouping, function literals

mod expr;
mod postfix;
mod primary;
mod stmt;

use cog_ir::TokenKind;

/// Spelling of a keyword token, so keywords can serve as member names and
/// dictionary keys.
fn keyword_name(kind: &TokenKind) -> Option<&'static str> {
    let symbol = kind.symbol();
    TokenKind::keyword(symbol).map(|_| symbol)
}
