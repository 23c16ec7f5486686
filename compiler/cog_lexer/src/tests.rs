use cog_ir::LexError;
use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_string())
}

#[test]
fn test_statement() {
    assert_eq!(
        kinds("var x = 1;"),
        vec![
            TokenKind::Var,
            ident("x"),
            TokenKind::Eq,
            TokenKind::Int(1),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        kinds("42 0x2A 0b101 1_000 1. 1.5 1e3 2.5e-3"),
        vec![
            TokenKind::Int(42),
            TokenKind::Int(42),
            TokenKind::Int(5),
            TokenKind::Int(1000),
            TokenKind::Float(1.0),
            TokenKind::Float(1.5),
            TokenKind::Float(1000.0),
            TokenKind::Float(0.0025),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_member_access_on_index_is_not_a_number() {
    assert_eq!(
        kinds("a[0].length"),
        vec![
            ident("a"),
            TokenKind::LBracket,
            TokenKind::Int(0),
            TokenKind::RBracket,
            TokenKind::Dot,
            ident("length"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_subtraction_is_not_an_exponent() {
    assert_eq!(
        kinds("3-1"),
        vec![
            TokenKind::Int(3),
            TokenKind::Minus,
            TokenKind::Int(1),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_sign_after_hex_digit_e_is_an_operator() {
    assert_eq!(
        kinds("0x1e+5 0xE-1"),
        vec![
            TokenKind::Int(0x1e),
            TokenKind::Plus,
            TokenKind::Int(5),
            TokenKind::Int(0xE),
            TokenKind::Minus,
            TokenKind::Int(1),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_exponent_sign_stays_in_decimal_literal() {
    assert_eq!(
        kinds("1e+2 5E-1+1"),
        vec![
            TokenKind::Float(100.0),
            TokenKind::Float(0.5),
            TokenKind::Plus,
            TokenKind::Int(1),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_malformed_numbers() {
    assert_eq!(
        kinds("0x 12ab"),
        vec![
            TokenKind::Error(LexError::MalformedNumber("0x".to_string())),
            TokenKind::Error(LexError::MalformedNumber("12ab".to_string())),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_strings_and_escapes() {
    assert_eq!(
        kinds(r#""a\n\"b\"" 'it\'s' "\x41\u{e9}""#),
        vec![
            TokenKind::Str("a\n\"b\"".to_string()),
            TokenKind::Str("it's".to_string()),
            TokenKind::Str("Aé".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_invalid_escape() {
    assert_eq!(
        kinds(r#""\q""#),
        vec![
            TokenKind::Error(LexError::InvalidEscape(r"\q".to_string())),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_string_stops_at_line_end() {
    let tokens = lex("var s = \"abc\nx;");
    assert_eq!(tokens[3].kind, TokenKind::Error(LexError::UnterminatedString));
    assert_eq!(tokens[3].pos.text("var s = \"abc\nx;"), Some("\"abc"));
    assert_eq!(tokens[4].kind, ident("x"));
    assert_eq!(tokens[4].pos.line, 2);
}

#[test]
fn test_unterminated_string_at_end_of_input() {
    assert_eq!(
        kinds("'abc"),
        vec![TokenKind::Error(LexError::UnterminatedString), TokenKind::Eof]
    );
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("a // line\n/* block\n * still */ b /**/ c"),
        vec![ident("a"), ident("b"), ident("c"), TokenKind::Eof]
    );
}

#[test]
fn test_unterminated_block_comment() {
    assert_eq!(
        kinds("a /* never closed *"),
        vec![
            ident("a"),
            TokenKind::Error(LexError::UnterminatedComment),
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_compound_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= <<= >>= &= |= ^= ++ -- << >> <= >= == != && ||"),
        vec![
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
            TokenKind::PercentEq,
            TokenKind::ShlEq,
            TokenKind::ShrEq,
            TokenKind::AmpEq,
            TokenKind::PipeEq,
            TokenKind::CaretEq,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Shl,
            TokenKind::Shr,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        kinds("function functional $tmp _x array arrays finally"),
        vec![
            TokenKind::Function,
            ident("functional"),
            ident("$tmp"),
            ident("_x"),
            TokenKind::Array,
            ident("arrays"),
            TokenKind::Finally,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let tokens = lex("a # b");
    assert_eq!(
        tokens[1].kind,
        TokenKind::Error(LexError::UnexpectedCharacter('#'))
    );
    assert_eq!((tokens[1].pos.line, tokens[1].pos.column), (1, 3));
    assert_eq!(tokens[2].kind, ident("b"));
}

#[test]
fn test_positions_track_lines_and_columns() {
    let source = "var a;\n  a = 1;";
    let tokens = lex(source);
    let a = &tokens[3];
    assert_eq!((a.pos.line, a.pos.column), (2, 3));
    assert_eq!(a.pos.text(source), Some("a"));
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, ident("x"));
    assert!(lexer.next_token().is_eof());
    assert!(lexer.next_token().is_eof());
    assert_eq!(lex("").len(), 1);
}
