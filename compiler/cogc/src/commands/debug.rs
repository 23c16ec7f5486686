//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write as _;

use cog_diagnostic::Diagnostic;
use cog_ir::{print_program, TokenKind};
use cog_parse::ParseError;

use super::{read_file, report};

/// Token listing, one `kind @ line:column` per line, plus a diagnostic
/// for every lexical error.
pub fn lex_source(source: &str) -> (String, Vec<Diagnostic>) {
    let tokens = cog_lexer::lex(source);
    let mut listing = String::new();
    let mut errors = Vec::new();
    for token in &tokens {
        let _ = writeln!(listing, "{} @ {}", token.kind, token.pos);
        if let TokenKind::Error(err) = &token.kind {
            errors.push(ParseError::lexical(err, token.pos).to_diagnostic());
        }
    }
    (listing, errors)
}

/// Canonical text of the parsed program.
pub fn parse_source(source: &str) -> Result<String, Diagnostic> {
    cog_parse::parse(source)
        .map(|ast| print_program(&ast))
        .map_err(|err| err.to_diagnostic())
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let (listing, errors) = lex_source(&content);
    println!("Tokens for '{path}':");
    for line in listing.lines() {
        println!("  {line}");
    }
    if !errors.is_empty() {
        report(&errors, &content, path);
        std::process::exit(1);
    }
}

/// Parse a file and print its canonical form.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    match parse_source(&content) {
        Ok(text) => print!("{text}"),
        Err(diagnostic) => {
            report(&[diagnostic], &content, path);
            std::process::exit(1);
        }
    }
}
