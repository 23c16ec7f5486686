use cog_ir::{LineIndex, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

const SOURCE: &str = "var x;\nif (x) {\n    x = 1 }\n";

fn render(diagnostic: &Diagnostic, mode: ColorMode) -> String {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
        emitter.emit(diagnostic, SOURCE, "demo.cog");
        emitter.flush();
    }
    String::from_utf8(output).unwrap_or_default()
}

fn brace_position() -> cog_ir::Position {
    let offset = SOURCE.rfind('}').unwrap_or(0);
    LineIndex::build(SOURCE).position(SOURCE, Span::from_range(offset..offset + 1))
}

#[test]
fn test_snippet_without_color() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected `;`, found `}`")
        .with_label(brace_position(), "expected `;`")
        .with_note("while parsing a block");

    assert_eq!(
        render(&diag, ColorMode::Never),
        "error[E1001]: expected `;`, found `}`\n\
         \x20 --> demo.cog:3:11\n\
         \x20  |\n\
         \x203 |     x = 1 }\n\
         \x20  |           ^ expected `;`\n\
         \x20  = note: while parsing a block\n\
         \n"
    );
}

#[test]
fn test_color_mode_always_emits_ansi() {
    let diag = Diagnostic::error(ErrorCode::E1001).with_label(brace_position(), "here");
    let text = render(&diag, ColorMode::Always);
    assert!(text.contains("\x1b["));
    assert!(text.contains("E1001"));
}

#[test]
fn test_underline_covers_span() {
    let source = "var total = count + 1;";
    let start = source.find("count").unwrap_or(0);
    let pos = LineIndex::build(source).position(source, Span::from_range(start..start + 5));
    let diag = Diagnostic::error(ErrorCode::E6020).with_label(pos, "not declared");

    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit(&diag, source, "t.cog");
    }
    let text = String::from_utf8(output).unwrap_or_default();
    assert!(text.contains("            ^^^^^ not declared"));
}

#[test]
fn test_dummy_position_has_no_snippet() {
    let diag =
        Diagnostic::error(ErrorCode::E2005).with_label(cog_ir::Position::DUMMY, "synthesized");
    let text = render(&diag, ColorMode::Never);
    assert!(text.contains("= synthesized"));
    assert!(!text.contains(" | "));
}

#[test]
fn test_summary() {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit_summary(0);
        emitter.emit_summary(1);
        emitter.emit_summary(3);
    }
    assert_eq!(
        String::from_utf8(output).unwrap_or_default(),
        "error: aborting due to previous error\nerror: aborting due to 3 previous errors\n"
    );
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
