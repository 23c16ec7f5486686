use cog_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::*;
use crate::tests::{compile_source, run};
use crate::{invoke, Budget, Outcome, DEFAULT_MAX_CALL_DEPTH};

const NESTED: &str = r#"function inner() {
    throw "deep";
}
function outer() {
    inner();
}
outer();"#;

#[test]
fn nested_calls_innermost_first() {
    let exception = run(NESTED).exception();
    let trace = StackTrace::capture(&exception.frame, exception.pos);
    assert_eq!(trace.functions(), vec!["inner", "outer", "main"]);
    let lines: Vec<u32> = trace.entries.iter().map(|e| e.pos.line).collect();
    assert_eq!(lines, vec![2, 5, 7]);
}

#[test]
fn blocks_inside_functions_are_skipped() {
    let source = "
        function f(n) {
            for (var i = 0; i < n; i++) {
                if (i == 2) { throw i; }
            }
        }
        f(5);
    ";
    let exception = run(source).exception();
    let trace = StackTrace::capture(&exception.frame, exception.pos);
    assert_eq!(trace.functions(), vec!["f", "main"]);
}

#[test]
fn top_level_throw_has_only_main() {
    let exception = run("throw 1;").exception();
    let trace = StackTrace::capture(&exception.frame, exception.pos);
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.entries[0].to_string(), "at main (1:1)");
}

#[test]
fn entry_without_position_prints_bare_name() {
    let entry = StackEntry {
        function: Arc::from("interrupt 4"),
        pos: Position::DUMMY,
    };
    assert_eq!(entry.to_string(), "at interrupt 4");
}

#[test]
fn unhandled_from_main() {
    let exception = run(NESTED).exception();
    let report = UnhandledException::new(UnhandledException::MAIN, &exception);
    assert_eq!(report.message, "deep");
    assert_eq!(report.code, ErrorCode::E6090);
    let text = report.to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("uncaught exception: deep"));
    assert!(lines.next().is_some_and(|l| l.starts_with("    at inner (2:")));
    assert!(lines.next().is_some_and(|l| l.starts_with("    at outer (5:")));
    assert!(lines.next().is_some_and(|l| l.starts_with("    at main (7:")));
    assert_eq!(lines.next(), None);
}

#[test]
fn runtime_error_keeps_its_code() {
    let exception = run("var a = [1];\nfunction f() { return a[5]; }\nf();").exception();
    let report = UnhandledException::new(UnhandledException::MAIN, &exception);
    assert_eq!(report.code, ErrorCode::E6025);
    assert_eq!(report.stack.functions(), vec!["f", "main"]);
    assert_eq!(report.pos.line, 2);
}

#[test]
fn handler_report_names_interrupt() {
    let program = compile_source("function on() { throw { why: 1 }; }");
    let global = Frame::global();
    program
        .execute(&global, &mut Budget::unlimited(), DEFAULT_MAX_CALL_DEPTH)
        .completed()
        .unwrap();
    let on = global
        .get_local("on")
        .and_then(|value| value.as_function().cloned())
        .unwrap();
    let entry = Frame::entry(&global, "interrupt 3");
    let outcome = invoke(
        &on,
        Vec::new(),
        &entry,
        &mut Budget::unlimited(),
        DEFAULT_MAX_CALL_DEPTH,
    );
    let Outcome::Unhandled(exception) = outcome else {
        panic!("expected an uncaught exception");
    };
    let report = UnhandledException::new(3, &exception);
    assert_eq!(report.stack.functions(), vec!["on", "interrupt 3"]);

    let diagnostic = report.to_diagnostic();
    assert_eq!(diagnostic.message, "uncaught exception: {why: 1}");
    assert_eq!(diagnostic.notes[0], "in handler for interrupt 3");
    assert_eq!(diagnostic.notes.len(), 3);
}
