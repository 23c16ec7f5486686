//! Break, continue, return, and throw.

use pretty_assertions::assert_eq;

use super::{eval, run};
use crate::{compile, CompileErrorKind, Outcome, Value};

fn compile_error(source: &str) -> CompileErrorKind {
    let ast = cog_parse::parse(source).unwrap();
    compile(&ast).unwrap_err().kind
}

#[test]
fn break_outside_loop_is_rejected() {
    assert_eq!(compile_error("break;"), CompileErrorKind::BreakOutsideLoop);
    assert_eq!(
        compile_error("if (1) { continue; }"),
        CompileErrorKind::ContinueOutsideLoop
    );
}

#[test]
fn function_hides_enclosing_loop() {
    assert_eq!(
        compile_error("while (1) { var f = function() { break; }; }"),
        CompileErrorKind::BreakOutsideLoop
    );
}

#[test]
fn return_outside_function_is_rejected() {
    assert_eq!(
        compile_error("return 1;"),
        CompileErrorKind::ReturnOutsideFunction
    );
    assert_eq!(
        compile_error("for (;;) { return; }"),
        CompileErrorKind::ReturnOutsideFunction
    );
}

#[test]
fn duplicate_parameters_are_rejected() {
    assert_eq!(
        compile_error("function f(a, b, a) {}"),
        CompileErrorKind::DuplicateParameter("a".to_string())
    );
}

#[test]
fn compile_error_reports_position_and_code() {
    let ast = cog_parse::parse("var a = 1;\n  break;").unwrap();
    let err = compile(&ast).unwrap_err();
    assert_eq!((err.pos.line, err.pos.column), (2, 3));
    assert_eq!(err.code(), cog_diagnostic::ErrorCode::E2003);
    assert_eq!(err.to_string(), "2:3: `break` outside of a loop");
}

#[test]
fn break_leaves_only_innermost_loop() {
    let source = "
        var hits = 0;
        for (var i = 0; i < 3; i++) {
            for (var j = 0; j < 3; j++) {
                if (j == 1) break;
                hits++;
            }
        }
        hits;
    ";
    assert_eq!(eval(source), Value::Int(3));
}

#[test]
fn return_from_inside_loop() {
    let source = "
        function find(xs, want) {
            for (var i = 0; i < xs.length; i++) {
                if (xs[i] == want) return i;
            }
            return -1;
        }
        find([4, 5, 6], 6) * 10 + find([], 1);
    ";
    assert_eq!(eval(source), Value::Int(19));
}

#[test]
fn function_without_return_gives_undefined() {
    assert_eq!(eval("function f() { 1; } f();"), Value::Undefined);
    assert_eq!(eval("function f() { return; } f();"), Value::Undefined);
}

#[test]
fn break_inside_try_inside_loop() {
    let source = "
        var n = 0;
        while (true) {
            try { n++; if (n == 3) break; } catch (e) {}
        }
        n;
    ";
    assert_eq!(eval(source), Value::Int(3));
}

#[test]
fn rethrow_propagates_past_try() {
    let source = r#"
        var log = "";
        try {
            try { throw "inner"; }
            catch (e) { log = log + "caught " + e; throw e + "!"; }
        } catch (outer) {
            log = log + ", then " + outer;
        }
        log;
    "#;
    assert_eq!(eval(source), Value::from("caught inner, then inner!"));
}

#[test]
fn rethrow_without_outer_try_escapes() {
    let run = run(r#"try { throw 1; } catch (e) { throw e + 1; }"#);
    match run.outcome {
        Outcome::Unhandled(exception) => assert_eq!(exception.payload, Value::Int(2)),
        other => panic!("expected an uncaught exception, got {other:?}"),
    }
}

#[test]
fn throw_unwinds_through_calls() {
    let source = r#"
        function inner() { throw { code: 7 }; }
        function outer() { inner(); return "unreachable"; }
        var got;
        try { outer(); } catch (e) { got = e.code; }
        got;
    "#;
    assert_eq!(eval(source), Value::Int(7));
}

#[test]
fn catch_binding_is_scoped_to_handler() {
    let run = run(r#"try { throw 1; } catch (e) {} e;"#);
    assert_eq!(run.exception().message(), "undefined variable: e");
}

#[test]
fn continue_still_runs_step() {
    let source = "
        var sum = 0;
        for (var i = 0; i < 5; i++) { if (i % 2) continue; sum += i; }
        sum;
    ";
    assert_eq!(eval(source), Value::Int(6));
}
