use cog_diagnostic::ErrorCode;
use cog_ir::{AssignOp, Expr, ExprKind, Position};
use pretty_assertions::assert_eq;

use super::*;
use crate::scope::{BlockId, BlockKind};

fn parse_and_compile(source: &str) -> Result<Program, CompileError> {
    compile(&cog_parse::parse(source).unwrap())
}

fn node(kind: ExprKind) -> Expr {
    Expr::new(kind, Position::DUMMY)
}

#[test]
fn top_level_sequence_becomes_main() {
    let program = parse_and_compile("var a = 1; a; a + 1;").unwrap();
    assert_eq!(program.units().len(), 3);
    assert_eq!(program.units()[0].label(), "var");
}

#[test]
fn single_statement_is_one_unit() {
    let program = parse_and_compile("1 + 2;").unwrap();
    assert_eq!(program.units().len(), 1);
    assert_eq!(program.units()[0].label(), "binary");
}

#[test]
fn block_tree_follows_nesting() {
    let program =
        parse_and_compile("function f() { while (1) { try { break; } catch (e) {} } }").unwrap();
    let tree = program.scopes();
    let ids: Vec<BlockId> = tree.ids().collect();
    let kinds: Vec<_> = ids.iter().filter_map(|&id| tree.kind(id)).collect();
    // root, function body, loop, try body, catch handler
    assert_eq!(
        kinds,
        vec![
            BlockKind::Function,
            BlockKind::Function,
            BlockKind::Loop,
            BlockKind::Try,
            BlockKind::Plain,
        ]
    );
    let try_block = ids[3];
    assert!(tree.in_loop(try_block));
    assert!(tree.in_function(try_block));
    assert_eq!(tree.enclosing_function(try_block), ids[1]);
}

#[test]
fn invalid_assignment_target_from_built_tree() {
    // The parser never produces this; hosts building trees directly can.
    let ast = node(ExprKind::Assign {
        op: AssignOp::Set,
        target: Box::new(node(ExprKind::Int(1))),
        value: Box::new(node(ExprKind::Int(2))),
    });
    let err = compile(&ast).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::InvalidAssignmentTarget("int"));
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn malformed_parameter_from_built_tree() {
    let function = |param: &str| {
        node(ExprKind::Function {
            name: None,
            params: vec![param.to_string()],
            body: Box::new(node(ExprKind::Block(Vec::new()))),
        })
    };
    assert_eq!(
        compile(&function("1x")).unwrap_err().kind,
        CompileErrorKind::MalformedParameter("1x".to_string())
    );
    assert_eq!(
        compile(&function("while")).unwrap_err().kind,
        CompileErrorKind::MalformedParameter("while".to_string())
    );
    assert!(compile(&function("$ok_1")).is_ok());
}

#[test]
fn first_error_wins() {
    let err = parse_and_compile("break; continue;").unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::BreakOutsideLoop);
}

#[test]
fn diagnostics_carry_label_and_note() {
    let err = parse_and_compile("function f() {}\nreturn 2;").unwrap_err();
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E2005);
    assert_eq!(diagnostic.message, "`return` outside of a function");
    assert_eq!(diagnostic.primary_position().map(|p| p.line), Some(2));
    assert_eq!(diagnostic.notes, vec!["top-level code is not a function"]);
}

#[test]
fn return_allowed_in_nested_function_inside_loop() {
    assert!(parse_and_compile("for (;;) { var f = function() { return 1; }; break; }").is_ok());
}
