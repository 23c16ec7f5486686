use cog_ir::{
    AssignOp, BinaryOp, Expr, ExprKind, Position, UnaryOp, UpdateOp, VarDeclarator,
};
use pretty_assertions::assert_eq;

use crate::parse;

fn parse_ok(source: &str) -> Expr {
    match parse(source) {
        Ok(expr) => expr.without_positions(),
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn node(kind: ExprKind) -> Expr {
    Expr::new(kind, Position::DUMMY)
}

fn b(kind: ExprKind) -> Box<Expr> {
    Box::new(node(kind))
}

fn ident(name: &str) -> ExprKind {
    ExprKind::Ident(name.to_string())
}

fn int(n: i64) -> ExprKind {
    ExprKind::Int(n)
}

fn binary(op: BinaryOp, left: ExprKind, right: ExprKind) -> ExprKind {
    ExprKind::Binary {
        op,
        left: b(left),
        right: b(right),
    }
}

#[test]
fn test_empty_program_is_empty_sequence() {
    assert_eq!(parse_ok(""), node(ExprKind::Sequence(vec![])));
    assert_eq!(parse_ok(";;"), node(ExprKind::Sequence(vec![])));
}

#[test]
fn test_single_statement_is_returned_as_is() {
    assert_eq!(parse_ok("x;"), node(ident("x")));
}

#[test]
fn test_multiple_statements_form_a_sequence() {
    assert_eq!(
        parse_ok("x; y;"),
        node(ExprKind::Sequence(vec![node(ident("x")), node(ident("y"))]))
    );
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        parse_ok("1 + 2 * 3;"),
        node(binary(
            BinaryOp::Add,
            int(1),
            binary(BinaryOp::Mul, int(2), int(3))
        ))
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        parse_ok("10 - 4 - 3;"),
        node(binary(
            BinaryOp::Sub,
            binary(BinaryOp::Sub, int(10), int(4)),
            int(3)
        ))
    );
}

#[test]
fn test_precedence_ladder() {
    // || < && < | < ^ < & < == < relational < shift < additive
    assert_eq!(
        parse_ok("a || b && c | d ^ e & f == g < h << i + j;"),
        node(binary(
            BinaryOp::Or,
            ident("a"),
            binary(
                BinaryOp::And,
                ident("b"),
                binary(
                    BinaryOp::BitOr,
                    ident("c"),
                    binary(
                        BinaryOp::BitXor,
                        ident("d"),
                        binary(
                            BinaryOp::BitAnd,
                            ident("e"),
                            binary(
                                BinaryOp::Eq,
                                ident("f"),
                                binary(
                                    BinaryOp::Lt,
                                    ident("g"),
                                    binary(
                                        BinaryOp::Shl,
                                        ident("h"),
                                        binary(BinaryOp::Add, ident("i"), ident("j"))
                                    )
                                )
                            )
                        )
                    )
                )
            )
        ))
    );
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(
        parse_ok("a = b += 1;"),
        node(ExprKind::Assign {
            op: AssignOp::Set,
            target: b(ident("a")),
            value: b(ExprKind::Assign {
                op: AssignOp::Compound(BinaryOp::Add),
                target: b(ident("b")),
                value: b(int(1)),
            }),
        })
    );
}

#[test]
fn test_comma_binds_loosest() {
    assert_eq!(
        parse_ok("a = 1, b;"),
        node(ExprKind::Sequence(vec![
            node(ExprKind::Assign {
                op: AssignOp::Set,
                target: b(ident("a")),
                value: b(int(1)),
            }),
            node(ident("b")),
        ]))
    );
}

#[test]
fn test_unary_and_updates() {
    assert_eq!(
        parse_ok("-x++;"),
        node(ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: b(ExprKind::Update {
                op: UpdateOp::Increment,
                prefix: false,
                target: b(ident("x")),
            }),
        })
    );
    assert_eq!(
        parse_ok("--a[0];"),
        node(ExprKind::Update {
            op: UpdateOp::Decrement,
            prefix: true,
            target: b(ExprKind::Index {
                target: b(ident("a")),
                index: b(int(0)),
            }),
        })
    );
}

#[test]
fn test_postfix_chain() {
    assert_eq!(
        parse_ok("a.b[1](2, 3);"),
        node(ExprKind::Call {
            callee: b(ExprKind::Index {
                target: b(ExprKind::Member {
                    target: b(ident("a")),
                    name: "b".to_string(),
                }),
                index: b(int(1)),
            }),
            args: vec![node(int(2)), node(int(3))],
        })
    );
}

#[test]
fn test_keyword_member_names() {
    assert_eq!(
        parse_ok("x.if;"),
        node(ExprKind::Member {
            target: b(ident("x")),
            name: "if".to_string(),
        })
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        parse_ok("[1, 2.5, 'a', true, false, null, undefined,];"),
        node(ExprKind::Array(vec![
            node(int(1)),
            node(ExprKind::Float(2.5)),
            node(ExprKind::Str("a".to_string())),
            node(ExprKind::Bool(true)),
            node(ExprKind::Bool(false)),
            node(ExprKind::Null),
            node(ExprKind::Undefined),
        ]))
    );
}

#[test]
fn test_dictionary_literal() {
    assert_eq!(
        parse_ok("x = {a: 1, \"b c\": 2, for: 3};"),
        node(ExprKind::Assign {
            op: AssignOp::Set,
            target: b(ident("x")),
            value: b(ExprKind::Dict(vec![
                ("a".to_string(), node(int(1))),
                ("b c".to_string(), node(int(2))),
                ("for".to_string(), node(int(3))),
            ])),
        })
    );
}

#[test]
fn test_array_allocation() {
    assert_eq!(
        parse_ok("array(n + 1);"),
        node(ExprKind::ArrayAlloc(b(binary(
            BinaryOp::Add,
            ident("n"),
            int(1)
        ))))
    );
}

#[test]
fn test_var_declaration() {
    assert_eq!(
        parse_ok("var a = 1, b;"),
        node(ExprKind::VarDecl(vec![
            VarDeclarator {
                name: "a".to_string(),
                init: Some(node(int(1))),
                pos: Position::DUMMY,
            },
            VarDeclarator {
                name: "b".to_string(),
                init: None,
                pos: Position::DUMMY,
            },
        ]))
    );
}

#[test]
fn test_function_declaration_needs_no_semicolon() {
    assert_eq!(
        parse_ok("function add(a, b) { return a + b; } add(1, 2);"),
        node(ExprKind::Sequence(vec![
            node(ExprKind::Function {
                name: Some("add".to_string()),
                params: vec!["a".to_string(), "b".to_string()],
                body: b(ExprKind::Block(vec![node(ExprKind::Return(Some(b(
                    binary(BinaryOp::Add, ident("a"), ident("b"))
                ))))])),
            }),
            node(ExprKind::Call {
                callee: b(ident("add")),
                args: vec![node(int(1)), node(int(2))],
            }),
        ]))
    );
}

#[test]
fn test_anonymous_function_literal() {
    assert_eq!(
        parse_ok("f = function() {};"),
        node(ExprKind::Assign {
            op: AssignOp::Set,
            target: b(ident("f")),
            value: b(ExprKind::Function {
                name: None,
                params: vec![],
                body: b(ExprKind::Block(vec![])),
            }),
        })
    );
}

#[test]
fn test_while_lowers_to_loop() {
    assert_eq!(
        parse_ok("while (x) break;"),
        node(ExprKind::Loop {
            init: None,
            cond: Some(b(ident("x"))),
            step: None,
            body: b(ExprKind::Break),
        })
    );
}

#[test]
fn test_for_lowers_to_loop() {
    assert_eq!(
        parse_ok("for (var i = 0; i < 3; i++) continue;"),
        node(ExprKind::Loop {
            init: Some(b(ExprKind::VarDecl(vec![VarDeclarator {
                name: "i".to_string(),
                init: Some(node(int(0))),
                pos: Position::DUMMY,
            }]))),
            cond: Some(b(binary(BinaryOp::Lt, ident("i"), int(3)))),
            step: Some(b(ExprKind::Update {
                op: UpdateOp::Increment,
                prefix: false,
                target: b(ident("i")),
            })),
            body: b(ExprKind::Continue),
        })
    );
    assert_eq!(
        parse_ok("for (;;) {}"),
        node(ExprKind::Loop {
            init: None,
            cond: None,
            step: None,
            body: b(ExprKind::Block(vec![])),
        })
    );
}

#[test]
fn test_if_else_chain() {
    assert_eq!(
        parse_ok("if (a) x; else if (b) y; else z;"),
        node(ExprKind::If {
            cond: b(ident("a")),
            then_branch: b(ident("x")),
            else_branch: Some(b(ExprKind::If {
                cond: b(ident("b")),
                then_branch: b(ident("y")),
                else_branch: Some(b(ident("z"))),
            })),
        })
    );
}

#[test]
fn test_empty_body_statement() {
    assert_eq!(
        parse_ok("while (f());"),
        node(ExprKind::Loop {
            init: None,
            cond: Some(b(ExprKind::Call {
                callee: b(ident("f")),
                args: vec![],
            })),
            step: None,
            body: b(ExprKind::Block(vec![])),
        })
    );
}

#[test]
fn test_try_catch_and_throw() {
    assert_eq!(
        parse_ok("try { throw 1; } catch (e) { return; }"),
        node(ExprKind::Try {
            body: b(ExprKind::Block(vec![node(ExprKind::Throw(b(int(1))))])),
            catch_name: "e".to_string(),
            handler: b(ExprKind::Block(vec![node(ExprKind::Return(None))])),
        })
    );
}

#[test]
fn test_parentheses_leave_no_node() {
    assert_eq!(parse_ok("((x));"), node(ident("x")));
}

#[test]
fn test_positions_cover_the_construct() {
    let source = "var total = 1;\nif (total) { total += 2; }";
    let program = match parse(source) {
        Ok(program) => program,
        Err(err) => panic!("{err}"),
    };
    let ExprKind::Sequence(items) = &program.kind else {
        panic!("expected a sequence, got {program:?}");
    };
    assert_eq!(items[0].pos.text(source), Some("var total = 1"));
    assert_eq!((items[1].pos.line, items[1].pos.column), (2, 1));
    assert_eq!(items[1].pos.text(source), Some("if (total) { total += 2; }"));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_ok(&source), node(int(1)));

    let negations = format!("{}x;", "- ".repeat(2_000));
    assert!(parse(&negations).is_ok());
}
