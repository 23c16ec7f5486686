//! Printing a tree and parsing the text yields the same tree.

use cog_ir::{
    print_program, AssignOp, BinaryOp, Expr, ExprKind, Position, TokenKind, UnaryOp, UpdateOp,
    VarDeclarator,
};
use proptest::prelude::*;

use crate::parse;

fn node(kind: ExprKind) -> Expr {
    Expr::new(kind, Position::DUMMY)
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,5}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| TokenKind::keyword(s).is_none())
}

fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::Shl,
        BinaryOp::Shr,
    ])
}

fn assign_op_strategy() -> impl Strategy<Value = AssignOp> {
    prop::sample::select(vec![
        AssignOp::Set,
        AssignOp::Compound(BinaryOp::Add),
        AssignOp::Compound(BinaryOp::Sub),
        AssignOp::Compound(BinaryOp::Mul),
        AssignOp::Compound(BinaryOp::Div),
        AssignOp::Compound(BinaryOp::Mod),
        AssignOp::Compound(BinaryOp::Shl),
        AssignOp::Compound(BinaryOp::Shr),
        AssignOp::Compound(BinaryOp::BitAnd),
        AssignOp::Compound(BinaryOp::BitOr),
        AssignOp::Compound(BinaryOp::BitXor),
    ])
}

fn leaf_strategy() -> BoxedStrategy<Expr> {
    prop_oneof![
        Just(ExprKind::Null),
        Just(ExprKind::Undefined),
        any::<bool>().prop_map(ExprKind::Bool),
        (0..=i64::MAX).prop_map(ExprKind::Int),
        // Quarters are exact in f32 and print without an exponent.
        (0u16..4000).prop_map(|n| ExprKind::Float(f32::from(n) / 4.0)),
        "[ -~]{0,8}".prop_map(ExprKind::Str),
        name_strategy().prop_map(ExprKind::Ident),
    ]
    .prop_map(node)
    .boxed()
}

/// Something that may appear left of `=`.
fn target_strategy(inner: BoxedStrategy<Expr>) -> BoxedStrategy<Expr> {
    prop_oneof![
        name_strategy().prop_map(|name| node(ExprKind::Ident(name))),
        (inner.clone(), inner.clone()).prop_map(|(target, index)| node(ExprKind::Index {
            target: Box::new(target),
            index: Box::new(index),
        })),
        (inner, name_strategy()).prop_map(|(target, name)| node(ExprKind::Member {
            target: Box::new(target),
            name,
        })),
    ]
    .boxed()
}

fn expr_strategy() -> BoxedStrategy<Expr> {
    leaf_strategy()
        .prop_recursive(4, 48, 4, |inner| {
            prop_oneof![
                (
                    prop::sample::select(vec![
                        UnaryOp::Plus,
                        UnaryOp::Neg,
                        UnaryOp::Not,
                        UnaryOp::BitNot
                    ]),
                    inner.clone()
                )
                    .prop_map(|(op, operand)| ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                    }),
                (binary_op_strategy(), inner.clone(), inner.clone()).prop_map(
                    |(op, left, right)| ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    }
                ),
                (
                    assign_op_strategy(),
                    target_strategy(inner.clone()),
                    inner.clone()
                )
                    .prop_map(|(op, target, value)| ExprKind::Assign {
                        op,
                        target: Box::new(target),
                        value: Box::new(value),
                    }),
                (
                    prop::sample::select(vec![UpdateOp::Increment, UpdateOp::Decrement]),
                    any::<bool>(),
                    target_strategy(inner.clone())
                )
                    .prop_map(|(op, prefix, target)| ExprKind::Update {
                        op,
                        prefix,
                        target: Box::new(target),
                    }),
                prop::collection::vec(inner.clone(), 0..4).prop_map(ExprKind::Array),
                prop::collection::vec(("[ -~]{0,4}", inner.clone()), 0..3)
                    .prop_map(ExprKind::Dict),
                inner
                    .clone()
                    .prop_map(|len| ExprKind::ArrayAlloc(Box::new(len))),
                prop::collection::vec(inner.clone(), 2..4).prop_map(ExprKind::Sequence),
                (inner.clone(), prop::collection::vec(inner.clone(), 0..3)).prop_map(
                    |(callee, args)| ExprKind::Call {
                        callee: Box::new(callee),
                        args,
                    }
                ),
                (inner.clone(), inner.clone()).prop_map(|(target, index)| ExprKind::Index {
                    target: Box::new(target),
                    index: Box::new(index),
                }),
                (inner.clone(), name_strategy()).prop_map(|(target, name)| {
                    ExprKind::Member {
                        target: Box::new(target),
                        name,
                    }
                }),
                (
                    prop::option::of(name_strategy()),
                    prop::collection::vec(name_strategy(), 0..3),
                    prop::option::of(inner)
                )
                    .prop_map(|(name, params, result)| ExprKind::Function {
                        name,
                        params,
                        body: Box::new(node(ExprKind::Block(vec![node(
                            ExprKind::Return(result.map(Box::new))
                        )]))),
                    }),
            ]
            .prop_map(node)
        })
        .boxed()
}

fn block_of(stmts: Vec<Expr>) -> Expr {
    node(ExprKind::Block(stmts))
}

fn var_decl_strategy() -> impl Strategy<Value = Expr> {
    prop::collection::vec(
        (name_strategy(), prop::option::of(expr_strategy())),
        1..3,
    )
    .prop_map(|decls| {
        node(ExprKind::VarDecl(
            decls
                .into_iter()
                .map(|(name, init)| VarDeclarator {
                    name,
                    init,
                    pos: Position::DUMMY,
                })
                .collect(),
        ))
    })
}

fn stmt_strategy() -> BoxedStrategy<Expr> {
    let simple = prop_oneof![
        4 => expr_strategy(),
        1 => var_decl_strategy(),
        1 => Just(node(ExprKind::Break)),
        1 => Just(node(ExprKind::Continue)),
        1 => prop::option::of(expr_strategy())
            .prop_map(|value| node(ExprKind::Return(value.map(Box::new)))),
        1 => expr_strategy().prop_map(|value| node(ExprKind::Throw(Box::new(value)))),
    ];
    simple
        .prop_recursive(3, 24, 3, |inner| {
            let block = prop::collection::vec(inner, 0..3).prop_map(block_of);
            prop_oneof![
                block.clone(),
                (expr_strategy(), block.clone(), prop::option::of(block.clone())).prop_map(
                    |(cond, then_branch, else_branch)| node(ExprKind::If {
                        cond: Box::new(cond),
                        then_branch: Box::new(then_branch),
                        else_branch: else_branch.map(Box::new),
                    })
                ),
                (
                    prop::option::of(prop_oneof![var_decl_strategy(), expr_strategy()]),
                    prop::option::of(expr_strategy()),
                    prop::option::of(expr_strategy()),
                    block.clone()
                )
                    .prop_map(|(init, cond, step, body)| node(ExprKind::Loop {
                        init: init.map(Box::new),
                        cond: cond.map(Box::new),
                        step: step.map(Box::new),
                        body: Box::new(body),
                    })),
                (block.clone(), name_strategy(), block.clone()).prop_map(
                    |(body, catch_name, handler)| node(ExprKind::Try {
                        body: Box::new(body),
                        catch_name,
                        handler: Box::new(handler),
                    })
                ),
                (
                    name_strategy(),
                    prop::collection::vec(name_strategy(), 0..3),
                    block
                )
                    .prop_map(|(name, params, body)| node(ExprKind::Function {
                        name: Some(name),
                        params,
                        body: Box::new(body),
                    })),
            ]
        })
        .boxed()
}

/// A program is one statement or a sequence of zero or at least two.
fn program_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        stmt_strategy(),
        Just(node(ExprKind::Sequence(Vec::new()))),
        prop::collection::vec(stmt_strategy(), 2..5).prop_map(|items| node(ExprKind::Sequence(items))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn printed_programs_parse_back(program in program_strategy()) {
        let text = print_program(&program);
        let reparsed = parse(&text)
            .map_err(|err| TestCaseError::fail(format!("{err}\n--- source ---\n{text}")))?;
        prop_assert_eq!(reparsed.without_positions(), program, "source:\n{}", text);
    }

    #[test]
    fn printing_is_stable(program in program_strategy()) {
        let once = print_program(&program);
        let reparsed = parse(&once)
            .map_err(|err| TestCaseError::fail(format!("{err}\n--- source ---\n{once}")))?;
        prop_assert_eq!(print_program(&reparsed), once);
    }
}
