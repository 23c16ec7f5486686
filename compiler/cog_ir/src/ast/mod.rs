//! AST nodes.
//!
//! Statements and expressions share one node type: `if`, loops, and
//! declarations are expression kinds that happen to be parsed in
//! statement position. Every node owns its children and its position.

mod operators;

pub use operators::{AssignOp, BinaryOp, UnaryOp, UpdateOp};

use crate::Position;

/// AST node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }

    /// Box a node without ceremony at call sites.
    pub fn boxed(kind: ExprKind, pos: Position) -> Box<Self> {
        Box::new(Expr { kind, pos })
    }

    /// Short tag naming this node's kind, used in diagnostics and traces.
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Whether this node may appear on the left of `=` or as a `++` operand.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Ident(_) | ExprKind::Index { .. } | ExprKind::Member { .. }
        )
    }

    /// Copy of this tree with every position replaced by [`Position::DUMMY`].
    ///
    /// Two trees that differ only in source locations compare equal after
    /// this transformation.
    #[must_use]
    pub fn without_positions(&self) -> Expr {
        let strip = |e: &Expr| Box::new(e.without_positions());
        let strip_opt = |e: &Option<Box<Expr>>| e.as_deref().map(|e| Box::new(e.without_positions()));
        let strip_all = |es: &[Expr]| es.iter().map(Expr::without_positions).collect::<Vec<_>>();

        let kind = match &self.kind {
            ExprKind::Null => ExprKind::Null,
            ExprKind::Undefined => ExprKind::Undefined,
            ExprKind::Bool(b) => ExprKind::Bool(*b),
            ExprKind::Int(n) => ExprKind::Int(*n),
            ExprKind::Float(f) => ExprKind::Float(*f),
            ExprKind::Str(s) => ExprKind::Str(s.clone()),
            ExprKind::Ident(name) => ExprKind::Ident(name.clone()),
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op: *op,
                operand: strip(operand),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op: *op,
                left: strip(left),
                right: strip(right),
            },
            ExprKind::Assign { op, target, value } => ExprKind::Assign {
                op: *op,
                target: strip(target),
                value: strip(value),
            },
            ExprKind::Update { op, prefix, target } => ExprKind::Update {
                op: *op,
                prefix: *prefix,
                target: strip(target),
            },
            ExprKind::VarDecl(decls) => ExprKind::VarDecl(
                decls
                    .iter()
                    .map(|d| VarDeclarator {
                        name: d.name.clone(),
                        init: d.init.as_ref().map(Expr::without_positions),
                        pos: Position::DUMMY,
                    })
                    .collect(),
            ),
            ExprKind::Dict(entries) => ExprKind::Dict(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.without_positions()))
                    .collect(),
            ),
            ExprKind::Array(items) => ExprKind::Array(strip_all(items)),
            ExprKind::ArrayAlloc(len) => ExprKind::ArrayAlloc(strip(len)),
            ExprKind::Sequence(items) => ExprKind::Sequence(strip_all(items)),
            ExprKind::Block(items) => ExprKind::Block(strip_all(items)),
            ExprKind::Function { name, params, body } => ExprKind::Function {
                name: name.clone(),
                params: params.clone(),
                body: strip(body),
            },
            ExprKind::Call { callee, args } => ExprKind::Call {
                callee: strip(callee),
                args: strip_all(args),
            },
            ExprKind::Index { target, index } => ExprKind::Index {
                target: strip(target),
                index: strip(index),
            },
            ExprKind::Member { target, name } => ExprKind::Member {
                target: strip(target),
                name: name.clone(),
            },
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => ExprKind::If {
                cond: strip(cond),
                then_branch: strip(then_branch),
                else_branch: strip_opt(else_branch),
            },
            ExprKind::Loop {
                init,
                cond,
                step,
                body,
            } => ExprKind::Loop {
                init: strip_opt(init),
                cond: strip_opt(cond),
                step: strip_opt(step),
                body: strip(body),
            },
            ExprKind::Break => ExprKind::Break,
            ExprKind::Continue => ExprKind::Continue,
            ExprKind::Return(value) => ExprKind::Return(strip_opt(value)),
            ExprKind::Throw(value) => ExprKind::Throw(strip(value)),
            ExprKind::Try {
                body,
                catch_name,
                handler,
            } => ExprKind::Try {
                body: strip(body),
                catch_name: catch_name.clone(),
                handler: strip(handler),
            },
        };
        Expr::new(kind, Position::DUMMY)
    }
}

/// One `name = init` entry of a `var` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    pub name: String,
    pub init: Option<Expr>,
    pub pos: Position,
}

/// Node variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // Literals
    Null,
    Undefined,
    /// `true`/`false`; evaluates to the integers `1`/`0`.
    Bool(bool),
    Int(i64),
    Float(f32),
    Str(String),

    Ident(String),

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `target = value` or `target op= value`.
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `++x`, `x++`, `--x`, `x--`.
    Update {
        op: UpdateOp,
        prefix: bool,
        target: Box<Expr>,
    },
    VarDecl(Vec<VarDeclarator>),

    /// `{ key: value, ... }`
    Dict(Vec<(String, Expr)>),
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `array(n)`
    ArrayAlloc(Box<Expr>),

    /// Comma expression or a multi-statement program; no new scope.
    Sequence(Vec<Expr>),
    /// `{ ... }` statement block; opens a plain scope.
    Block(Vec<Expr>),

    /// Named declaration or anonymous function literal. `body` is a `Block`.
    Function {
        name: Option<String>,
        params: Vec<String>,
        body: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `target[index]`
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    /// `target.name`
    Member {
        target: Box<Expr>,
        name: String,
    },

    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    /// Generalized loop; `while` and `for` both lower to this.
    Loop {
        init: Option<Box<Expr>>,
        cond: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
        body: Box<Expr>,
    },
    Break,
    Continue,
    Return(Option<Box<Expr>>),
    Throw(Box<Expr>),
    /// `try { body } catch (catch_name) { handler }`
    Try {
        body: Box<Expr>,
        catch_name: String,
        handler: Box<Expr>,
    },
}

impl ExprKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExprKind::Null => "null",
            ExprKind::Undefined => "undefined",
            ExprKind::Bool(_) => "bool",
            ExprKind::Int(_) => "int",
            ExprKind::Float(_) => "float",
            ExprKind::Str(_) => "string",
            ExprKind::Ident(_) => "identifier",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Assign { .. } => "assignment",
            ExprKind::Update { .. } => "update",
            ExprKind::VarDecl(_) => "var",
            ExprKind::Dict(_) => "dictionary",
            ExprKind::Array(_) => "array",
            ExprKind::ArrayAlloc(_) => "array allocation",
            ExprKind::Sequence(_) => "sequence",
            ExprKind::Block(_) => "block",
            ExprKind::Function { .. } => "function",
            ExprKind::Call { .. } => "call",
            ExprKind::Index { .. } => "index",
            ExprKind::Member { .. } => "member",
            ExprKind::If { .. } => "if",
            ExprKind::Loop { .. } => "loop",
            ExprKind::Break => "break",
            ExprKind::Continue => "continue",
            ExprKind::Return(_) => "return",
            ExprKind::Throw(_) => "throw",
            ExprKind::Try { .. } => "try",
        }
    }
}
