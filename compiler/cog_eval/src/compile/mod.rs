//! AST to executable units.
//!
//! Compilation walks the tree once. Every node becomes a [`Unit`] whose
//! closure owns the units of its children, so a compiled program is a
//! tree of closures with no further interpretation step. A
//! [`BlockBuilder`] threads through the walk and records the nesting of
//! function, loop, try, and plain blocks; the control-flow checks
//! (`break` needs a loop, `return` needs a function) are made against it.
//!
//! Variables are not resolved here. A compiled read or write carries the
//! name and walks the live frame chain when it runs, so a binding created
//! after a closure was made is still visible to it.

mod assign;
mod error;
mod expr;
mod stmt;

use cog_ir::{Expr, ExprKind};
use cog_stack::ensure_sufficient_stack;
use tracing::debug;

pub use error::{CompileError, CompileErrorKind};

use crate::exec::Unit;
use crate::program::Program;
use crate::scope::BlockBuilder;

/// Compile a whole program. A top-level `Sequence` becomes the
/// statements of `main`.
pub fn compile(ast: &Expr) -> Result<Program, CompileError> {
    let mut builder = BlockBuilder::new();
    let units = match &ast.kind {
        ExprKind::Sequence(items) => compile_all(&mut builder, items)?,
        _ => vec![compile_node(&mut builder, ast)?],
    };
    let scopes = builder.finish();
    debug!(units = units.len(), blocks = scopes.len(), "compiled program");
    Ok(Program::new(units, scopes))
}

/// Compile one node inside the builder's current block.
pub fn compile_node(builder: &mut BlockBuilder, node: &Expr) -> Result<Unit, CompileError> {
    ensure_sufficient_stack(|| compile_node_inner(builder, node))
}

fn compile_node_inner(b: &mut BlockBuilder, node: &Expr) -> Result<Unit, CompileError> {
    match &node.kind {
        ExprKind::Null
        | ExprKind::Undefined
        | ExprKind::Bool(_)
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_) => Ok(expr::literal(node)),
        ExprKind::Ident(name) => Ok(expr::ident(node, name)),
        ExprKind::Unary { op, operand } => expr::unary(b, node, *op, operand),
        ExprKind::Binary { op, left, right } => expr::binary(b, node, *op, left, right),
        ExprKind::Assign { op, target, value } => assign::assign(b, node, *op, target, value),
        ExprKind::Update { op, prefix, target } => assign::update(b, node, *op, *prefix, target),
        ExprKind::VarDecl(decls) => assign::var_decl(b, node, decls),
        ExprKind::Dict(entries) => expr::dict(b, node, entries),
        ExprKind::Array(items) => expr::array(b, node, items),
        ExprKind::ArrayAlloc(len) => expr::array_alloc(b, node, len),
        ExprKind::Sequence(items) => expr::sequence(b, node, items),
        ExprKind::Call { callee, args } => expr::call(b, node, callee, args),
        ExprKind::Index { target, index } => expr::index(b, node, target, index),
        ExprKind::Member { target, name } => expr::member(b, node, target, name),
        ExprKind::Block(items) => stmt::block(b, node, items),
        ExprKind::Function { name, params, body } => {
            stmt::function(b, node, name.as_deref(), params, body)
        }
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => stmt::if_else(b, node, cond, then_branch, else_branch.as_deref()),
        ExprKind::Loop {
            init,
            cond,
            step,
            body,
        } => stmt::loop_(
            b,
            node,
            init.as_deref(),
            cond.as_deref(),
            step.as_deref(),
            body,
        ),
        ExprKind::Break => stmt::break_(b, node),
        ExprKind::Continue => stmt::continue_(b, node),
        ExprKind::Return(value) => stmt::return_(b, node, value.as_deref()),
        ExprKind::Throw(value) => stmt::throw(b, node, value),
        ExprKind::Try {
            body,
            catch_name,
            handler,
        } => stmt::try_catch(b, node, body, catch_name, handler),
    }
}

fn compile_all(b: &mut BlockBuilder, nodes: &[Expr]) -> Result<Vec<Unit>, CompileError> {
    nodes.iter().map(|node| compile_node(b, node)).collect()
}

fn compile_opt(b: &mut BlockBuilder, node: Option<&Expr>) -> Result<Option<Unit>, CompileError> {
    node.map(|node| compile_node(b, node)).transpose()
}

/// Statements of a block body; a lone statement stands for itself.
fn body_items(node: &Expr) -> &[Expr] {
    match &node.kind {
        ExprKind::Block(items) => items,
        _ => std::slice::from_ref(node),
    }
}

#[cfg(test)]
mod tests;
