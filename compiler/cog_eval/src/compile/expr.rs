//! Expressions: literals, names, operators, collections, calls, and
//! keyed reads.

use std::sync::Arc;

use cog_ir::{BinaryOp, Expr, ExprKind, UnaryOp};

use super::{compile_all, compile_node, CompileError};
use crate::errors::{invalid_length, not_callable, undefined_variable};
use crate::exec::{call_function, run_units, ControlAction, Unit};
use crate::operators::evaluate_binary;
use crate::property::get_property;
use crate::scope::BlockBuilder;
use crate::unary_operators::evaluate_unary;
use crate::value::{Array, Dict};
use crate::Value;

/// Largest length `array(n)` will allocate.
const MAX_ARRAY_LEN: usize = 1 << 24;

pub(super) fn literal(node: &Expr) -> Unit {
    let value = match &node.kind {
        ExprKind::Null => Value::Null,
        ExprKind::Bool(b) => Value::bool(*b),
        ExprKind::Int(n) => Value::Int(*n),
        ExprKind::Float(x) => Value::Float(*x),
        ExprKind::Str(s) => Value::string(s.as_str()),
        _ => Value::Undefined,
    };
    Unit::new(node.pos, node.label(), move |_, _| Ok(value.clone()))
}

pub(super) fn ident(node: &Expr, name: &str) -> Unit {
    let name: Arc<str> = Arc::from(name);
    Unit::new(node.pos, node.label(), move |_, frame| {
        frame
            .lookup(&name)
            .ok_or_else(|| ControlAction::Error(undefined_variable(&name)))
    })
}

pub(super) fn unary(
    b: &mut BlockBuilder,
    node: &Expr,
    op: UnaryOp,
    operand: &Expr,
) -> Result<Unit, CompileError> {
    let operand = compile_node(b, operand)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let value = operand.exec(ex, frame)?;
        Ok(evaluate_unary(op, &value)?)
    }))
}

pub(super) fn binary(
    b: &mut BlockBuilder,
    node: &Expr,
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
) -> Result<Unit, CompileError> {
    let left = compile_node(b, left)?;
    let right = compile_node(b, right)?;
    let unit = match op {
        BinaryOp::And => Unit::new(node.pos, node.label(), move |ex, frame| {
            if !left.exec(ex, frame)?.is_truthy() {
                return Ok(Value::bool(false));
            }
            Ok(Value::bool(right.exec(ex, frame)?.is_truthy()))
        }),
        BinaryOp::Or => Unit::new(node.pos, node.label(), move |ex, frame| {
            if left.exec(ex, frame)?.is_truthy() {
                return Ok(Value::bool(true));
            }
            Ok(Value::bool(right.exec(ex, frame)?.is_truthy()))
        }),
        _ => Unit::new(node.pos, node.label(), move |ex, frame| {
            let l = left.exec(ex, frame)?;
            let r = right.exec(ex, frame)?;
            Ok(evaluate_binary(&l, &r, op)?)
        }),
    };
    Ok(unit)
}

pub(super) fn dict(
    b: &mut BlockBuilder,
    node: &Expr,
    entries: &[(String, Expr)],
) -> Result<Unit, CompileError> {
    let entries = entries
        .iter()
        .map(|(key, value)| Ok((key.clone(), compile_node(b, value)?)))
        .collect::<Result<Vec<_>, CompileError>>()?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let values = entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), value.exec(ex, frame)?)))
            .collect::<Result<Vec<_>, ControlAction>>()?;
        Ok(Value::Dict(Dict::from_entries(values)))
    }))
}

pub(super) fn array(
    b: &mut BlockBuilder,
    node: &Expr,
    items: &[Expr],
) -> Result<Unit, CompileError> {
    let items = compile_all(b, items)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let values = items
            .iter()
            .map(|item| item.exec(ex, frame))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::from(values))
    }))
}

/// `array(n)`: `n` slots, all `null`.
pub(super) fn array_alloc(
    b: &mut BlockBuilder,
    node: &Expr,
    len: &Expr,
) -> Result<Unit, CompileError> {
    let len = compile_node(b, len)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let requested = len.exec(ex, frame)?;
        let Value::Int(n) = requested else {
            return Err(invalid_length(requested).into());
        };
        let len = usize::try_from(n)
            .ok()
            .filter(|&len| len <= MAX_ARRAY_LEN)
            .ok_or_else(|| invalid_length(n))?;
        Ok(Value::Array(Array::with_len(len)))
    }))
}

/// Comma expression: every item in order, the last one's value.
pub(super) fn sequence(
    b: &mut BlockBuilder,
    node: &Expr,
    items: &[Expr],
) -> Result<Unit, CompileError> {
    let items = compile_all(b, items)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        run_units(&items, ex, frame)
    }))
}

pub(super) fn call(
    b: &mut BlockBuilder,
    node: &Expr,
    callee: &Expr,
    args: &[Expr],
) -> Result<Unit, CompileError> {
    let callee = compile_node(b, callee)?;
    let args = compile_all(b, args)?;
    let pos = node.pos;
    Ok(Unit::new(pos, node.label(), move |ex, frame| {
        let function = callee.exec(ex, frame)?;
        let values = args
            .iter()
            .map(|arg| arg.exec(ex, frame))
            .collect::<Result<Vec<_>, _>>()?;
        let Value::Function(closure) = function else {
            return Err(not_callable(function.type_name()).into());
        };
        call_function(ex, &closure, values, frame, pos)
    }))
}

pub(super) fn index(
    b: &mut BlockBuilder,
    node: &Expr,
    target: &Expr,
    index: &Expr,
) -> Result<Unit, CompileError> {
    let target = compile_node(b, target)?;
    let index = compile_node(b, index)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let object = target.exec(ex, frame)?;
        let key = index.exec(ex, frame)?;
        Ok(get_property(&object, &key)?)
    }))
}

pub(super) fn member(
    b: &mut BlockBuilder,
    node: &Expr,
    target: &Expr,
    name: &str,
) -> Result<Unit, CompileError> {
    let target = compile_node(b, target)?;
    let key = Value::string(name);
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let object = target.exec(ex, frame)?;
        Ok(get_property(&object, &key)?)
    }))
}
