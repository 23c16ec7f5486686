//! Assignment, `++`/`--`, and `var`.
//!
//! A target compiles to a [`PlaceUnit`]. Running it evaluates the target
//! object and key once and yields a [`Place`] that can then be read and
//! written any number of times, so `a[f()] += 1` calls `f` exactly once.

use std::sync::Arc;

use cog_ir::{AssignOp, Expr, ExprKind, UpdateOp, VarDeclarator};

use super::{compile_node, CompileError, CompileErrorKind};
use crate::errors::{undefined_variable, EvalError};
use crate::exec::{ControlAction, Exec, Unit};
use crate::operators::evaluate_binary;
use crate::property::{get_property, set_property};
use crate::scope::BlockBuilder;
use crate::{Frame, Value};

enum PlaceUnit {
    Var(Arc<str>),
    Keyed { target: Unit, key: Unit },
    Member { target: Unit, key: Value },
}

enum Place {
    Var(Arc<str>),
    Keyed { object: Value, key: Value },
}

impl PlaceUnit {
    fn compile(b: &mut BlockBuilder, target: &Expr) -> Result<Self, CompileError> {
        match &target.kind {
            ExprKind::Ident(name) => Ok(PlaceUnit::Var(Arc::from(name.as_str()))),
            ExprKind::Index { target, index } => Ok(PlaceUnit::Keyed {
                target: compile_node(b, target)?,
                key: compile_node(b, index)?,
            }),
            ExprKind::Member { target, name } => Ok(PlaceUnit::Member {
                target: compile_node(b, target)?,
                key: Value::string(name.as_str()),
            }),
            _ => Err(CompileError::new(
                CompileErrorKind::InvalidAssignmentTarget(target.label()),
                target.pos,
            )),
        }
    }

    fn resolve(&self, ex: &mut Exec<'_>, frame: &Frame) -> Result<Place, ControlAction> {
        match self {
            PlaceUnit::Var(name) => Ok(Place::Var(Arc::clone(name))),
            PlaceUnit::Keyed { target, key } => {
                let object = target.exec(ex, frame)?;
                let key = key.exec(ex, frame)?;
                Ok(Place::Keyed { object, key })
            }
            PlaceUnit::Member { target, key } => Ok(Place::Keyed {
                object: target.exec(ex, frame)?,
                key: key.clone(),
            }),
        }
    }
}

impl Place {
    fn read(&self, frame: &Frame) -> Result<Value, EvalError> {
        match self {
            Place::Var(name) => frame.lookup(name).ok_or_else(|| undefined_variable(name)),
            Place::Keyed { object, key } => get_property(object, key),
        }
    }

    fn write(&self, frame: &Frame, value: Value) -> Result<(), EvalError> {
        match self {
            Place::Var(name) => {
                frame.assign(name, value);
                Ok(())
            }
            Place::Keyed { object, key } => set_property(object, key, value),
        }
    }
}

/// `target = value` and `target op= value`. Evaluates the target object,
/// then the key, then the value. Yields the stored value.
pub(super) fn assign(
    b: &mut BlockBuilder,
    node: &Expr,
    op: AssignOp,
    target: &Expr,
    value: &Expr,
) -> Result<Unit, CompileError> {
    let place = PlaceUnit::compile(b, target)?;
    let value = compile_node(b, value)?;
    let unit = match op {
        AssignOp::Set => Unit::new(node.pos, node.label(), move |ex, frame| {
            let place = place.resolve(ex, frame)?;
            let value = value.exec(ex, frame)?;
            place.write(frame, value.clone())?;
            Ok(value)
        }),
        AssignOp::Compound(op) => Unit::new(node.pos, node.label(), move |ex, frame| {
            let place = place.resolve(ex, frame)?;
            let old = place.read(frame)?;
            let rhs = value.exec(ex, frame)?;
            let new = evaluate_binary(&old, &rhs, op)?;
            place.write(frame, new.clone())?;
            Ok(new)
        }),
    };
    Ok(unit)
}

/// `++x`/`--x` yield the new value, `x++`/`x--` the old one.
pub(super) fn update(
    b: &mut BlockBuilder,
    node: &Expr,
    op: UpdateOp,
    prefix: bool,
    target: &Expr,
) -> Result<Unit, CompileError> {
    let place = PlaceUnit::compile(b, target)?;
    let op = op.binary_op();
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let place = place.resolve(ex, frame)?;
        let old = place.read(frame)?;
        let new = evaluate_binary(&old, &Value::Int(1), op)?;
        place.write(frame, new.clone())?;
        Ok(if prefix { new } else { old })
    }))
}

/// `var a = 1, b;` binds every name in the current frame. A declarator
/// without an initializer leaves an existing local untouched.
pub(super) fn var_decl(
    b: &mut BlockBuilder,
    node: &Expr,
    decls: &[VarDeclarator],
) -> Result<Unit, CompileError> {
    let decls = decls
        .iter()
        .map(|decl| {
            let init = decl
                .init
                .as_ref()
                .map(|init| compile_node(b, init))
                .transpose()?;
            Ok((Arc::<str>::from(decl.name.as_str()), init))
        })
        .collect::<Result<Vec<_>, CompileError>>()?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        for (name, init) in &decls {
            match init {
                Some(init) => {
                    let value = init.exec(ex, frame)?;
                    frame.define(Arc::clone(name), value);
                }
                None => frame.declare(name),
            }
        }
        Ok(Value::Undefined)
    }))
}
