//! Statements and the blocks they introduce.
//!
//! Each block kind gets a fresh frame when it runs and lets through every
//! control action except the ones it handles: loops take `break` and
//! `continue`, `try` takes `throw`, function calls take `return`.

use std::sync::Arc;

use cog_ir::{Expr, TokenKind};
use tracing::trace;

use super::{body_items, compile_all, compile_node, compile_opt, CompileError, CompileErrorKind};
use crate::exec::{run_units, ControlAction, Exception, Unit};
use crate::function_val::{Closure, ScriptFunction};
use crate::scope::{BlockBuilder, BlockKind};
use crate::Value;

const ANONYMOUS: &str = "<anonymous>";

/// `{ ... }` runs in its own frame.
pub(super) fn block(
    b: &mut BlockBuilder,
    node: &Expr,
    items: &[Expr],
) -> Result<Unit, CompileError> {
    let (id, units) = b.with_block(BlockKind::Plain, |b, id| {
        compile_all(b, items).map(|units| (id, units))
    })?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let scope = frame.child(id, BlockKind::Plain);
        run_units(&units, ex, &scope)
    }))
}

pub(super) fn if_else(
    b: &mut BlockBuilder,
    node: &Expr,
    cond: &Expr,
    then_branch: &Expr,
    else_branch: Option<&Expr>,
) -> Result<Unit, CompileError> {
    let cond = compile_node(b, cond)?;
    let then_branch = compile_node(b, then_branch)?;
    let else_branch = compile_opt(b, else_branch)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        if cond.exec(ex, frame)?.is_truthy() {
            then_branch.exec(ex, frame)
        } else if let Some(else_branch) = &else_branch {
            else_branch.exec(ex, frame)
        } else {
            Ok(Value::Undefined)
        }
    }))
}

/// `while` and `for`. `init`, `cond`, and `step` share one frame for the
/// whole loop; each pass through the body gets a fresh frame inside it.
pub(super) fn loop_(
    b: &mut BlockBuilder,
    node: &Expr,
    init: Option<&Expr>,
    cond: Option<&Expr>,
    step: Option<&Expr>,
    body: &Expr,
) -> Result<Unit, CompileError> {
    let (id, init, cond, step, body) = b.with_block(BlockKind::Loop, |b, id| {
        let init = compile_opt(b, init)?;
        let cond = compile_opt(b, cond)?;
        let step = compile_opt(b, step)?;
        let body = compile_all(b, body_items(body))?;
        Ok::<_, CompileError>((id, init, cond, step, body))
    })?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let scope = frame.child(id, BlockKind::Loop);
        if let Some(init) = &init {
            init.exec(ex, &scope)?;
        }
        loop {
            if let Some(cond) = &cond {
                if !cond.exec(ex, &scope)?.is_truthy() {
                    break;
                }
            }
            let pass = scope.child(id, BlockKind::Loop);
            match run_units(&body, ex, &pass) {
                Ok(_) | Err(ControlAction::Continue) => {}
                Err(ControlAction::Break) => break,
                Err(other) => return Err(other),
            }
            if let Some(step) = &step {
                step.exec(ex, &scope)?;
            }
        }
        Ok(Value::Undefined)
    }))
}

pub(super) fn break_(b: &BlockBuilder, node: &Expr) -> Result<Unit, CompileError> {
    if !b.in_loop() {
        return Err(CompileError::new(CompileErrorKind::BreakOutsideLoop, node.pos));
    }
    Ok(Unit::new(node.pos, node.label(), |_, _| {
        Err(ControlAction::Break)
    }))
}

pub(super) fn continue_(b: &BlockBuilder, node: &Expr) -> Result<Unit, CompileError> {
    if !b.in_loop() {
        return Err(CompileError::new(
            CompileErrorKind::ContinueOutsideLoop,
            node.pos,
        ));
    }
    Ok(Unit::new(node.pos, node.label(), |_, _| {
        Err(ControlAction::Continue)
    }))
}

pub(super) fn return_(
    b: &mut BlockBuilder,
    node: &Expr,
    value: Option<&Expr>,
) -> Result<Unit, CompileError> {
    if !b.in_function() {
        return Err(CompileError::new(
            CompileErrorKind::ReturnOutsideFunction,
            node.pos,
        ));
    }
    let value = compile_opt(b, value)?;
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let value = match &value {
            Some(value) => value.exec(ex, frame)?,
            None => Value::Undefined,
        };
        Err(ControlAction::Return(value))
    }))
}

pub(super) fn throw(
    b: &mut BlockBuilder,
    node: &Expr,
    value: &Expr,
) -> Result<Unit, CompileError> {
    let value = compile_node(b, value)?;
    let pos = node.pos;
    Ok(Unit::new(pos, node.label(), move |ex, frame| {
        let payload = value.exec(ex, frame)?;
        Err(ControlAction::Throw(Exception::thrown(
            payload,
            frame.clone(),
            pos,
        )))
    }))
}

/// `try { body } catch (name) { handler }`. The handler runs in a fresh
/// frame beside the `try` frame with `name` bound to the thrown value.
pub(super) fn try_catch(
    b: &mut BlockBuilder,
    node: &Expr,
    body: &Expr,
    catch_name: &str,
    handler: &Expr,
) -> Result<Unit, CompileError> {
    let (try_id, body) = b.with_block(BlockKind::Try, |b, id| {
        compile_all(b, body_items(body)).map(|units| (id, units))
    })?;
    let (catch_id, handler) = b.with_block(BlockKind::Plain, |b, id| {
        compile_all(b, body_items(handler)).map(|units| (id, units))
    })?;
    let catch_name: Arc<str> = Arc::from(catch_name);
    Ok(Unit::new(node.pos, node.label(), move |ex, frame| {
        let scope = frame.child(try_id, BlockKind::Try);
        match run_units(&body, ex, &scope) {
            Err(ControlAction::Throw(exception)) => {
                trace!(pos = %exception.pos, message = %exception.message(), "caught");
                let catch = frame.child(catch_id, BlockKind::Plain);
                catch.define(Arc::clone(&catch_name), exception.payload);
                run_units(&handler, ex, &catch)
            }
            other => other,
        }
    }))
}

/// A function literal. Evaluating it captures the current frame; a named
/// function is also bound under its name in that frame.
pub(super) fn function(
    b: &mut BlockBuilder,
    node: &Expr,
    name: Option<&str>,
    params: &[String],
    body: &Expr,
) -> Result<Unit, CompileError> {
    let params = check_params(node, params)?;
    let (block, units) = b.with_block(BlockKind::Function, |b, id| {
        compile_all(b, body_items(body)).map(|units| (id, units))
    })?;
    let binding: Option<Arc<str>> = name.map(Arc::from);
    let function = Arc::new(ScriptFunction {
        name: binding.clone().unwrap_or_else(|| Arc::from(ANONYMOUS)),
        params,
        block,
        body: units,
        pos: node.pos,
    });
    Ok(Unit::new(node.pos, node.label(), move |_, frame| {
        let closure = Closure::script(Arc::clone(&function), frame.clone());
        let value = Value::Function(Arc::new(closure));
        if let Some(name) = &binding {
            frame.define(Arc::clone(name), value.clone());
        }
        Ok(value)
    }))
}

fn check_params(node: &Expr, params: &[String]) -> Result<Vec<Arc<str>>, CompileError> {
    let mut checked: Vec<Arc<str>> = Vec::with_capacity(params.len());
    for param in params {
        if !is_identifier(param) {
            return Err(CompileError::new(
                CompileErrorKind::MalformedParameter(param.clone()),
                node.pos,
            ));
        }
        if checked.iter().any(|seen| **seen == **param) {
            return Err(CompileError::new(
                CompileErrorKind::DuplicateParameter(param.clone()),
                node.pos,
            ));
        }
        checked.push(Arc::from(param.as_str()));
    }
    Ok(checked)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && TokenKind::keyword(name).is_none()
}
