//! Binary operator dispatch.
//!
//! Each operator matches on the runtime kinds of its operands and takes
//! the first branch that applies. When none does the operation fails with
//! "can't cast types", which reaches the script as a thrown string.
//!
//! Integer arithmetic wraps. Mixing an int with a float computes in `f32`,
//! except comparisons, which widen both sides to `f64`.

use std::cmp::Ordering;

use cog_ir::BinaryOp;

use crate::errors::{cant_cast, division_by_zero, EvalError};
use crate::Value;

/// Evaluate `left op right` with both operands already evaluated.
///
/// `&&` and `||` are accepted for completeness; the compiler
/// short-circuits them before getting here.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Eq => Ok(Value::bool(left.equals(right))),
        BinaryOp::NotEq => Ok(Value::bool(!left.equals(right))),
        BinaryOp::And => Ok(Value::bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(left, right, op)
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            compare(left, right, op)
        }
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::Shl | BinaryOp::Shr => {
            bitwise(left, right, op)
        }
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> EvalError {
    cant_cast(op.as_symbol(), left.type_name(), right.type_name())
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed int/float arithmetic is defined on f32"
)]
fn as_f32(value: &Value) -> Option<f32> {
    match value {
        Value::Int(n) => Some(*n as f32),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

/// `+`: string concatenation if either side is a string, otherwise
/// numeric addition.
fn add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::string(format!("{left}{right}"))),
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
        _ => match (as_f32(left), as_f32(right)) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(mismatch(left, right, BinaryOp::Add)),
        },
    }
}

fn arithmetic(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return int_arithmetic(*a, *b, op);
    }
    match (as_f32(left), as_f32(right)) {
        (Some(a), Some(b)) => Ok(Value::Float(float_arithmetic(a, b, op))),
        _ => Err(mismatch(left, right, op)),
    }
}

fn int_arithmetic(a: i64, b: i64, op: BinaryOp) -> Result<Value, EvalError> {
    let n = match op {
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div if b == 0 => return Err(division_by_zero()),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod if b == 0 => return Err(division_by_zero()),
        BinaryOp::Mod => a.wrapping_rem(b),
        _ => a.wrapping_add(b),
    };
    Ok(Value::Int(n))
}

fn float_arithmetic(a: f32, b: f32, op: BinaryOp) -> f32 {
    match op {
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => a + b,
    }
}

/// `< <= > >=` on numbers or on strings.
fn compare(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(mismatch(left, right, op)),
        },
    };
    // NaN compares false against everything.
    let Some(ordering) = ordering else {
        return Ok(Value::bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::bool(result))
}

fn bitwise(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    let (Value::Int(a), Value::Int(b)) = (left, right) else {
        return Err(mismatch(left, right, op));
    };
    let (a, b) = (*a, *b);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "shift amount is masked to 0..=63"
    )]
    let shift = (b & 63) as u32;
    let n = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => a.wrapping_shl(shift),
        _ => a.wrapping_shr(shift),
    };
    Ok(Value::Int(n))
}
