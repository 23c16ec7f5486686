//! Unary operator dispatch.

use cog_ir::UnaryOp;

use crate::errors::{cant_cast_unary, EvalError};
use crate::Value;

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Result<Value, EvalError> {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::bool(!value.is_truthy())),
        (UnaryOp::Plus, Value::Int(_) | Value::Float(_)) => Ok(operand.clone()),
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
        (op, value) => Err(cant_cast_unary(op.as_symbol(), value.type_name())),
    }
}
