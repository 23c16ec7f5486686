//! Unary operator dispatch.

use cog_ir::UnaryOp;

use crate::unary_operators::evaluate_unary;
use crate::Value;

#[test]
fn numeric_unary() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Int(5)), Ok(Value::Int(-5)));
    assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Float(0.5)), Ok(Value::Float(-0.5)));
    assert_eq!(evaluate_unary(UnaryOp::Plus, &Value::Int(5)), Ok(Value::Int(5)));
    assert_eq!(evaluate_unary(UnaryOp::BitNot, &Value::Int(0)), Ok(Value::Int(-1)));
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &Value::Int(i64::MIN)),
        Ok(Value::Int(i64::MIN))
    );
}

#[test]
fn not_uses_truthiness() {
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Int(0)), Ok(Value::Int(1)));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::from("")), Ok(Value::Int(0)));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Undefined), Ok(Value::Int(1)));
}

#[test]
fn unsupported_operands() {
    let err = evaluate_unary(UnaryOp::Neg, &Value::from("x")).unwrap_err();
    assert_eq!(err.message, "can't cast types: -string");
    assert!(evaluate_unary(UnaryOp::BitNot, &Value::Float(1.0)).is_err());
    assert!(evaluate_unary(UnaryOp::Plus, &Value::Null).is_err());
}
