//! Binary operator dispatch.

use cog_ir::BinaryOp;
use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;
use crate::operators::evaluate_binary;
use crate::value::Dict;
use crate::Value;

fn bin(left: impl Into<Value>, op: BinaryOp, right: impl Into<Value>) -> Value {
    evaluate_binary(&left.into(), &right.into(), op).unwrap()
}

#[test]
fn int_arithmetic() {
    assert_eq!(bin(2, BinaryOp::Add, 3), Value::Int(5));
    assert_eq!(bin(5, BinaryOp::Sub, 7), Value::Int(-2));
    assert_eq!(bin(4, BinaryOp::Mul, 6), Value::Int(24));
    assert_eq!(bin(7, BinaryOp::Div, 2), Value::Int(3));
    assert_eq!(bin(-7, BinaryOp::Mod, 3), Value::Int(-1));
}

#[test]
fn int_arithmetic_wraps() {
    assert_eq!(bin(i64::MAX, BinaryOp::Add, 1), Value::Int(i64::MIN));
    assert_eq!(bin(i64::MIN, BinaryOp::Div, -1), Value::Int(i64::MIN));
}

#[test]
fn int_division_by_zero_fails() {
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        let err = evaluate_binary(&Value::Int(1), &Value::Int(0), op).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }
}

#[test]
fn float_division_by_zero_is_ieee() {
    let Value::Float(x) = bin(1.0_f32, BinaryOp::Div, 0) else {
        panic!("expected a float");
    };
    assert!(x.is_infinite());
}

#[test]
fn mixed_numbers_produce_floats() {
    assert_eq!(bin(1, BinaryOp::Add, 0.5_f32), Value::Float(1.5));
    assert_eq!(bin(3.0_f32, BinaryOp::Mul, 2), Value::Float(6.0));
    assert!(matches!(bin(7.5_f32, BinaryOp::Mod, 2), Value::Float(x) if x == 1.5));
}

#[test]
fn plus_concatenates_display_forms() {
    assert_eq!(bin("n=", BinaryOp::Add, 4), Value::from("n=4"));
    assert_eq!(bin(1.5_f32, BinaryOp::Add, "!"), Value::from("1.5!"));
    assert_eq!(bin("x", BinaryOp::Add, Value::Null), Value::from("xnull"));
}

#[test]
fn comparisons_yield_ints() {
    assert_eq!(bin(2, BinaryOp::Lt, 3), Value::Int(1));
    assert_eq!(bin(3, BinaryOp::LtEq, 3), Value::Int(1));
    assert_eq!(bin(2, BinaryOp::Gt, 3), Value::Int(0));
    assert_eq!(bin(2, BinaryOp::GtEq, 2.5_f32), Value::Int(0));
    assert_eq!(bin("apple", BinaryOp::Lt, "banana"), Value::Int(1));
}

#[test]
fn equality_never_fails() {
    assert_eq!(bin(1, BinaryOp::Eq, 1.0_f32), Value::Int(1));
    assert_eq!(bin("1", BinaryOp::Eq, 1), Value::Int(0));
    assert_eq!(bin(Value::Null, BinaryOp::NotEq, Value::Undefined), Value::Int(1));
    let dict = Value::Dict(Dict::new());
    assert_eq!(bin(dict.clone(), BinaryOp::Eq, dict), Value::Int(1));
}

#[test]
fn bitwise_on_ints() {
    assert_eq!(bin(0b1100, BinaryOp::BitAnd, 0b1010), Value::Int(0b1000));
    assert_eq!(bin(0b1100, BinaryOp::BitOr, 0b1010), Value::Int(0b1110));
    assert_eq!(bin(0b1100, BinaryOp::BitXor, 0b1010), Value::Int(0b0110));
    assert_eq!(bin(1, BinaryOp::Shl, 4), Value::Int(16));
    assert_eq!(bin(-16, BinaryOp::Shr, 2), Value::Int(-4));
    assert_eq!(bin(1, BinaryOp::Shl, 65), Value::Int(2));
}

#[test]
fn logical_operators_on_values() {
    assert_eq!(bin(1, BinaryOp::And, "x"), Value::Int(1));
    assert_eq!(bin(0, BinaryOp::Or, Value::Null), Value::Int(0));
}

#[test]
fn type_mismatch_message() {
    let err = evaluate_binary(&Value::Dict(Dict::new()), &Value::Int(1), BinaryOp::Sub).unwrap_err();
    assert_eq!(err.message, "can't cast types: dictionary - int");
    let err = evaluate_binary(&Value::Int(1), &Value::Float(1.0), BinaryOp::BitAnd).unwrap_err();
    assert_eq!(err.message, "can't cast types: int & float");
    assert!(evaluate_binary(&Value::Null, &Value::Int(1), BinaryOp::Add).is_err());
    assert!(evaluate_binary(&Value::from("a"), &Value::Int(1), BinaryOp::Lt).is_err());
}

mod properties {
    use proptest::prelude::*;

    use super::bin;
    use cog_ir::BinaryOp;
    use crate::Value;

    proptest! {
        #[test]
        fn int_ops_wrap_like_i64(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(bin(a, BinaryOp::Add, b), Value::Int(a.wrapping_add(b)));
            prop_assert_eq!(bin(a, BinaryOp::Sub, b), Value::Int(a.wrapping_sub(b)));
            prop_assert_eq!(bin(a, BinaryOp::Mul, b), Value::Int(a.wrapping_mul(b)));
        }

        #[test]
        fn comparisons_agree_with_i64(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(bin(a, BinaryOp::Lt, b), Value::bool(a < b));
            prop_assert_eq!(bin(a, BinaryOp::GtEq, b), Value::bool(a >= b));
            prop_assert_eq!(bin(a, BinaryOp::Eq, b), Value::bool(a == b));
        }
    }
}
