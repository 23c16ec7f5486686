//! Keyed access: `a[k]` and `a.name`.
//!
//! `a.name` is `a["name"]`. Arrays and strings take integer indices and
//! expose a read-only `length`; dictionaries take string keys, with
//! numbers converted through their display form. Reading a missing
//! dictionary key gives `undefined`; indexing outside an array or string
//! is an error.

use crate::errors::{index_out_of_bounds, invalid_property, read_only, EvalError};
use crate::Value;

const LENGTH: &str = "length";

fn dict_key(key: &Value) -> Option<String> {
    match key {
        Value::Str(s) => Some(s.to_string()),
        Value::Int(_) | Value::Float(_) => Some(key.to_string()),
        _ => None,
    }
}

fn checked_index(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn length_value(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

pub fn get_property(object: &Value, key: &Value) -> Result<Value, EvalError> {
    match (object, key) {
        (Value::Dict(dict), _) => match dict_key(key) {
            Some(key) => Ok(dict.get(&key).unwrap_or_default()),
            None => Err(invalid_property(object.type_name(), key)),
        },
        (Value::Array(array), Value::Int(index)) => {
            let i = checked_index(*index, array.len())?;
            array
                .get(i)
                .ok_or_else(|| index_out_of_bounds(*index, array.len()))
        }
        (Value::Array(array), Value::Str(name)) if &**name == LENGTH => {
            Ok(length_value(array.len()))
        }
        (Value::Str(s), Value::Int(index)) => {
            let len = s.chars().count();
            let i = checked_index(*index, len)?;
            Ok(s.chars()
                .nth(i)
                .map(|c| Value::string(c.to_string()))
                .unwrap_or_default())
        }
        (Value::Str(s), Value::Str(name)) if &**name == LENGTH => {
            Ok(length_value(s.chars().count()))
        }
        _ => Err(invalid_property(object.type_name(), key)),
    }
}

pub fn set_property(object: &Value, key: &Value, value: Value) -> Result<(), EvalError> {
    match (object, key) {
        (Value::Dict(dict), _) => match dict_key(key) {
            Some(key) => {
                dict.set(key, value);
                Ok(())
            }
            None => Err(invalid_property(object.type_name(), key)),
        },
        (Value::Array(array), Value::Int(index)) => {
            let i = checked_index(*index, array.len())?;
            if array.set(i, value) {
                Ok(())
            } else {
                Err(index_out_of_bounds(*index, array.len()))
            }
        }
        (Value::Array(_) | Value::Str(_), Value::Str(name)) if &**name == LENGTH => {
            Err(read_only("length"))
        }
        (Value::Str(_), _) => Err(read_only("a string")),
        _ => Err(invalid_property(object.type_name(), key)),
    }
}
