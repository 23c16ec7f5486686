//! Runtime values.
//!
//! Scalars are stored inline. Dictionaries and arrays are shared by
//! reference: cloning a [`Value`] clones the handle, not the contents, and
//! `==` on them compares identity. There is no boolean type; conditions
//! and comparisons produce the integers `1` and `0`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::function_val::Closure;

/// Nesting depth after which `Display` elides contents. Also stops
/// self-referencing collections from recursing forever.
const DISPLAY_DEPTH: usize = 8;

/// A script value.
#[derive(Clone)]
pub enum Value {
    Null,
    Undefined,
    Int(i64),
    Float(f32),
    Str(Arc<str>),
    Dict(Dict),
    Array(Array),
    Function(Arc<Closure>),
    /// Opaque host object passed through scripts untouched.
    Host(HostValue),
}

impl Value {
    /// `1` for true, `0` for false.
    #[inline]
    pub fn bool(b: bool) -> Value {
        Value::Int(i64::from(b))
    }

    pub fn string(s: impl Into<Arc<str>>) -> Value {
        Value::Str(s.into())
    }

    /// Name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Dict(_) => "dictionary",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Host(_) => "host object",
        }
    }

    /// Non-zero numbers and every object except `null`/`undefined` are
    /// truthy. Strings are objects, so `""` is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null | Value::Undefined => false,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(_)
            | Value::Dict(_)
            | Value::Array(_)
            | Value::Function(_)
            | Value::Host(_) => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view used for mixed comparisons.
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float comparison is defined on f64"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(f64::from(*x)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<Closure>> {
        match self {
            Value::Function(closure) => Some(closure),
            _ => None,
        }
    }

    /// Script `==`: numbers compare numerically, strings by content,
    /// `null` and `undefined` only equal themselves, and everything else
    /// by identity. Never fails.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Host(a), Value::Host(b)) => a.ptr_eq(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, depth: usize, quoted: bool) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) if quoted => write!(f, "{s:?}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) | Value::Dict(_) if depth >= DISPLAY_DEPTH => f.write_str("..."),
            Value::Array(array) => {
                f.write_str("[")?;
                for (i, item) in array.snapshot().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write(f, depth + 1, true)?;
                }
                f.write_str("]")
            }
            Value::Dict(dict) => {
                f.write_str("{")?;
                for (i, (key, value)) in dict.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.write(f, depth + 1, true)?;
                }
                f.write_str("}")
            }
            Value::Function(closure) => write!(f, "[function {}]", closure.name()),
            Value::Host(host) => write!(f, "[host {}]", host.type_name()),
        }
    }
}

impl PartialEq for Value {
    /// Same relation as script `==`.
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, 0, false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, 0, true)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from_vec(items))
    }
}

/// Shared, mutable string-keyed dictionary.
#[derive(Clone, Default)]
pub struct Dict(Arc<Mutex<FxHashMap<String, Value>>>);

impl Dict {
    pub fn new() -> Self {
        Dict::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Dict(Arc::new(Mutex::new(entries.into_iter().collect())))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.lock().get(key).cloned()
    }

    pub fn set(&self, key: String, value: Value) {
        self.0.lock().insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Entries sorted by key, copied out so no lock is held afterwards.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<_> = self
            .0
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn ptr_eq(&self, other: &Dict) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared, mutable array.
#[derive(Clone, Default)]
pub struct Array(Arc<Mutex<Vec<Value>>>);

impl Array {
    pub fn from_vec(items: Vec<Value>) -> Self {
        Array(Arc::new(Mutex::new(items)))
    }

    /// `array(n)`: `n` slots of `null`.
    pub fn with_len(len: usize) -> Self {
        Array::from_vec(vec![Value::Null; len])
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.lock().get(index).cloned()
    }

    /// Overwrite an existing slot; `false` if out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.lock().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Value) {
        self.0.lock().push(value);
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.lock().clone()
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Host object handle.
#[derive(Clone)]
pub struct HostValue {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl HostValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        HostValue {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    pub fn ptr_eq(&self, other: &HostValue) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
