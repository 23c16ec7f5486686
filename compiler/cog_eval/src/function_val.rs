//! Function values.
//!
//! A [`Closure`] pairs a prototype with the frame it was created in.
//! Script prototypes are produced by the compiler and shared by every
//! closure made from the same function literal; native prototypes wrap a
//! host function.

use std::fmt;
use std::sync::Arc;

use cog_ir::Position;

use crate::errors::EvalError;
use crate::exec::Unit;
use crate::scope::BlockId;
use crate::{Frame, Value};

/// Host function callable from scripts.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// Compiled function literal.
pub struct ScriptFunction {
    pub name: Arc<str>,
    pub params: Vec<Arc<str>>,
    pub block: BlockId,
    pub body: Vec<Unit>,
    pub pos: Position,
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: Arc<str>,
    pub func: NativeFn,
    /// Run on the host's thread via the supervisor's hand-off.
    pub synchronized: bool,
}

#[derive(Clone)]
pub enum FuncProto {
    Script(Arc<ScriptFunction>),
    Native(NativeFunction),
}

pub struct Closure {
    pub proto: FuncProto,
    /// Frame captured at creation; `None` for natives.
    pub env: Option<Frame>,
}

impl Closure {
    pub fn script(function: Arc<ScriptFunction>, env: Frame) -> Self {
        Closure {
            proto: FuncProto::Script(function),
            env: Some(env),
        }
    }

    pub fn native(
        name: &str,
        synchronized: bool,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) -> Self {
        Closure {
            proto: FuncProto::Native(NativeFunction {
                name: Arc::from(name),
                func: Arc::new(func),
                synchronized,
            }),
            env: None,
        }
    }

    pub fn name(&self) -> &str {
        match &self.proto {
            FuncProto::Script(function) => &function.name,
            FuncProto::Native(native) => &native.name,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.proto, FuncProto::Native(_))
    }

    /// Declared parameter count; natives report zero.
    pub fn arity(&self) -> usize {
        match &self.proto {
            FuncProto::Script(function) => function.params.len(),
            FuncProto::Native(_) => 0,
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.proto {
            FuncProto::Script(function) => f
                .debug_struct("Closure")
                .field("name", &function.name)
                .field("params", &function.params)
                .field("block", &function.block)
                .finish(),
            FuncProto::Native(native) => f
                .debug_struct("Closure")
                .field("native", &native.name)
                .field("synchronized", &native.synchronized)
                .finish(),
        }
    }
}

/// Bind a host function as `name` in `frame`.
pub fn define_native(
    frame: &Frame,
    name: &str,
    synchronized: bool,
    func: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
) {
    let closure = Closure::native(name, synchronized, func);
    frame.define(name, Value::Function(Arc::new(closure)));
}
