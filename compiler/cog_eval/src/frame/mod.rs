//! Scope frames.
//!
//! A [`Frame`] holds one activation's variables and two parent links:
//!
//! - the *lexical* parent, followed for name resolution, mirrors the
//!   static block nesting (for a function activation it is the frame the
//!   closure captured);
//! - the *dynamic* parent, the frame that was running when this one was
//!   entered, followed when rebuilding a stack trace.
//!
//! Frames are reference counted and shared: a closure keeps the frame it
//! was declared in alive, and every closure created in that frame sees
//! later writes to it.

use std::fmt;
use std::sync::Arc;

use cog_ir::Position;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::scope::{BlockId, BlockKind};
use crate::Value;

/// Where a function activation came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub function: Arc<str>,
    /// Position of the call expression in the caller.
    pub pos: Position,
}

struct FrameData {
    vars: Mutex<FxHashMap<Arc<str>, Value>>,
    lexical: Option<Frame>,
    dynamic: Option<Frame>,
    block: BlockId,
    kind: BlockKind,
    call: Option<CallSite>,
}

/// Shared handle to one activation's bindings.
#[derive(Clone)]
pub struct Frame(Arc<FrameData>);

impl Frame {
    fn from_data(data: FrameData) -> Self {
        Frame(Arc::new(data))
    }

    /// Global frame of a program; doubles as the activation of `main`.
    pub fn global() -> Self {
        Frame::from_data(FrameData {
            vars: Mutex::new(FxHashMap::default()),
            lexical: None,
            dynamic: None,
            block: BlockId::ROOT,
            kind: BlockKind::Function,
            call: Some(CallSite {
                function: Arc::from("main"),
                pos: Position::DUMMY,
            }),
        })
    }

    /// Top-level entry that resolves names through `global` but has no
    /// caller. Interrupt handlers start from one of these.
    pub fn entry(global: &Frame, label: &str) -> Self {
        Frame::from_data(FrameData {
            vars: Mutex::new(FxHashMap::default()),
            lexical: Some(global.clone()),
            dynamic: None,
            block: BlockId::ROOT,
            kind: BlockKind::Function,
            call: Some(CallSite {
                function: Arc::from(label),
                pos: Position::DUMMY,
            }),
        })
    }

    /// Frame for a nested block run by this one.
    #[must_use]
    pub fn child(&self, block: BlockId, kind: BlockKind) -> Self {
        Frame::from_data(FrameData {
            vars: Mutex::new(FxHashMap::default()),
            lexical: Some(self.clone()),
            dynamic: Some(self.clone()),
            block,
            kind,
            call: None,
        })
    }

    /// Frame for a function call: names resolve through `env`, the
    /// closure's captured frame, while `caller` is remembered for
    /// stack traces.
    pub fn activation(env: &Frame, caller: &Frame, block: BlockId, call: CallSite) -> Self {
        Frame::from_data(FrameData {
            vars: Mutex::new(FxHashMap::default()),
            lexical: Some(env.clone()),
            dynamic: Some(caller.clone()),
            block,
            kind: BlockKind::Function,
            call: Some(call),
        })
    }

    /// Bind `name` in this frame, shadowing outer bindings.
    pub fn define(&self, name: impl Into<Arc<str>>, value: Value) {
        self.0.vars.lock().insert(name.into(), value);
    }

    /// Bind `name` here unless this frame already has it.
    pub fn declare(&self, name: &Arc<str>) {
        self.0
            .vars
            .lock()
            .entry(Arc::clone(name))
            .or_insert(Value::Undefined);
    }

    /// Value bound in this frame only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.0.vars.lock().get(name).cloned()
    }

    /// Resolve `name` along the lexical chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if let Some(value) = current.get_local(name) {
                return Some(value);
            }
            frame = current.0.lexical.as_ref();
        }
        None
    }

    /// Overwrite the nearest binding of `name`. A name bound nowhere on
    /// the chain becomes a global.
    pub fn assign(&self, name: &Arc<str>, value: Value) {
        let mut current = self;
        loop {
            {
                let mut vars = current.0.vars.lock();
                if let Some(slot) = vars.get_mut(&**name) {
                    *slot = value;
                    return;
                }
                if current.0.lexical.is_none() {
                    vars.insert(Arc::clone(name), value);
                    return;
                }
            }
            match &current.0.lexical {
                Some(parent) => current = parent,
                None => return,
            }
        }
    }

    /// Outermost frame of the lexical chain.
    pub fn root(&self) -> Frame {
        let mut current = self;
        while let Some(parent) = &current.0.lexical {
            current = parent;
        }
        current.clone()
    }

    pub fn lexical_parent(&self) -> Option<&Frame> {
        self.0.lexical.as_ref()
    }

    pub fn dynamic_parent(&self) -> Option<&Frame> {
        self.0.dynamic.as_ref()
    }

    pub fn block(&self) -> BlockId {
        self.0.block
    }

    pub fn kind(&self) -> BlockKind {
        self.0.kind
    }

    /// Set on function activations, `main`, and entry frames.
    pub fn call_site(&self) -> Option<&CallSite> {
        self.0.call.as_ref()
    }

    /// Names bound in this frame, sorted.
    pub fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.0.vars.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every binding in this frame. Breaks the closure/frame cycles
    /// that would otherwise keep a disposed program alive.
    pub fn clear(&self) {
        let vars = std::mem::take(&mut *self.0.vars.lock());
        drop(vars);
    }

    pub fn ptr_eq(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("block", &self.0.block)
            .field("kind", &self.0.kind)
            .field("call", &self.0.call)
            .field("vars", &self.0.vars.lock().len())
            .finish_non_exhaustive()
    }
}
