//! Output destinations for the `print` native.
//!
//! The CLI prints to stdout; tests capture into a buffer so they can
//! assert on exactly what a script printed.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::EvalError;
use crate::Value;

#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    /// Nothing is captured.
    pub fn get_output(&self) -> String {
        String::new()
    }
}

/// Collects printed lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print handler selected by enum dispatch.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    /// Discards everything.
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout(h) => h.get_output(),
            Self::Buffer(h) => h.get_output(),
            Self::Silent => String::new(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(h) => h.lines(),
            Self::Stdout(_) | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

/// The `print` native: display forms of all arguments joined by spaces,
/// one line per call.
pub fn print_native(
    handler: SharedPrintHandler,
) -> impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static {
    move |args| {
        let line = args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        handler.println(&line);
        Ok(Value::Undefined)
    }
}
