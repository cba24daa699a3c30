//! Destination for `println` output.
//!
//! The interpreter never writes to stdout directly. `println` hands each
//! finished line to the print handler it was registered with, so a host can
//! capture program output (tests, an embedding) or discard it.
//!
//! Handlers are an enum rather than a trait object: there are three of them
//! and the set is closed.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes lines to the process's stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    /// Write `line` and a newline.
    ///
    /// A closed stdout (e.g. piping into `head`) is ignored rather than
    /// aborting the program.
    pub fn println(&self, line: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

/// Collects lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, line: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(line);
        buf.push('\n');
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Everything written so far, leaving the buffer empty.
    pub fn take_output(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

/// Where `println` output goes.
pub enum PrintHandlerImpl {
    /// Process stdout (default).
    Stdout(StdoutPrintHandler),
    /// In-memory capture.
    Buffer(BufferPrintHandler),
    /// Discard.
    Silent,
}

impl PrintHandlerImpl {
    /// Write one line; the newline is added here.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout(h) => h.println(line),
            Self::Buffer(h) => h.println(line),
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured output, clearing the capture.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.take_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }
}

/// Print handler shared between the interpreter and its `println` built-in.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Handler writing to stdout.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Handler capturing output in memory.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Handler discarding all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests;
