//! Diagnostic sinks for the decision function.

use crate::ports::diagnostic_port::DiagnosticSink;
use log::Level;

/// Forwards each line to the `log` facade, prefixed with the symbol.
pub struct LogSink {
    target: String,
    level: Level,
}

impl LogSink {
    pub fn new(target: &str, level: Level) -> Self {
        Self {
            target: target.to_string(),
            level,
        }
    }
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, message: &str) {
        log::log!(self.level, "[{}] {}", self.target, message);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _message: &str) {}
}
