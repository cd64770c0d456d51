//! Diagnostic output port.
//!
//! The decision function reports each decision point as a free-text line.
//! Sinks are owned by the caller, so evaluations never share output state.

pub trait DiagnosticSink {
    fn emit(&mut self, message: &str);
}

/// Collects lines in memory.
impl DiagnosticSink for Vec<String> {
    fn emit(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
