// littlec - A single-pass, table-driven compiler for the LITTLE teaching language
// Copyright (C) 2026  The littlec authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Per-compilation state shared by scanner, parser and emitter.
//!
//! A [`Session`] owns the source line counter used for diagnostics and an
//! optional line-oriented trace sink. Keeping this state in an explicit
//! object (rather than process-wide globals) lets multiple compilations
//! run in one process without interfering.

use std::io::Write;

use crate::error::CompileError;

/// Mutable compilation context passed through every pipeline stage.
pub struct Session {
    line: u32,
    sink: Option<Box<dyn Write>>,
}

impl Session {
    /// Create a session with tracing disabled.
    pub fn new() -> Self {
        Self {
            line: 1,
            sink: None,
        }
    }

    /// Create a session that appends trace lines to the given sink.
    pub fn with_sink(sink: Box<dyn Write>) -> Self {
        Self {
            line: 1,
            sink: Some(sink),
        }
    }

    /// The current source line number (1-indexed).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Advance the line counter past a newline in the source.
    pub fn bump_line(&mut self) {
        self.line += 1;
    }

    /// Whether trace output is enabled.
    ///
    /// Callers formatting expensive trace lines should check this first.
    pub fn tracing(&self) -> bool {
        self.sink.is_some()
    }

    /// Append one line to the trace sink, if enabled.
    ///
    /// Sink write failures are deliberately swallowed: tracing must never
    /// turn a good compilation into a failed one.
    pub fn trace(&mut self, message: &str) {
        if let Some(sink) = &mut self.sink {
            let _ = writeln!(sink, "{}", message);
        }
    }

    /// Raise a compiler diagnostic at the current line.
    ///
    /// The diagnostic is also appended to the trace sink with an error
    /// marker before being returned to the caller.
    pub fn error(&mut self, message: impl Into<String>) -> CompileError {
        let message = message.into();
        let line = self.line;
        self.trace(&format!("*** Error on line {}: {} ***", line, message));
        CompileError::new(message, line)
    }

    /// Flush the trace sink. Called on every exit path of a compilation.
    pub fn flush(&mut self) {
        if let Some(sink) = &mut self.sink {
            let _ = sink.flush();
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Shared in-memory sink for observing trace output.
    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_counter() {
        let mut session = Session::new();
        assert_eq!(session.line(), 1);
        session.bump_line();
        session.bump_line();
        assert_eq!(session.line(), 3);
    }

    #[test]
    fn test_error_carries_line_and_traces_marker() {
        let sink = SharedSink::default();
        let mut session = Session::with_sink(Box::new(sink.clone()));
        session.bump_line();

        let err = session.error("Illegal operator");
        assert_eq!(err.line, 2);
        assert_eq!(err.message, "Illegal operator");

        let log = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(log, "*** Error on line 2: Illegal operator ***\n");
    }

    #[test]
    fn test_trace_disabled_by_default() {
        let mut session = Session::new();
        assert!(!session.tracing());
        // Must not panic without a sink.
        session.trace("ignored");
        session.flush();
    }
}
