//! JSON Emitter
//!
//! One object per diagnostic inside a top-level array:
//!
//! ```text
//! [
//!   {"file": "a.go", "line": 3, "column": 8, "start": 24, "end": 30, "message": "..."}
//! ]
//! ```

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = write!(self.writer, ",");
        }
        self.first = false;

        // Built by hand; the shape is small and fixed.
        let fields = [
            (
                "file",
                format!("\"{}\"", escape_json(&diagnostic.file.to_string_lossy())),
            ),
            ("line", diagnostic.line.to_string()),
            ("column", diagnostic.column.to_string()),
            ("start", diagnostic.span.start.to_string()),
            ("end", diagnostic.span.end.to_string()),
            (
                "message",
                format!("\"{}\"", escape_json(&diagnostic.message)),
            ),
        ];

        let _ = write!(self.writer, "\n  {{");
        for (i, (key, value)) in fields.iter().enumerate() {
            let comma = trailing_comma(i, fields.len());
            let sep = if comma.is_empty() { "" } else { " " };
            let _ = write!(self.writer, "\"{key}\": {value}{comma}{sep}");
        }
        let _ = write!(self.writer, "}}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _reported: usize, _files: usize) {
        // The array is the whole answer.
    }
}
