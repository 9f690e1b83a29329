//! The shared reporting channel.
//!
//! Files are analyzed in parallel and each produces its own diagnostics in
//! source order. The queue merges them and hands them back sorted by file,
//! then line, then column, so output is stable across runs.

use crate::Diagnostic;

/// Collects diagnostics from every file of a run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        DiagnosticQueue::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Number of queued diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in insertion order, without draining.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Sort by position and drain the queue.
    ///
    /// The sort is skipped when the diagnostics are already in order (the
    /// usual case for a single file).
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let already_sorted = self
            .diagnostics
            .windows(2)
            .all(|w| sort_key(&w[0]) <= sort_key(&w[1]));
        if !already_sorted {
            self.diagnostics.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        }
        std::mem::take(&mut self.diagnostics)
    }
}

impl Extend<Diagnostic> for DiagnosticQueue {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.diagnostics.extend(iter);
    }
}

fn sort_key(d: &Diagnostic) -> (&std::path::Path, u32, u32) {
    (d.file.as_path(), d.line, d.column)
}
