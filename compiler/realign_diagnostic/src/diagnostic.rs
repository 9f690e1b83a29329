//! The diagnostic value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use realign_ir::Span;

/// A report about one struct declaration.
///
/// Immutable once built; the builder methods consume and return `self`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    /// File the declaration lives in, as given on the command line.
    pub file: PathBuf,
    /// The `struct` keyword.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 1-based byte column of `span.start`.
    pub column: u32,
    pub message: String,
    /// The whole file re-serialized with this declaration rewritten.
    pub replacement: Option<Arc<[u8]>>,
}

impl Diagnostic {
    pub fn new(file: impl Into<PathBuf>, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            file: file.into(),
            span,
            line: 1,
            column: 1,
            message: message.into(),
            replacement: None,
        }
    }

    /// Set the 1-based position of the span start.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    #[must_use]
    pub fn with_replacement(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.replacement = Some(bytes.into());
        self
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.file
    }

    #[inline]
    pub fn has_fix(&self) -> bool {
        self.replacement.is_some()
    }
}

/// `path:line:col: message`, the form editors and `go vet` users expect.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.message
        )
    }
}
