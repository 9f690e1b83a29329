//! Line and column lookup.
//!
//! Columns are 1-based byte offsets into the line, matching Go's
//! `token.Position`.

use realign_ir::Span;

/// Byte offset of every line start, for O(log L) position lookups.
///
/// ```
/// use realign_diagnostic::LineOffsetTable;
///
/// let table = LineOffsetTable::build("package a\n\ntype T struct{}\n");
/// assert_eq!(table.line_col(0), (1, 1));
/// assert_eq!(table.line_col(11), (3, 1));
/// assert_eq!(table.line_col(18), (3, 8));
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LineOffsetTable {
    /// `starts[i]` is where line `i + 1` begins.
    starts: Vec<u32>,
}

impl Default for LineOffsetTable {
    fn default() -> Self {
        LineOffsetTable { starts: vec![0] }
    }
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut starts = vec![0u32];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: u32) -> u32 {
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx + 1).unwrap_or(u32::MAX)
    }

    /// 1-based `(line, column)` of `offset`.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let start = self.line_start(line).unwrap_or(0);
        (line, offset.saturating_sub(start) + 1)
    }

    /// 1-based `(line, column)` of a span's start.
    #[inline]
    pub fn span_start(&self, span: Span) -> (u32, u32) {
        self.line_col(span.start)
    }

    /// Byte offset where 1-based `line` begins.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = usize::try_from(line.checked_sub(1)?).ok()?;
        self.starts.get(idx).copied()
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
