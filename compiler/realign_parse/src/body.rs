//! Struct body capture.
//!
//! Turns a parsed struct site into a [`StructNode`]: every field slot keeps
//! its exact source text, and every blank line and comment inside the body is
//! attached to the slot it precedes or trails. The printer can then emit the
//! slots in any order and reproduce each decoration byte for byte.
//!
//! A multi-line body is captured line by line. A slot owns:
//! - the whitespace before its first token (`indent`),
//! - the rest of its last line (`trailing`),
//! - every line between the previous slot (or the `{` line) and itself
//!   (`leading`).
//!
//! Shapes that cannot be captured this way (two fields on one line, a field
//! on the brace line, a block comment running into the next line) mark the
//! node as not rewritable; it is still analyzed and printed verbatim.

use realign_diagnostic::LineOffsetTable;
use realign_ir::{BodyLayout, Decoration, FieldSlot, Record, SlotDecorations, Span, StructNode};

use crate::ast::StructSite;
use crate::lexer::Lexed;
use crate::token::{Comment, Token};

/// Line-oriented view of the source.
struct Lines<'a> {
    src: &'a str,
    table: &'a LineOffsetTable,
}

impl<'a> Lines<'a> {
    fn start(&self, line: u32) -> usize {
        self.table
            .line_start(line)
            .map_or(self.src.len(), |s| s as usize)
    }

    /// Offset of the `\n` ending `line`, or the end of the source.
    fn end(&self, line: u32) -> usize {
        self.table
            .line_start(line + 1)
            .map_or(self.src.len(), |next| next as usize - 1)
    }

    /// The text of `line` without its `\n`.
    fn text(&self, line: u32) -> &'a str {
        &self.src[self.start(line)..self.end(line)]
    }

    /// Decorations for the lines strictly between `above` and `below`.
    fn between(&self, above: u32, below: u32) -> Vec<Decoration> {
        (above + 1..below)
            .map(|line| {
                let text = self.text(line);
                if text.trim().is_empty() {
                    Decoration::Blank(text.to_string())
                } else {
                    Decoration::Comment(text.to_string())
                }
            })
            .collect()
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Comments lying strictly inside the braces.
fn body_comments<'c>(comments: &'c [Comment], open: &Token, close: &Token) -> &'c [Comment] {
    let lo = comments.partition_point(|c| c.span.start < open.span.end);
    let hi = comments.partition_point(|c| c.span.start < close.span.start);
    &comments[lo..hi.max(lo)]
}

pub(crate) fn build_node(
    src: &str,
    lexed: &Lexed,
    table: &LineOffsetTable,
    site: &StructSite,
    record: Record,
) -> StructNode {
    let tokens = &lexed.tokens;
    let (keyword, open, close) = (
        &tokens[site.keyword],
        &tokens[site.open],
        &tokens[site.close],
    );
    let comments = body_comments(&lexed.comments, open, close);

    let mut node = StructNode {
        record,
        span: keyword.span.merge(close.span),
        doc: site.doc.clone(),
        head: src[keyword.span.end as usize..open.span.start as usize].to_string(),
        opening: String::new(),
        opening_comments: Vec::new(),
        slots: Vec::new(),
        closing: Vec::new(),
        close: String::new(),
        layout: BodyLayout::MultiLine,
        original: src[keyword.span.merge(close.span).to_range()].to_string(),
        rewritable: true,
        dirty: false,
    };

    let spans: Vec<(Span, &Token, &Token)> = site
        .fields
        .iter()
        .map(|f| {
            let (first, last) = (&tokens[f.first], &tokens[f.last]);
            (first.span.merge(last.span), first, last)
        })
        .collect();
    let slot = |index: usize, span: Span| FieldSlot {
        index,
        names: site.fields[index].names.clone(),
        indent: String::new(),
        text: src[span.to_range()].to_string(),
        span,
        decorations: SlotDecorations::default(),
        nested: Vec::new(),
    };

    if open.line == close.line {
        node.layout = BodyLayout::SingleLine;
        node.rewritable = comments.is_empty();
        let inner_start = open.span.end as usize;
        let inner_end = close.span.start as usize;
        match (spans.first(), spans.last()) {
            (Some(first), Some(last)) => {
                node.opening = src[inner_start..first.0.start as usize].to_string();
                node.close = src[last.0.end as usize..inner_end].to_string();
            }
            _ => node.opening = src[inner_start..inner_end].to_string(),
        }
        node.slots = spans
            .iter()
            .enumerate()
            .map(|(i, (span, ..))| slot(i, *span))
            .collect();
        return node;
    }

    let lines = Lines { src, table };
    node.opening = src[open.span.end as usize..lines.end(open.line)].to_string();
    for comment in comments.iter().filter(|c| c.line == open.line) {
        if comment.end_line != comment.line {
            node.rewritable = false;
        }
        node.opening_comments
            .push(src[comment.span.to_range()].to_string());
    }

    let mut anchor = open.line;
    for (i, (span, first, last)) in spans.iter().enumerate() {
        let start_line = first.line;
        let end_line = last.end_line;
        let line_start = lines.start(start_line);

        let mut s = slot(i, *span);
        s.indent = src[line_start.min(span.start as usize)..span.start as usize].to_string();
        s.decorations.leading = lines.between(anchor, start_line);
        s.decorations.trailing = src[span.end as usize..lines.end(end_line)].to_string();

        let spills = comments
            .iter()
            .any(|c| c.line == end_line && c.span.start >= span.end && c.end_line != c.line);
        if start_line <= anchor || !is_blank(&s.indent) || spills {
            node.rewritable = false;
        }

        anchor = end_line.max(anchor);
        node.slots.push(s);
    }

    if anchor >= close.line {
        node.rewritable = false;
    }
    node.closing = lines.between(anchor, close.line);
    let close_start = lines.start(close.line).min(close.span.start as usize);
    node.close = src[close_start..close.span.start as usize].to_string();

    if !node.rewritable {
        tracing::debug!(name = %node.record.name, "struct body kept verbatim");
    }
    node
}
