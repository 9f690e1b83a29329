//! Source printer.
//!
//! Text segments and untouched struct declarations are emitted verbatim.
//! A rewritten declaration is rebuilt from its parts in the current slot
//! order, each slot carrying its own decorations. Verbatim text that
//! contains a rewritten inline struct is copied around it, with the inline
//! struct printed in place.

use realign_ir::{BodyLayout, Decoration, FieldSlot, Segment, SourceFile, StructNode};

use crate::emitter::{Emitter, StringEmitter};

/// Print a whole file.
pub fn print_file(file: &SourceFile) -> String {
    let capacity = file
        .segments
        .iter()
        .map(|seg| match seg {
            Segment::Text(text) => text.len(),
            Segment::Struct(node) => node.original.len(),
        })
        .sum();
    let mut out = StringEmitter::with_capacity(capacity);
    for seg in &file.segments {
        match seg {
            Segment::Text(text) => out.emit(text),
            Segment::Struct(node) => print_node(node, &mut out),
        }
    }
    out.output()
}

/// Print one declaration from `struct` through `}`.
pub fn print_node(node: &StructNode, out: &mut impl Emitter) {
    if !node.has_changes() {
        out.emit(&node.original);
    } else if node.dirty {
        rebuild_node(node, out);
    } else {
        let mut nested: Vec<&StructNode> = node.children().collect();
        nested.sort_by_key(|child| child.span.start);
        print_spliced(&node.original, node.span.start, &nested, out);
    }
}

/// Print a declaration from its parts, ignoring `original`.
pub fn rebuild_node(node: &StructNode, out: &mut impl Emitter) {
    out.emit("struct");
    out.emit(&node.head);
    out.emit("{");
    out.emit(&node.opening);
    match node.layout {
        BodyLayout::SingleLine => {
            for (i, slot) in node.slots.iter().enumerate() {
                if i > 0 {
                    out.emit("; ");
                }
                print_slot_text(slot, out);
            }
        }
        BodyLayout::MultiLine => {
            out.emit_newline();
            for slot in &node.slots {
                print_slot(slot, out);
            }
            print_lines(&node.closing, out);
        }
    }
    out.emit(&node.close);
    out.emit("}");
}

fn print_slot(slot: &FieldSlot, out: &mut impl Emitter) {
    print_lines(&slot.decorations.leading, out);
    out.emit(&slot.indent);
    print_slot_text(slot, out);
    out.emit(&slot.decorations.trailing);
    out.emit_newline();
}

fn print_slot_text(slot: &FieldSlot, out: &mut impl Emitter) {
    if slot.nested.iter().any(StructNode::has_changes) {
        let nested: Vec<&StructNode> = slot.nested.iter().collect();
        print_spliced(&slot.text, slot.span.start, &nested, out);
    } else {
        out.emit(&slot.text);
    }
}

/// Emit `text`, which begins at source offset `start`, printing each of
/// `nested` (sorted by position) in place of the bytes it was parsed from.
fn print_spliced(text: &str, start: u32, nested: &[&StructNode], out: &mut impl Emitter) {
    let mut cursor = 0;
    for child in nested {
        let from = child.span.start.saturating_sub(start) as usize;
        let to = child.span.end.saturating_sub(start) as usize;
        let Some(before) = text.get(cursor..from).filter(|_| to <= text.len()) else {
            continue;
        };
        out.emit(before);
        print_node(child, out);
        cursor = to;
    }
    out.emit(text.get(cursor..).unwrap_or_default());
}

fn print_lines(lines: &[Decoration], out: &mut impl Emitter) {
    for line in lines {
        out.emit(line.text());
        out.emit_newline();
    }
}
