//! Decorated syntax tree.
//!
//! A [`SourceFile`] is the whole file as a sequence of verbatim text
//! segments interleaved with the struct declarations the analyzer may
//! rewrite. Every byte of the original file lives in exactly one segment,
//! so printing an untouched tree reproduces the input.
//!
//! Comments and blank lines inside a struct body are owned by the field
//! slot they precede (or trail), never by a position. Moving a slot moves
//! its decorations with it.
//!
//! Struct types written inline inside a field's type are nodes of their
//! own, owned by that field's slot, so they move with it too.

use std::path::PathBuf;

use smallvec::SmallVec;

use crate::{Record, Span};

/// One non-field line inside a struct body, kept byte-for-byte without its
/// terminating `\n`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Decoration {
    /// A line holding only whitespace.
    Blank(String),
    /// A line holding a comment (or part of a multi-line block comment).
    Comment(String),
}

impl Decoration {
    /// The raw line text.
    pub fn text(&self) -> &str {
        match self {
            Decoration::Blank(text) | Decoration::Comment(text) => text,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Decoration::Comment(_))
    }
}

/// Decorations attached to a single field slot.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SlotDecorations {
    /// Blank lines and comment lines directly above the slot.
    pub leading: Vec<Decoration>,
    /// Everything after the slot's last token up to the end of its line:
    /// spacing, a trailing comment, an explicit `;`, a `\r`.
    pub trailing: String,
}

impl SlotDecorations {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

/// A field declaration as written in source.
///
/// A slot may name several fields (`a, b int`); it then stands for
/// `names.len()` consecutive fields of the resolved [`Record`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldSlot {
    /// Position of the slot in the declaration as parsed.
    pub index: usize,
    /// Empty for an embedded field.
    pub names: SmallVec<[String; 1]>,
    /// Whitespace before the first token on the slot's line.
    pub indent: String,
    /// Source text from the first name (or embedded type) to the end of the
    /// type or tag.
    pub text: String,
    pub span: Span,
    pub decorations: SlotDecorations,
    /// Struct types written inside `text`, in source order.
    pub nested: Vec<StructNode>,
}

impl FieldSlot {
    /// Number of record fields this slot declares.
    #[inline]
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }

    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// Detach the decorations, leaving empty ones behind.
    pub fn take_decorations(&mut self) -> SlotDecorations {
        std::mem::take(&mut self.decorations)
    }

    /// Comment lines directly above the slot.
    pub fn leading_comments(&self) -> impl Iterator<Item = &str> {
        self.decorations
            .leading
            .iter()
            .filter(|d| d.is_comment())
            .map(Decoration::text)
    }
}

/// Whether the body spans several lines or sits between braces on one line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BodyLayout {
    MultiLine,
    SingleLine,
}

/// A struct type literal: the type of a declaration, or written inline
/// inside another type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructNode {
    /// The resolved fields, one per name.
    pub record: Record,
    /// From `struct` through `}`.
    pub span: Span,
    /// Doc comment lines of the enclosing declaration (group doc first,
    /// then the type spec's own doc).
    pub doc: Vec<String>,
    /// Text between the `struct` keyword and `{`.
    pub head: String,
    /// Multi-line: the rest of the `{` line. Single-line: text between `{`
    /// and the first field.
    pub opening: String,
    /// Comments found on the `{` line.
    pub opening_comments: Vec<String>,
    pub slots: Vec<FieldSlot>,
    /// Lines between the last field and the closing brace.
    pub closing: Vec<Decoration>,
    /// Multi-line: text from the start of the `}` line to `}`. Single-line:
    /// text between the last field and `}`.
    pub close: String,
    pub layout: BodyLayout,
    /// The declaration text from `struct` through `}` as parsed.
    pub original: String,
    /// False when the body has a shape the printer cannot rebuild
    /// faithfully (several fields on one line, a field on the `{` line).
    pub rewritable: bool,
    /// Set once the slots have been permuted.
    pub dirty: bool,
}

impl StructNode {
    #[inline]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Span of the `struct` keyword.
    #[inline]
    pub fn keyword(&self) -> Span {
        self.record.span
    }

    /// Number of record fields declared by all slots.
    pub fn field_count(&self) -> usize {
        self.slots.iter().map(FieldSlot::arity).sum()
    }

    /// Replace the slots with a new arrangement and mark the node dirty.
    pub fn replace_slots(&mut self, slots: Vec<FieldSlot>) {
        self.slots = slots;
        self.dirty = true;
    }

    /// Inline struct types directly inside this one, in current slot order.
    pub fn children(&self) -> impl Iterator<Item = &StructNode> {
        self.slots.iter().flat_map(|slot| slot.nested.iter())
    }

    /// Whether this node or any node inside it was rewritten.
    pub fn has_changes(&self) -> bool {
        self.dirty || self.children().any(StructNode::has_changes)
    }

    fn preorder<'a>(&'a self, out: &mut Vec<&'a StructNode>) {
        out.push(self);
        for child in self.children() {
            child.preorder(out);
        }
    }

    /// The node whose `struct` keyword is `keyword`: this one or one nested
    /// inside it.
    pub fn find_mut(&mut self, keyword: Span) -> Option<&mut StructNode> {
        if self.keyword() == keyword {
            return Some(self);
        }
        if !self.span.contains(keyword.start) {
            return None;
        }
        self.slots
            .iter_mut()
            .filter(|slot| slot.span.contains(keyword.start))
            .flat_map(|slot| slot.nested.iter_mut())
            .find_map(|child| child.find_mut(keyword))
    }
}

/// A piece of a source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Segment {
    /// Bytes printed exactly as read.
    Text(String),
    Struct(StructNode),
}

/// A parsed source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Comments that appear before the `package` clause.
    pub header_comments: Vec<String>,
    pub segments: Vec<Segment>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile {
            path: path.into(),
            header_comments: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Every struct type, each container before the types nested in it.
    pub fn structs(&self) -> impl Iterator<Item = &StructNode> {
        let mut nodes = Vec::new();
        for seg in &self.segments {
            if let Segment::Struct(node) = seg {
                node.preorder(&mut nodes);
            }
        }
        nodes.into_iter()
    }

    /// The `struct` keyword of every struct type, in [`structs`] order.
    /// Keywords identify nodes for [`struct_mut`] however slots move.
    ///
    /// [`structs`]: SourceFile::structs
    /// [`struct_mut`]: SourceFile::struct_mut
    pub fn struct_keywords(&self) -> Vec<Span> {
        self.structs().map(StructNode::keyword).collect()
    }

    /// The struct type whose `struct` keyword is `keyword`, at any depth.
    pub fn struct_mut(&mut self, keyword: Span) -> Option<&mut StructNode> {
        self.segments.iter_mut().find_map(|seg| match seg {
            Segment::Struct(node) => node.find_mut(keyword),
            Segment::Text(_) => None,
        })
    }

    /// Whether any struct body was rewritten.
    pub fn is_dirty(&self) -> bool {
        self.segments.iter().any(|seg| match seg {
            Segment::Struct(node) => node.has_changes(),
            Segment::Text(_) => false,
        })
    }
}
