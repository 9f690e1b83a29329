//! Realign IR - shared data types
//!
//! This crate holds the data model every other realign crate speaks:
//! - [`Span`] for byte ranges in a source file
//! - [`Ty`], the closed set of type shapes the layout model understands
//! - [`Field`] and [`Record`], a type-resolved struct declaration
//! - [`SourceFile`] and [`StructNode`], the decorated syntax tree the
//!   rewrite engine permutes and re-serializes
//!
//! Nothing here computes layouts or touches the file system.

mod record;
mod span;
pub mod syntax;
mod ty;

pub use record::{Field, Record};
pub use span::{Span, SpanError};
pub use syntax::{BodyLayout, Decoration, FieldSlot, Segment, SlotDecorations, SourceFile, StructNode};
pub use ty::{BasicKind, Ty};
