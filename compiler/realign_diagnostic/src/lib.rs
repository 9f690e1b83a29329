//! Diagnostic reporting for realign.
//!
//! A [`Diagnostic`] is produced once per struct whose layout can be
//! improved. It records where the declaration's `struct` keyword sits, the
//! message, and (in fix mode) the complete rewritten file it implies.
//!
//! Diagnostics from every file are collected into a [`DiagnosticQueue`],
//! sorted by file and position, and written out by one of the
//! [`emitter`]s.

mod diagnostic;
pub mod emitter;
pub mod queue;
pub mod span_utils;

pub use diagnostic::Diagnostic;
pub use queue::DiagnosticQueue;
pub use span_utils::LineOffsetTable;
