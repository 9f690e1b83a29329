//! Realign Printer
//!
//! Serializes a decorated [`SourceFile`](realign_ir::SourceFile) back to
//! source text. Regions the rewrite engine did not touch are copied byte for
//! byte; rewritten struct bodies are rebuilt slot by slot.
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction
//! - [`printer`]: File and declaration printing

pub mod emitter;
pub mod printer;

pub use emitter::{Emitter, StringEmitter};
pub use printer::{print_file, print_node, rebuild_node};
