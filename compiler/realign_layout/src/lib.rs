//! Realign Layout
//!
//! Computes the in-memory layout of struct types under the Go gc
//! compiler's rules and finds the field order that minimizes first the
//! struct's size and then the number of leading bytes the garbage
//! collector has to scan for pointers.
//!
//! # Modules
//!
//! - [`sizes`]: size, alignment and pointer extent of any [`Ty`](realign_ir::Ty)
//! - [`order`]: the optimal-order solver and [`Permutation`]
//! - [`target`]: word size and maximum alignment per architecture
//!
//! # Example
//!
//! ```
//! use realign_ir::{BasicKind, Field, Record, Span, Ty};
//! use realign_layout::{optimal_order, GcSizes, Target};
//!
//! let record = Record::new("T", Span::DUMMY, vec![
//!     Field::new("a", Ty::Basic(BasicKind::Bool)),
//!     Field::new("b", Ty::Basic(BasicKind::Int32)),
//!     Field::new("c", Ty::Basic(BasicKind::Bool)),
//! ]);
//! let sizes = GcSizes::for_target(Target::AMD64);
//! assert_eq!(sizes.record_metrics(&record).size, 12);
//!
//! let optimal = optimal_order(&record, &sizes);
//! assert_eq!(optimal.permutation.as_slice(), &[1, 0, 2]);
//! assert_eq!(sizes.record_metrics(&optimal.record).size, 8);
//! ```

pub mod order;
pub mod sizes;
pub mod target;

pub use order::{optimal_order, OptimalOrder, Permutation};
pub use sizes::{align_up, GcSizes, LayoutMetrics};
pub use target::Target;
