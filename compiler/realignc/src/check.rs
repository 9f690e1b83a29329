//! Per-declaration analysis.
//!
//! Each struct moves from observed to exactly one of three outcomes:
//! suppressed by a marker, already optimal, or improvable with a message
//! and the permutation that achieves the optimum.

use realign_ir::StructNode;
use realign_layout::{optimal_order, GcSizes, LayoutMetrics, OptimalOrder};

use crate::markers::Markers;

/// Why a declaration was not analyzed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuppressReason {
    /// The doc comment carries the ignore marker.
    Ignored,
    /// Opt-in mode is on and the check marker is absent.
    NotOptedIn,
}

/// A better arrangement for one declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Improvement {
    pub message: String,
    pub current: LayoutMetrics,
    pub optimal: LayoutMetrics,
    pub order: OptimalOrder,
}

/// The outcome of analyzing one declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Suppressed(SuppressReason),
    Unchanged,
    Improvable(Box<Improvement>),
}

/// Analyze one struct declaration.
pub fn check_struct(node: &StructNode, sizes: &GcSizes, markers: Markers<'_>, opt_in: bool) -> Verdict {
    if markers.ignored(node) {
        return Verdict::Suppressed(SuppressReason::Ignored);
    }
    if opt_in && !markers.opted_in(node) {
        return Verdict::Suppressed(SuppressReason::NotOptedIn);
    }

    let current = sizes.record_metrics(&node.record);
    let order = optimal_order(&node.record, sizes);
    let optimal = sizes.record_metrics(&order.record);

    match improvement_message(current, optimal) {
        None => Verdict::Unchanged,
        Some(message) => Verdict::Improvable(Box::new(Improvement {
            message,
            current,
            optimal,
            order,
        })),
    }
}

/// The diagnostic text for a layout change, or `None` when nothing improves.
/// A size saving takes priority over a pointer-bytes saving.
pub fn improvement_message(current: LayoutMetrics, optimal: LayoutMetrics) -> Option<String> {
    if current.size != optimal.size {
        Some(format!(
            "{} bytes saved: record of size {} could be {}",
            current.size.saturating_sub(optimal.size),
            current.size,
            optimal.size
        ))
    } else if current.ptr_data != optimal.ptr_data {
        Some(format!(
            "{} bytes saved: record with {} pointer bytes could be {}",
            current.ptr_data.saturating_sub(optimal.ptr_data),
            current.ptr_data,
            optimal.ptr_data
        ))
    } else {
        None
    }
}
