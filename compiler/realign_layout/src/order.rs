//! Optimal field order.
//!
//! A single stable sort over per-field metrics. Grouping by descending
//! alignment removes interior padding; putting pointerful fields first, with
//! the ones that end in the most pointer-free bytes last among them, shortens
//! the prefix the collector scans.
//!
//! The result is optimal for the record alone. Reordering a nested record can
//! change the alignment seen by its container, and that is not revisited.

use std::cmp::Ordering;

use realign_ir::Record;

use crate::{GcSizes, LayoutMetrics};

/// A reordering of field indices: position `i` of the new arrangement holds
/// original field `self[i]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Permutation((0..len).collect())
    }

    /// Wrap `indices`, returning `None` unless they are a bijection on
    /// `0..indices.len()`.
    pub fn from_vec(indices: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; indices.len()];
        for &i in &indices {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                _ => return None,
            }
        }
        Some(Permutation(indices))
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(pos, &i)| pos == i)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Rearrange `items` into the permuted order.
    ///
    /// # Panics
    ///
    /// Panics if `items.len()` differs from the permutation's length.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        assert_eq!(
            items.len(),
            self.0.len(),
            "permutation applied to a list of the wrong length"
        );
        self.0.iter().map(|&i| items[i].clone()).collect()
    }
}

/// The solver's answer for one record.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OptimalOrder {
    /// The record with its fields rebuilt in the optimal order.
    pub record: Record,
    pub permutation: Permutation,
}

/// `Less` when field `a` belongs before field `b`.
fn compare(a: &LayoutMetrics, b: &LayoutMetrics) -> Ordering {
    // Zero-sized fields first.
    (b.size == 0)
        .cmp(&(a.size == 0))
        // Tighter alignment first.
        .then_with(|| b.align.cmp(&a.align))
        // Pointerful before pointer-free.
        .then_with(|| (b.ptr_data != 0).cmp(&(a.ptr_data != 0)))
        .then_with(|| {
            if a.ptr_data != 0 && b.ptr_data != 0 {
                // Least trailing scalar bytes first.
                a.size
                    .saturating_sub(a.ptr_data)
                    .cmp(&b.size.saturating_sub(b.ptr_data))
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| b.size.cmp(&a.size))
}

/// Compute the optimal arrangement of `record`'s fields.
pub fn optimal_order(record: &Record, sizes: &GcSizes) -> OptimalOrder {
    let mut elems: Vec<(usize, LayoutMetrics)> = record
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| (i, sizes.metrics(&field.ty)))
        .collect();

    // `sort_by` is stable, so fully tied fields keep their declared order.
    elems.sort_by(|(_, a), (_, b)| compare(a, b));

    let indices: Vec<usize> = elems.into_iter().map(|(i, _)| i).collect();
    tracing::trace!(record = %record.name, order = ?indices, "solved field order");

    let permutation = Permutation(indices);
    let fields = permutation.apply(&record.fields);
    OptimalOrder {
        record: Record::new(record.name.clone(), record.span, fields),
        permutation,
    }
}
