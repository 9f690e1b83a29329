//! Rewrite engine.
//!
//! Maps a field permutation back onto a declaration's source slots. The
//! permutation indexes record fields, so a slot naming several fields
//! (`a, b int`) is flattened to one entry per name first. Only the entry
//! for the first name carries the slot; the others are placeholders that
//! drop out after permuting. The slot therefore lands where its first name
//! was sent, and its other names stay with it.
//!
//! Decorations are detached into a table keyed by the slot's original
//! index before the slots move and reattached afterwards, so comments
//! follow their field regardless of position.

use realign_ir::{FieldSlot, SlotDecorations, SourceFile, Span};
use realign_layout::Permutation;
use rustc_hash::FxHashMap;

/// Arrange `slots` in the order `permutation` gives their fields.
///
/// # Panics
///
/// Panics if `permutation` does not cover exactly the fields the slots
/// declare.
pub fn reorder_slots(slots: Vec<FieldSlot>, permutation: &Permutation) -> Vec<FieldSlot> {
    let mut flat: Vec<Option<usize>> = Vec::with_capacity(permutation.len());
    for (pos, slot) in slots.iter().enumerate() {
        flat.push(Some(pos));
        flat.resize(flat.len() + slot.arity() - 1, None);
    }
    assert_eq!(
        flat.len(),
        permutation.len(),
        "permutation does not match the declared field count"
    );

    let mut decorations: FxHashMap<usize, SlotDecorations> = FxHashMap::default();
    let mut pending: Vec<Option<FieldSlot>> = slots
        .into_iter()
        .map(|mut slot| {
            decorations.insert(slot.index, slot.take_decorations());
            Some(slot)
        })
        .collect();

    let mut reordered: Vec<FieldSlot> = permutation
        .iter()
        .filter_map(|field| flat[field])
        .filter_map(|pos| pending[pos].take())
        .collect();
    assert!(
        pending.iter().all(Option::is_none),
        "permutation left a field slot behind"
    );

    for slot in &mut reordered {
        if let Some(decor) = decorations.remove(&slot.index) {
            slot.decorations = decor;
        }
    }
    reordered
}

/// Reorder the struct type of `file` whose `struct` keyword is `keyword`.
///
/// Returns `false`, leaving the file untouched, when there is no such
/// struct or its body cannot be rebuilt faithfully.
pub fn rewrite_struct(file: &mut SourceFile, keyword: Span, permutation: &Permutation) -> bool {
    let Some(node) = file.struct_mut(keyword) else {
        return false;
    };
    if !node.rewritable {
        tracing::debug!(name = %node.name(), "struct body kept verbatim, not rewriting");
        return false;
    }
    let slots = reorder_slots(std::mem::take(&mut node.slots), permutation);
    tracing::debug!(
        name = %node.name(),
        order = ?slots.iter().map(|s| s.index).collect::<Vec<_>>(),
        "rewrote field order"
    );
    node.replace_slots(slots);
    true
}
