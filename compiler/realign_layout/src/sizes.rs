//! Size, alignment and pointer extent of types.
//!
//! Follows the gc compiler's `types.Sizes` for a platform given by its word
//! size and maximum alignment:
//!
//! - arrays align like their element, structs like their most aligned field,
//!   everything else like its own size capped at `max_align`;
//! - structs lay fields out in declared order, padding each to its own
//!   alignment, and pad the total to the struct's alignment;
//! - a zero-sized final field in a non-empty struct occupies one byte so a
//!   pointer to it cannot point past the allocation.
//!
//! Pointer extent ("ptrdata") is the length of the prefix of a value the
//! garbage collector must scan: every byte past it is pointer-free.
//!
//! Source that does not compile may declare absurd array lengths, so every
//! sum saturates at `u64::MAX` instead of overflowing.

use realign_ir::{BasicKind, Field, Record, Ty};

use crate::Target;

/// Smallest multiple of `a` that is `>= x`, or `u64::MAX` when that does
/// not fit.
#[inline]
pub fn align_up(x: u64, a: u64) -> u64 {
    x.checked_next_multiple_of(a).unwrap_or(u64::MAX)
}

/// The three layout numbers of a type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct LayoutMetrics {
    pub size: u64,
    pub align: u64,
    pub ptr_data: u64,
}

/// Layout rules for one platform.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GcSizes {
    /// Bytes per pointer-sized word.
    pub word_size: u64,
    /// Largest natural alignment of any type.
    pub max_align: u64,
}

impl Default for GcSizes {
    fn default() -> Self {
        GcSizes::for_target(Target::default())
    }
}

impl GcSizes {
    pub const fn new(word_size: u64, max_align: u64) -> Self {
        GcSizes {
            word_size,
            max_align,
        }
    }

    pub const fn for_target(target: Target) -> Self {
        GcSizes::new(target.word_size, target.max_align)
    }

    /// All three metrics of `ty`.
    pub fn metrics(&self, ty: &Ty) -> LayoutMetrics {
        LayoutMetrics {
            size: self.size_of(ty),
            align: self.align_of(ty),
            ptr_data: self.ptr_data(ty),
        }
    }

    /// All three metrics of a record in its declared field order.
    pub fn record_metrics(&self, record: &Record) -> LayoutMetrics {
        LayoutMetrics {
            size: self.fields_size(&record.fields),
            align: self.fields_align(&record.fields),
            ptr_data: self.fields_ptr_data(&record.fields),
        }
    }

    pub fn align_of(&self, ty: &Ty) -> u64 {
        match ty.underlying() {
            // An array aligns like its element, but at least 1.
            Ty::Array { elem, .. } => self.align_of(elem),
            Ty::Struct(fields) => self.fields_align(fields),
            _ => {
                let a = self.size_of(ty);
                if a < 1 {
                    1
                } else if a > self.max_align {
                    self.max_align
                } else {
                    a
                }
            }
        }
    }

    pub fn size_of(&self, ty: &Ty) -> u64 {
        match ty.underlying() {
            Ty::Basic(kind) => match kind.fixed_size() {
                Some(size) => size,
                None if *kind == BasicKind::String => self.word_size.saturating_mul(2),
                None => self.word_size,
            },
            Ty::Array { len, elem } => len.saturating_mul(self.size_of(elem)),
            Ty::Slice => self.word_size.saturating_mul(3),
            Ty::Interface => self.word_size.saturating_mul(2),
            Ty::Struct(fields) => self.fields_size(fields),
            Ty::Pointer | Ty::Map | Ty::Chan | Ty::Func | Ty::Opaque(_) | Ty::Named { .. } => {
                self.word_size
            }
        }
    }

    pub fn ptr_data(&self, ty: &Ty) -> u64 {
        match ty.underlying() {
            Ty::Basic(BasicKind::String | BasicKind::UnsafePointer) => self.word_size,
            Ty::Basic(_) => 0,
            Ty::Pointer | Ty::Map | Ty::Chan | Ty::Func | Ty::Slice => self.word_size,
            Ty::Interface => self.word_size.saturating_mul(2),
            Ty::Array { len, elem } => {
                if *len == 0 {
                    return 0;
                }
                let elem_ptrs = self.ptr_data(elem);
                if elem_ptrs == 0 {
                    return 0;
                }
                // Everything up to the last element, then as far into the
                // last element as its pointers reach.
                (len - 1)
                    .saturating_mul(self.size_of(elem))
                    .saturating_add(elem_ptrs)
            }
            Ty::Struct(fields) => self.fields_ptr_data(fields),
            // Unknown shapes may hold a pointer.
            Ty::Opaque(_) | Ty::Named { .. } => self.word_size,
        }
    }

    /// Alignment of a struct with these fields.
    pub fn fields_align(&self, fields: &[Field]) -> u64 {
        fields
            .iter()
            .map(|f| self.align_of(&f.ty))
            .fold(1, u64::max)
    }

    /// Size of a struct with these fields in this order.
    pub fn fields_size(&self, fields: &[Field]) -> u64 {
        let Some(last) = fields.len().checked_sub(1) else {
            return 0;
        };

        let mut offset = 0;
        let mut max = 1;
        for (i, field) in fields.iter().enumerate() {
            let (a, mut sz) = (self.align_of(&field.ty), self.size_of(&field.ty));
            max = max.max(a);
            if i == last && sz == 0 && offset != 0 {
                sz = 1;
            }
            offset = align_up(offset, a).saturating_add(sz);
        }
        align_up(offset, max)
    }

    /// Pointer extent of a struct with these fields in this order.
    pub fn fields_ptr_data(&self, fields: &[Field]) -> u64 {
        let mut offset = 0;
        let mut ptr_end = 0;
        for field in fields {
            let (a, sz) = (self.align_of(&field.ty), self.size_of(&field.ty));
            let fp = self.ptr_data(&field.ty);
            offset = align_up(offset, a);
            if fp != 0 {
                ptr_end = offset.saturating_add(fp);
            }
            offset = offset.saturating_add(sz);
        }
        ptr_end
    }
}
