//! Type shapes understood by the layout model.
//!
//! `Ty` is a closed tagged variant: one case per shape whose size, alignment
//! and pointer extent the layout model knows how to compute. Element types of
//! indirections (pointers, slices, maps, channels) are not kept because their
//! layout never depends on them.

use crate::Field;

/// Predeclared scalar kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BasicKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform `int`, one word wide.
    Int,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    /// Platform `uint`, one word wide.
    Uint,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    /// A string header: data pointer plus length.
    String,
    /// `unsafe.Pointer`.
    UnsafePointer,
}

impl BasicKind {
    /// Look up a predeclared identifier, including the `byte` and `rune` aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => BasicKind::Bool,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" | "rune" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "int" => BasicKind::Int,
            "uint8" | "byte" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uint" => BasicKind::Uint,
            "uintptr" => BasicKind::Uintptr,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            "complex64" => BasicKind::Complex64,
            "complex128" => BasicKind::Complex128,
            "string" => BasicKind::String,
            _ => return None,
        };
        Some(kind)
    }

    /// Size in bytes for kinds whose width does not depend on the platform.
    ///
    /// Word-sized kinds (`int`, `uint`, `uintptr`, `string`, `unsafe.Pointer`)
    /// return `None`.
    pub fn fixed_size(self) -> Option<u64> {
        match self {
            BasicKind::Bool | BasicKind::Int8 | BasicKind::Uint8 => Some(1),
            BasicKind::Int16 | BasicKind::Uint16 => Some(2),
            BasicKind::Int32 | BasicKind::Uint32 | BasicKind::Float32 => Some(4),
            BasicKind::Int64 | BasicKind::Uint64 | BasicKind::Float64 | BasicKind::Complex64 => {
                Some(8)
            }
            BasicKind::Complex128 => Some(16),
            BasicKind::Int
            | BasicKind::Uint
            | BasicKind::Uintptr
            | BasicKind::String
            | BasicKind::UnsafePointer => None,
        }
    }
}

/// A resolved type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Ty {
    Basic(BasicKind),
    /// `*T`
    Pointer,
    /// `[N]T`
    Array { len: u64, elem: Box<Ty> },
    /// `[]T`
    Slice,
    Map,
    Chan,
    /// A function value.
    Func,
    /// An interface value (type word plus data word).
    Interface,
    /// A nested record laid out in declared order.
    Struct(Vec<Field>),
    /// A defined type; layout follows `underlying`.
    Named { name: String, underlying: Box<Ty> },
    /// A shape the front end could not resolve. Laid out as one word that
    /// may hold a pointer.
    Opaque(String),
}

impl Ty {
    /// Shorthand for `[len]elem`.
    pub fn array(len: u64, elem: Ty) -> Ty {
        Ty::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Shorthand for a defined type.
    pub fn named(name: impl Into<String>, underlying: Ty) -> Ty {
        Ty::Named {
            name: name.into(),
            underlying: Box::new(underlying),
        }
    }

    /// Strip any number of `Named` wrappers.
    pub fn underlying(&self) -> &Ty {
        let mut ty = self;
        while let Ty::Named { underlying, .. } = ty {
            ty = underlying;
        }
        ty
    }

    /// Whether the type (after stripping names) could not be resolved.
    pub fn is_opaque(&self) -> bool {
        matches!(self.underlying(), Ty::Opaque(_))
    }
}

impl From<BasicKind> for Ty {
    fn from(kind: BasicKind) -> Self {
        Ty::Basic(kind)
    }
}

#[cfg(test)]
mod tests;
