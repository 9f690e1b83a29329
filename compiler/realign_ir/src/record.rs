//! Type-resolved struct declarations.

use crate::{Span, Ty};

/// A named or embedded slot in a record.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    /// `None` for embedded fields.
    pub name: Option<String>,
    pub ty: Ty,
    pub span: Span,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Field {
            name: Some(name.into()),
            ty,
            span: Span::DUMMY,
        }
    }

    pub fn embedded(ty: Ty) -> Self {
        Field {
            name: None,
            ty,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// A struct declaration with its fields in declared order.
///
/// The field count is fixed for the lifetime of an analysis; reordering
/// produces a new `Record` rather than mutating this one.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Record {
    pub name: String,
    /// The `struct` keyword.
    pub span: Span,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>, span: Span, fields: Vec<Field>) -> Self {
        Record {
            name: name.into(),
            span,
            fields,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record viewed as an anonymous struct type.
    pub fn to_ty(&self) -> Ty {
        Ty::Struct(self.fields.clone())
    }
}
