//! Syntactic type expressions.
//!
//! Just enough structure to resolve a type's layout: element types of
//! indirections are kept so that nothing is lost, but the resolver never
//! looks through them.

use smallvec::SmallVec;

/// Length expression of an array type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArrayLen {
    /// An integer literal.
    Lit(u64),
    /// A single identifier, possibly a constant declared in the package.
    Const(String),
    /// Anything else (`[...]`, arithmetic, qualified constants).
    Other,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeExpr {
    /// `name`, `pkg.name`, optionally instantiated with type arguments.
    Name {
        pkg: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array { len: ArrayLen, elem: Box<TypeExpr> },
    Map,
    Chan,
    Func,
    Interface,
    Struct(Vec<FieldDecl>),
}

impl TypeExpr {
    /// An unqualified, uninstantiated name.
    pub fn name(name: impl Into<String>) -> Self {
        TypeExpr::Name {
            pkg: None,
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// A field declaration inside a struct type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    /// Empty for an embedded field.
    pub names: SmallVec<[String; 1]>,
    pub ty: TypeExpr,
    /// Token index of the first name (or of the embedded type).
    pub first: usize,
    /// Token index of the last token of the type or tag.
    pub last: usize,
}

/// Any `type` spec in the file, struct literals included.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDecl {
    pub name: String,
    /// Type parameter names of a generic declaration.
    pub params: Vec<String>,
    /// `type A = B`.
    pub alias: bool,
    pub ty: TypeExpr,
    /// Declared inside a function body, so invisible to other files.
    pub local: bool,
}

/// A struct type literal: a candidate for analysis.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructSite {
    /// The enclosing declaration, or the variable a free-standing struct
    /// type is declared for. May be empty.
    pub name: String,
    /// Type parameters in scope.
    pub params: Vec<String>,
    /// Doc comment texts: the group's doc first, then the type spec's own.
    pub doc: Vec<String>,
    /// Token indices of `struct`, `{` and `}`.
    pub keyword: usize,
    pub open: usize,
    pub close: usize,
    pub fields: Vec<FieldDecl>,
}
