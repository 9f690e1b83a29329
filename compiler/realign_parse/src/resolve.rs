//! Type resolution.
//!
//! Maps syntactic type expressions to layout shapes. Names are looked up in
//! this order: type parameters of the enclosing declaration, types declared
//! in the same file, types declared by the other files of the package,
//! predeclared identifiers, and a small table of standard-library types
//! whose layout is fixed. Everything else becomes [`Ty::Opaque`], which the
//! layout model treats as one word that may hold a pointer.

use rustc_hash::{FxHashMap, FxHashSet};

use realign_ir::{BasicKind, Field, Record, Span, Ty};

use crate::ast::{ArrayLen, FieldDecl, StructSite, TypeDecl, TypeExpr};
use crate::parser::Module;
use crate::scope::PackageScope;
use crate::token::Token;

pub(crate) struct Resolver<'m> {
    module: &'m Module,
    scope: &'m PackageScope,
    tokens: &'m [Token],
    decls: FxHashMap<&'m str, &'m TypeDecl>,
    memo: FxHashMap<&'m str, Ty>,
    /// Declarations currently being resolved, for cycle detection.
    active: FxHashSet<&'m str>,
}

fn field(name: &str, ty: impl Into<Ty>) -> Field {
    Field::new(name, ty.into())
}

/// One field per name of `decl`, or one embedded field.
fn push_fields(fields: &mut Vec<Field>, decl: &FieldDecl, ty: Ty, span: Span) {
    if decl.names.is_empty() {
        fields.push(Field::embedded(ty).with_span(span));
    } else {
        fields.extend(
            decl.names
                .iter()
                .map(|name| Field::new(name.as_str(), ty.clone()).with_span(span)),
        );
    }
}

/// Internal layout of the runtime's mutex.
fn mutex() -> Ty {
    Ty::Struct(vec![
        field("state", BasicKind::Int32),
        field("sema", BasicKind::Uint32),
    ])
}

fn atomic(kind: BasicKind) -> Ty {
    Ty::Struct(vec![field("v", kind)])
}

/// Standard-library types whose layout does not depend on anything else.
fn well_known(pkg: &str, name: &str) -> Option<Ty> {
    let ty = match (pkg, name) {
        ("time", "Time") => Ty::Struct(vec![
            field("wall", BasicKind::Uint64),
            field("ext", BasicKind::Int64),
            field("loc", Ty::Pointer),
        ]),
        ("time", "Duration") => BasicKind::Int64.into(),
        ("time", "Month" | "Weekday") => BasicKind::Int.into(),
        ("sync", "Mutex") => mutex(),
        ("sync", "RWMutex") => Ty::Struct(vec![
            field("w", mutex()),
            field("writerSem", BasicKind::Uint32),
            field("readerSem", BasicKind::Uint32),
            field("readerCount", atomic(BasicKind::Int32)),
            field("readerWait", atomic(BasicKind::Int32)),
        ]),
        ("sync", "Once") => Ty::Struct(vec![
            field("done", atomic(BasicKind::Uint32)),
            field("m", mutex()),
        ]),
        ("sync", "WaitGroup") => Ty::Struct(vec![
            field("state", atomic(BasicKind::Uint64)),
            field("sema", BasicKind::Uint32),
        ]),
        ("atomic", "Int32") => atomic(BasicKind::Int32),
        ("atomic", "Uint32" | "Bool") => atomic(BasicKind::Uint32),
        ("atomic", "Int64") => atomic(BasicKind::Int64),
        ("atomic", "Uint64") => atomic(BasicKind::Uint64),
        ("atomic", "Uintptr") => atomic(BasicKind::Uintptr),
        ("atomic", "Value") => Ty::Struct(vec![field("v", Ty::Interface)]),
        ("atomic", "Pointer") => Ty::Struct(vec![
            field("_", Ty::array(0, Ty::Pointer)),
            field("v", BasicKind::UnsafePointer),
        ]),
        _ => return None,
    };
    Some(Ty::named(format!("{pkg}.{name}"), ty))
}

impl<'m> Resolver<'m> {
    pub(crate) fn new(module: &'m Module, scope: &'m PackageScope, tokens: &'m [Token]) -> Self {
        let mut decls = FxHashMap::default();
        // Local types may reuse a name; the first declaration wins.
        for decl in module.decls.iter().chain(scope.decls()) {
            decls.entry(decl.name.as_str()).or_insert(decl);
        }
        Resolver {
            module,
            scope,
            tokens,
            decls,
            memo: FxHashMap::default(),
            active: FxHashSet::default(),
        }
    }

    /// The record declared by a struct site, each field spanning its
    /// declaration in this file.
    pub(crate) fn record(&mut self, site: &StructSite) -> Record {
        let keyword = self.tokens[site.keyword].span;
        let mut fields = Vec::new();
        for decl in &site.fields {
            let ty = self.resolve(&decl.ty, &site.params);
            let span = self.tokens[decl.first]
                .span
                .merge(self.tokens[decl.last].span);
            push_fields(&mut fields, decl, ty, span);
        }
        Record::new(site.name.clone(), keyword, fields)
    }

    pub(crate) fn resolve(&mut self, expr: &TypeExpr, params: &[String]) -> Ty {
        match expr {
            TypeExpr::Name { pkg, name, .. } => self.resolve_name(pkg.as_deref(), name, params),
            TypeExpr::Pointer(_) => Ty::Pointer,
            TypeExpr::Slice(_) => Ty::Slice,
            TypeExpr::Map => Ty::Map,
            TypeExpr::Chan => Ty::Chan,
            TypeExpr::Func => Ty::Func,
            TypeExpr::Interface => Ty::Interface,
            TypeExpr::Array { len, elem } => {
                let len = match len {
                    ArrayLen::Lit(n) => Some(*n),
                    ArrayLen::Const(name) => self
                        .module
                        .local_consts
                        .get(name)
                        .or_else(|| self.module.consts.get(name))
                        .or_else(|| self.scope.constant(name))
                        .copied(),
                    ArrayLen::Other => None,
                };
                match len {
                    Some(len) => Ty::array(len, self.resolve(elem, params)),
                    None => Ty::Opaque("array of unknown length".to_string()),
                }
            }
            TypeExpr::Struct(fields) => Ty::Struct(self.fields(fields, params)),
        }
    }

    /// Fields of a struct type. A declaration may come from another file,
    /// so no spans are attached.
    fn fields(&mut self, decls: &[FieldDecl], params: &[String]) -> Vec<Field> {
        let mut fields = Vec::new();
        for decl in decls {
            let ty = self.resolve(&decl.ty, params);
            push_fields(&mut fields, decl, ty, Span::DUMMY);
        }
        fields
    }

    fn resolve_name(&mut self, pkg: Option<&str>, name: &str, params: &[String]) -> Ty {
        match pkg {
            Some("unsafe") if name == "Pointer" => BasicKind::UnsafePointer.into(),
            Some(pkg) => {
                well_known(pkg, name).unwrap_or_else(|| Ty::Opaque(format!("{pkg}.{name}")))
            }
            None if params.iter().any(|p| p == name) => Ty::Opaque(name.to_string()),
            None => {
                if let Some(&decl) = self.decls.get(name) {
                    return self.resolve_decl(decl);
                }
                match (BasicKind::from_name(name), name) {
                    (Some(kind), _) => kind.into(),
                    (None, "error" | "any" | "comparable") => Ty::Interface,
                    (None, _) => Ty::Opaque(name.to_string()),
                }
            }
        }
    }

    fn resolve_decl(&mut self, decl: &'m TypeDecl) -> Ty {
        let name = decl.name.as_str();
        if let Some(ty) = self.memo.get(name) {
            return ty.clone();
        }
        if !self.active.insert(name) {
            tracing::trace!(name, "cyclic type definition");
            return Ty::Opaque(name.to_string());
        }
        let underlying = self.resolve(&decl.ty, &decl.params);
        self.active.remove(name);

        let ty = if decl.alias {
            underlying
        } else {
            Ty::named(name, underlying)
        };
        self.memo.insert(name, ty.clone());
        ty
    }
}
