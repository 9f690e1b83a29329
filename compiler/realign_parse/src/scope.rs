//! Package-wide declarations.
//!
//! Go resolves a type name against every file of its package, so the types
//! and constants each file declares at package level are pooled here before
//! any file is resolved. Declarations inside function bodies stay private
//! to their file.

use rustc_hash::FxHashMap;

use crate::ast::TypeDecl;
use crate::ParsedFile;

/// The package-level types and integer constants of a set of files.
#[derive(Clone, Debug, Default)]
pub struct PackageScope {
    decls: Vec<TypeDecl>,
    consts: FxHashMap<String, u64>,
}

impl PackageScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope shared by `files`, which must belong to one package.
    pub fn collect<'f>(files: impl IntoIterator<Item = &'f ParsedFile>) -> Self {
        let mut scope = PackageScope::new();
        for file in files {
            scope.add(file);
        }
        scope
    }

    /// Add the package-level declarations of `file`. A name declared twice
    /// keeps its first declaration.
    pub fn add(&mut self, file: &ParsedFile) {
        let module = file.module();
        self.decls
            .extend(module.decls.iter().filter(|decl| !decl.local).cloned());
        for (name, value) in &module.consts {
            self.consts.entry(name.clone()).or_insert(*value);
        }
    }

    pub(crate) fn decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.iter()
    }

    pub(crate) fn constant(&self, name: &str) -> Option<&u64> {
        self.consts.get(name)
    }
}
