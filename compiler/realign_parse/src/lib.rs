//! Go source front end for realign.
//!
//! Produces a decorated [`SourceFile`] from Go source text:
//! 1. [`lexer`] tokenizes with automatic semicolon insertion.
//! 2. The parser finds every `type` declaration, struct type literal and
//!    integer constant.
//! 3. The resolver turns field types into layout shapes, looking names up
//!    in the file and then in its [`PackageScope`].
//! 4. Struct bodies are captured slot by slot with their decorations.
//!
//! Only type declarations are understood. Function bodies, expressions and
//! imports are skipped, so a file that does not compile may still parse.
//!
//! A package is handled in two passes: [`ParsedFile::parse`] every file,
//! pool their declarations with [`PackageScope::collect`], then
//! [`ParsedFile::build`] each file against the pooled scope.
//! [`parse_file`] does both for a package of one file.

mod ast;
mod body;
pub mod error;
pub mod lexer;
mod parser;
mod resolve;
mod scope;
pub mod token;

use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::slice;

use realign_diagnostic::LineOffsetTable;
use realign_ir::{Segment, SourceFile, StructNode};

pub use error::{LexError, ParseError};
pub use scope::PackageScope;

use ast::StructSite;
use lexer::Lexed;
use parser::{Module, Parser};
use resolve::Resolver;

/// One file lexed and parsed, with its types not yet resolved.
#[derive(Debug)]
pub struct ParsedFile {
    path: PathBuf,
    source: String,
    lexed: Lexed,
    module: Module,
}

impl ParsedFile {
    pub fn parse(path: impl Into<PathBuf>, source: String) -> Result<Self, ParseError> {
        let lexed = lexer::lex(&source)?;
        let module = Parser::new(&source, &lexed).parse_module()?;
        Ok(ParsedFile {
            path: path.into(),
            source,
            lexed,
            module,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The name in the `package` clause.
    pub fn package(&self) -> &str {
        &self.module.package
    }

    /// Comments that appear before the `package` clause.
    pub fn header_comments(&self) -> &[String] {
        &self.module.header_comments
    }

    pub(crate) fn module(&self) -> &Module {
        &self.module
    }

    /// Resolve and capture every struct type of the file.
    ///
    /// Every byte of the source ends up in exactly one segment of the
    /// result, so printing the segments unchanged reproduces the input.
    /// Struct types nested in another are owned by the slot they appear in.
    pub fn build(&self, scope: &PackageScope) -> SourceFile {
        let mut resolver = Resolver::new(&self.module, scope, &self.lexed.tokens);
        let lines = LineOffsetTable::build(&self.source);

        let mut file = SourceFile::new(self.path.clone());
        file.header_comments.clone_from(&self.module.header_comments);

        let mut cursor = 0;
        let mut sites = self.module.structs.iter().peekable();
        while let Some(site) = sites.next() {
            let node = self.build_node(site, &mut sites, &mut resolver, &lines);
            let range = node.span.to_range();
            if range.start > cursor {
                file.segments
                    .push(Segment::Text(self.source[cursor..range.start].to_string()));
            }
            file.segments.push(Segment::Struct(node));
            cursor = range.end;
        }
        if cursor < self.source.len() {
            file.segments
                .push(Segment::Text(self.source[cursor..].to_string()));
        }

        tracing::debug!(
            path = %file.path.display(),
            structs = self.module.structs.len(),
            "built file"
        );
        file
    }

    /// Build `site`, taking the sites nested inside it from `rest`.
    fn build_node(
        &self,
        site: &StructSite,
        rest: &mut Peekable<slice::Iter<'_, StructSite>>,
        resolver: &mut Resolver<'_>,
        lines: &LineOffsetTable,
    ) -> StructNode {
        let mut nested = Vec::new();
        while let Some(child) = rest.next_if(|next| next.keyword < site.close) {
            nested.push(self.build_node(child, rest, resolver, lines));
        }

        let record = resolver.record(site);
        let mut node = body::build_node(&self.source, &self.lexed, lines, site, record);
        for child in nested {
            let at = child.span.start;
            if let Some(slot) = node.slots.iter_mut().find(|slot| slot.span.contains(at)) {
                slot.nested.push(child);
            }
        }
        node
    }
}

/// Parse one Go source file as a package of its own.
pub fn parse_file(path: impl Into<PathBuf>, source: &str) -> Result<SourceFile, ParseError> {
    let parsed = ParsedFile::parse(path, source.to_string())?;
    let scope = PackageScope::collect([&parsed]);
    Ok(parsed.build(&scope))
}
