//! Whole-file parsing: segment boundaries and verbatim reconstruction.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use realign_ir::{BasicKind, BodyLayout, Segment, SourceFile, Ty};
use realign_parse::{parse_file, PackageScope, ParseError, ParsedFile};

const SOURCE: &str = r#"// Code generated by hand. DO NOT EDIT.

// Package shapes is a test fixture.
package shapes

import (
	"sync"
	"time"
)

const width = 8

// Point is a point.
//
// realign:check
type Point struct {
	x, y int32 // coordinates
	z    int64
}

type (
	// Cache holds things.
	Cache struct { // guarded by mu
		mu sync.Mutex

		// entries by key
		entries map[string]*Point
		hits    uint8
		buf     [width]byte `json:"-"`
		at      time.Time
	}

	Pair[K comparable, V any] struct{ k K; v V }
)

func (c *Cache) Get(key string) *Point {
	switch v := any(key).(type) {
	case string:
		_ = v
	}
	type local struct {
		ok  bool
		val float64
	}
	return c.entries[key]
}
"#;

/// Print every segment exactly as parsed.
fn verbatim(file: &SourceFile) -> String {
    file.segments
        .iter()
        .map(|seg| match seg {
            Segment::Text(text) => text.as_str(),
            Segment::Struct(node) => node.original.as_str(),
        })
        .collect()
}

#[test]
fn parse_file_reproduces_source() {
    let file = parse_file("shapes.go", SOURCE).unwrap();
    assert_eq!(verbatim(&file), SOURCE);
    assert!(!file.is_dirty());
}

#[test]
fn parse_file_finds_every_struct() {
    let file = parse_file("shapes.go", SOURCE).unwrap();
    let names: Vec<&str> = file.structs().map(|n| n.name()).collect();
    assert_eq!(names, vec!["Point", "Cache", "Pair", "local"]);
    assert_eq!(
        file.header_comments,
        vec![
            "// Code generated by hand. DO NOT EDIT.",
            "// Package shapes is a test fixture."
        ]
    );
}

#[test]
fn parse_file_attaches_docs_and_decorations() {
    let file = parse_file("shapes.go", SOURCE).unwrap();
    let nodes: Vec<_> = file.structs().collect();

    let point = nodes[0];
    assert_eq!(
        point.doc,
        vec!["// Point is a point.", "//", "// realign:check"]
    );
    assert_eq!(point.record.len(), 3);
    assert_eq!(point.slots.len(), 2);
    assert_eq!(point.slots[0].decorations.trailing, " // coordinates");

    let cache = nodes[1];
    assert_eq!(cache.doc, vec!["// Cache holds things."]);
    assert_eq!(cache.opening_comments, vec!["// guarded by mu"]);
    assert!(cache.rewritable);
    let entries = &cache.slots[1];
    assert_eq!(entries.indent, "\t\t");
    assert_eq!(entries.leading_comments().collect::<Vec<_>>(), vec!["\t\t// entries by key"]);
    assert_eq!(
        cache.record.fields[3].ty,
        Ty::array(8, Ty::Basic(BasicKind::Uint8))
    );
    assert_eq!(cache.close, "\t");

    let pair = nodes[2];
    assert!(pair.record.fields.iter().all(|f| f.ty.is_opaque()));
}

#[test]
fn parse_file_diagnostic_anchor_is_struct_keyword() {
    let file = parse_file("shapes.go", SOURCE).unwrap();
    let point = file.structs().next().unwrap();
    assert_eq!(&SOURCE[point.keyword().to_range()], "struct");
}

#[test]
fn parse_file_rejects_broken_source() {
    let err = parse_file("bad.go", "package a\n\ntype T struct {\n\ta int\n").unwrap_err();
    assert!(matches!(err, ParseError::Expected { .. }));

    let err = parse_file("bad.go", "package a\nvar s = \"open\n").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
}

#[test]
fn parse_file_without_structs_is_one_segment() {
    let src = "package a\n\nfunc f() {}\n";
    let file = parse_file("a.go", src).unwrap();
    assert_eq!(file.segments, vec![Segment::Text(src.to_string())]);
}

const NESTED: &str = "package shapes

type Outer struct {
	x  int64
	in struct {
		a bool
		b int64
		c bool
	}
}

var g struct{ a bool; b int64; c bool }
";

#[test]
fn inline_structs_are_nodes_of_their_own() {
    let file = parse_file("nested.go", NESTED).unwrap();
    assert_eq!(verbatim(&file), NESTED);

    let nodes: Vec<_> = file.structs().collect();
    let names: Vec<&str> = nodes.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["Outer", "Outer", "g"]);
    let top_level = file
        .segments
        .iter()
        .filter(|seg| matches!(seg, Segment::Struct(_)))
        .count();
    assert_eq!(top_level, 2);

    let (outer, inner, global) = (nodes[0], nodes[1], nodes[2]);
    assert_eq!(outer.slots[1].nested.len(), 1);
    assert_eq!(inner.record.len(), 3);
    assert_eq!(
        &NESTED[inner.span.to_range()],
        "struct {\n\t\ta bool\n\t\tb int64\n\t\tc bool\n\t}"
    );
    assert!(inner.rewritable);
    assert_eq!(global.layout, BodyLayout::SingleLine);
}

#[test]
fn package_scope_resolves_types_across_files() {
    let small = ParsedFile::parse("a.go", "package p\n\ntype Small struct{ x, y bool }\n".to_string()).unwrap();
    let t = ParsedFile::parse(
        "b.go",
        "package p\n\ntype T struct {\n\ta bool\n\ts Small\n\tb int32\n}\n".to_string(),
    )
    .unwrap();
    assert_eq!(t.package(), "p");

    let scope = PackageScope::collect([&small, &t]);
    let file = t.build(&scope);
    let node = file.structs().next().unwrap();
    assert!(matches!(node.record.fields[1].ty.underlying(), Ty::Struct(f) if f.len() == 2));

    // On its own the file cannot see `Small`.
    let alone = parse_file("b.go", t.source()).unwrap();
    assert!(alone.structs().next().unwrap().record.fields[1].ty.is_opaque());
}
