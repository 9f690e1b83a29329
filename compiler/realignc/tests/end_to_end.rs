//! Whole runs over Go packages written to temporary directories.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use realignc::driver::{analyze_paths, apply_fixes, EXIT_DIAGNOSTICS, EXIT_FAILURE};
use realignc::Config;

const SERVER: &str = "package server

import \"time\"

// Conn is one client connection.
type Conn struct {
	// open is set once the handshake finishes.
	open bool // guarded by mu

	id      uint64
	retries uint8
	started time.Time
	name    string `json:\"name\"`
}

// Stats is already compact.
type Stats struct {
	hits   uint64
	misses uint64
}

// Pair is ignored on purpose.
// realign:ignore
type Pair struct {
	a bool
	b int64
	c bool
}
";

const SERVER_FIXED: &str = "package server

import \"time\"

// Conn is one client connection.
type Conn struct {
	started time.Time
	name    string `json:\"name\"`

	id      uint64
	// open is set once the handshake finishes.
	open bool // guarded by mu
	retries uint8
}

// Stats is already compact.
type Stats struct {
	hits   uint64
	misses uint64
}

// Pair is ignored on purpose.
// realign:ignore
type Pair struct {
	a bool
	b int64
	c bool
}
";

const NODE: &str = "package server

type node struct {
	val  int32
	next *node
	tag  [32]byte
}
";

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn package() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "server/conn.go", SERVER);
    write(dir.path(), "server/node.go", NODE);
    write(dir.path(), "server/conn_test.go", NODE);
    write(dir.path(), "server/api.pb.go", NODE);
    dir
}

fn all(dir: &Path) -> Vec<String> {
    vec![format!("{}/...", dir.display())]
}

fn messages(config: &Config, dir: &Path) -> Vec<String> {
    analyze_paths(config, &all(dir))
        .diagnostics
        .iter()
        .map(|d| {
            let rel = d.file.strip_prefix(dir).unwrap().display().to_string();
            format!("{rel}:{}:{}: {}", d.line, d.column, d.message)
        })
        .collect()
}

#[test]
fn report_only_touches_nothing() {
    let dir = package();
    let analysis = analyze_paths(&Config::default(), &all(dir.path()));

    assert!(analysis.errors.is_empty());
    assert_eq!(analysis.files_analyzed, 2);
    assert_eq!(analysis.exit_code(), EXIT_DIAGNOSTICS);
    assert!(analysis.fixes.is_empty());
    assert_eq!(
        messages(&Config::default(), dir.path()),
        vec![
            "server/conn.go:6:11: 8 bytes saved: record of size 64 could be 56",
            "server/node.go:3:11: 8 bytes saved: record with 16 pointer bytes could be 8",
        ]
    );
    assert_eq!(fs::read_to_string(dir.path().join("server/conn.go")).unwrap(), SERVER);
}

#[test]
fn apply_rewrites_and_second_pass_is_clean() {
    let dir = package();
    let config = Config {
        apply: true,
        ..Config::default()
    };
    let analysis = analyze_paths(&config, &all(dir.path()));
    assert_eq!(analysis.fixes.len(), 2);
    assert!(apply_fixes(&analysis.fixes).is_empty());

    assert_eq!(
        fs::read_to_string(dir.path().join("server/conn.go")).unwrap(),
        SERVER_FIXED
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("server/node.go")).unwrap(),
        "package server\n\ntype node struct {\n\tnext *node\n\tval  int32\n\ttag  [32]byte\n}\n"
    );
    // Skipped files are never rewritten.
    assert_eq!(fs::read_to_string(dir.path().join("server/conn_test.go")).unwrap(), NODE);

    let again = analyze_paths(&config, &all(dir.path()));
    assert!(again.diagnostics.is_empty(), "{:?}", again.diagnostics);
    assert_eq!(again.exit_code(), 0);
}

#[test]
fn test_and_generated_files_on_request() {
    let dir = package();
    let config = Config {
        test_files: true,
        generated_files: true,
        ..Config::default()
    };
    let analysis = analyze_paths(&config, &all(dir.path()));
    assert_eq!(analysis.files_analyzed, 4);
    assert_eq!(analysis.diagnostics.len(), 4);
}

#[test]
fn opt_in_mode() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.go",
        "package a\n\n// realign:check\ntype In struct {\n\ta bool\n\tb int64\n\tc bool\n}\n\ntype Out struct {\n\ta bool\n\tb int64\n\tc bool\n}\n",
    );
    let config = Config {
        opt_in: true,
        ..Config::default()
    };
    let got = messages(&config, dir.path());
    assert_eq!(got, vec!["a.go:4:9: 8 bytes saved: record of size 24 could be 16"]);
}

#[test]
fn excluded_dirs_are_skipped() {
    let dir = package();
    write(dir.path(), "server/internal/gen/x.go", NODE);
    let config = Config {
        exclude_dirs: vec![dir.path().join("server/internal")],
        ..Config::default()
    };
    let analysis = analyze_paths(&config, &all(dir.path()));
    assert_eq!(analysis.files_analyzed, 2);
}

#[test]
fn broken_files_do_not_stop_the_run() {
    let dir = package();
    write(dir.path(), "server/broken.go", "package server\n\ntype T struct {\n\ta \"unterminated\n}\n");
    let analysis = analyze_paths(&Config::default(), &all(dir.path()));
    assert_eq!(analysis.errors.len(), 1);
    assert!(analysis.errors[0].to_string().contains("broken.go"));
    assert_eq!(analysis.diagnostics.len(), 2);
    assert_eq!(analysis.exit_code(), EXIT_FAILURE);
}

#[cfg(unix)]
#[test]
fn one_failed_apply_does_not_block_others() {
    let dir = package();
    let config = Config {
        apply: true,
        ..Config::default()
    };
    let analysis = analyze_paths(&config, &all(dir.path()));
    assert_eq!(analysis.fixes.len(), 2);

    // Swap conn.go for a symlink between analysis and apply.
    let conn = dir.path().join("server/conn.go");
    let real = dir.path().join("server/real.txt");
    fs::rename(&conn, &real).unwrap();
    std::os::unix::fs::symlink(&real, &conn).unwrap();

    let failures = apply_fixes(&analysis.fixes);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, conn);
    assert_eq!(failures[0].1.to_string(), "not a regular file, skipping");
    assert_eq!(fs::read_to_string(&real).unwrap(), SERVER);
    assert!(fs::read_to_string(dir.path().join("server/node.go"))
        .unwrap()
        .contains("\tnext *node\n\tval  int32\n\ttag  [32]byte\n"));
}

#[test]
fn types_resolve_across_the_files_of_a_package() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "p/t.go", "package p\n\ntype T struct {\n\ta bool\n\ts Small\n\tb int32\n}\n");
    write(dir.path(), "p/small.go", "package p\n\ntype Small struct{ x, y bool }\n");
    // Same directory, other package, read first: its `Small` stays out of `p`.
    write(dir.path(), "p/a_test.go", "package p_test\n\ntype Small struct{ p *int }\n");

    let config = Config {
        test_files: true,
        ..Config::default()
    };
    let analysis = analyze_paths(&config, &all(dir.path()));
    assert!(analysis.errors.is_empty());
    assert_eq!(analysis.files_analyzed, 3);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
}

#[test]
fn skipped_files_still_declare_types() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "p/a.go", "package p\n\ntype T struct {\n\ta bool\n\ts Small\n\tb int32\n}\n");
    write(dir.path(), "p/small.pb.go", "package p\n\ntype Small struct{ x, y bool }\n");

    let analysis = analyze_paths(&Config::default(), &all(dir.path()));
    assert_eq!(analysis.files_analyzed, 1);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
}
