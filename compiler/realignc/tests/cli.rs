//! The `realign` binary: flags, output streams and exit status.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const UNALIGNED: &str = "package a

type T struct {
	a bool
	b int64
	c bool
}
";

const ALIGNED: &str = "package a

type T struct {
	b int64
	a bool
	c bool
}
";

fn realign(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_realign"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run realign")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn package() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/gen")).unwrap();
    fs::write(dir.path().join("a/t.go"), UNALIGNED).unwrap();
    fs::write(dir.path().join("a/gen/g.go"), UNALIGNED).unwrap();
    dir
}

#[test]
fn version_flag() {
    let dir = tempfile::tempdir().unwrap();
    for flag in ["-V", "--version"] {
        let out = realign(dir.path(), &[flag]);
        assert!(out.status.success());
        assert!(stdout(&out).starts_with(&format!("realign version {}", env!("CARGO_PKG_VERSION"))));
    }
}

#[test]
fn reports_on_stderr_and_exits_three() {
    let dir = package();
    let out = realign(dir.path(), &["-color=never", "./..."]);
    assert_eq!(out.status.code(), Some(3));
    assert_eq!(
        stderr(&out),
        "a/gen/g.go:3:8: 8 bytes saved: record of size 24 could be 16\n\
         a/t.go:3:8: 8 bytes saved: record of size 24 could be 16\n\
         realign: 2 structs in 2 files can be reordered\n"
    );
    assert_eq!(fs::read_to_string(dir.path().join("a/t.go")).unwrap(), UNALIGNED);
}

#[test]
fn directory_argument_is_not_recursive() {
    let dir = package();
    let out = realign(dir.path(), &["-color", "never", "a"]);
    assert_eq!(out.status.code(), Some(3));
    assert_eq!(
        stderr(&out),
        "a/t.go:3:8: 8 bytes saved: record of size 24 could be 16\n\
         realign: 1 struct in 1 file can be reordered\n"
    );
}

#[test]
fn fix_then_clean() {
    let dir = package();
    let out = realign(dir.path(), &["-fix", "-exclude_dirs=a/gen", "./..."]);
    assert_eq!(out.status.code(), Some(3));
    assert_eq!(fs::read_to_string(dir.path().join("a/t.go")).unwrap(), ALIGNED);
    assert_eq!(fs::read_to_string(dir.path().join("a/gen/g.go")).unwrap(), UNALIGNED);

    let out = realign(dir.path(), &["-exclude_dirs", "a/gen", "./..."]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stderr(&out), "");
}

#[test]
fn exclude_files_pattern() {
    let dir = package();
    let out = realign(dir.path(), &["-color=never", "-exclude_files=a/*/*.go", "./..."]);
    assert_eq!(out.status.code(), Some(3));
    assert!(!stderr(&out).contains("g.go"));
    assert!(stderr(&out).contains("a/t.go:3:8"));
}

#[test]
fn json_on_stdout() {
    let dir = package();
    let out = realign(dir.path(), &["-format=json", "a/t.go"]);
    assert_eq!(out.status.code(), Some(3));
    let json = stdout(&out);
    assert!(json.trim_start().starts_with('['));
    assert!(json.trim_end().ends_with(']'));
    assert!(json.contains("\"file\": \"a/t.go\""));
    assert!(json.contains("\"message\": \"8 bytes saved: record of size 24 could be 16\""));
}

#[test]
fn usage_error_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = realign(dir.path(), &["-frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("flag provided but not defined: -frobnicate"));
}

#[test]
fn missing_package_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = realign(dir.path(), &["nowhere/..."]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("nowhere"));
}

#[test]
fn help() {
    let dir = tempfile::tempdir().unwrap();
    let out = realign(dir.path(), &["-help"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("-apply, -fix"));
}
