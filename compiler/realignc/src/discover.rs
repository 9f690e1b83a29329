//! Package argument expansion.
//!
//! Arguments are Go-style package patterns:
//! - `dir/...` (or `...`) walks `dir` and every subdirectory
//! - a directory means the `.go` files directly inside it
//! - a file is taken as-is
//!
//! While walking, directories the go tool ignores are skipped: hidden ones,
//! those starting with `_`, `vendor` and `testdata`. The result is sorted
//! and free of duplicates.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReadError;

/// Files found for a set of package arguments, plus the arguments that
/// could not be read.
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub errors: Vec<ReadError>,
}

/// Expand package arguments into Go source files.
pub fn discover(args: &[String]) -> Discovered {
    let mut found = Discovered::default();
    for arg in args {
        if let Some(root) = recursive_root(arg) {
            if root.is_dir() {
                walk(&root, &mut found);
            } else {
                found.errors.push(ReadError::NotFound { path: root });
            }
            continue;
        }

        let path = PathBuf::from(arg);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => list_dir(&path, &mut found, |_| {}),
            Ok(_) => found.files.push(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                found.errors.push(ReadError::NotFound { path });
            }
            Err(e) => found.errors.push(ReadError::io(path, e)),
        }
    }
    found.files.sort();
    found.files.dedup();
    tracing::debug!(files = found.files.len(), errors = found.errors.len(), "discovered sources");
    found
}

/// `Some(root)` for a `...` pattern.
fn recursive_root(arg: &str) -> Option<PathBuf> {
    if arg == "..." {
        return Some(PathBuf::from("."));
    }
    let root = arg.strip_suffix("/...")?;
    Some(PathBuf::from(if root.is_empty() { "/" } else { root }))
}

fn walk(dir: &Path, found: &mut Discovered) {
    let mut subdirs = Vec::new();
    list_dir(dir, found, |sub| subdirs.push(sub));
    for sub in subdirs {
        walk(&sub, found);
    }
}

/// Push the Go files directly in `dir` and hand each visitable
/// subdirectory to `on_dir`.
fn list_dir(dir: &Path, found: &mut Discovered, mut on_dir: impl FnMut(PathBuf)) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            found.errors.push(ReadError::io(dir, e));
            return;
        }
    };

    // Entries of `.` are named without the `./` prefix.
    let here = dir == Path::new(".");
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| {
            if here {
                PathBuf::from(entry.file_name())
            } else {
                entry.path()
            }
        })
        .collect();
    paths.sort();

    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_dir() {
            if !is_ignored_dir(name) {
                on_dir(path);
            }
        } else if is_go_source(name) {
            found.files.push(path);
        }
    }
}

fn is_ignored_dir(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_') || name == "vendor" || name == "testdata"
}

/// The go tool ignores files starting with `.` or `_`.
fn is_go_source(name: &str) -> bool {
    name.ends_with(".go") && !name.starts_with('.') && !name.starts_with('_')
}
