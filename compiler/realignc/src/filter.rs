//! File filtering.
//!
//! Decides which discovered files are analyzed. Test and generated files
//! are skipped unless enabled. Exclusions compare paths relative to the
//! working directory. Each path is classified once per run.

use std::path::{Component, Path, PathBuf};

use glob::MatchOptions;
use rustc_hash::FxHashMap;

use crate::config::Config;

const GENERATED_SUFFIXES: &[&str] = &["_generated.go", "_gen.go", ".gen.go", ".pb.go", ".pb.gw.go"];

/// Why a file is not analyzed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Skip {
    Test,
    Generated,
    ExcludedDir,
    ExcludedFile,
}

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("failed to pre-filter files {}: {reason}", path.display())]
    PreFilter { path: PathBuf, reason: String },
}

/// Name-based filtering with per-path caches.
pub struct FileFilter<'c> {
    config: &'c Config,
    /// Absolute, lexically normalized working directory.
    cwd: Result<PathBuf, String>,
    exclude_dirs: Vec<PathBuf>,
    verdicts: FxHashMap<PathBuf, Option<Skip>>,
}

impl<'c> FileFilter<'c> {
    /// A filter resolving relative paths against the process's working
    /// directory.
    pub fn new(config: &'c Config) -> Self {
        let cwd = std::env::current_dir().map_err(|e| e.to_string());
        Self::with_cwd(config, cwd)
    }

    pub fn with_cwd(config: &'c Config, cwd: Result<PathBuf, String>) -> Self {
        let cwd = cwd.map(|dir| normalize(&dir));
        let exclude_dirs = match &cwd {
            Ok(base) => config
                .exclude_dirs
                .iter()
                .map(|dir| relative_to(&base.join(dir), base))
                .collect(),
            Err(_) => Vec::new(),
        };
        FileFilter {
            config,
            cwd,
            exclude_dirs,
            verdicts: FxHashMap::default(),
        }
    }

    /// Classify `path` by name alone. `Ok(None)` means analyze it.
    pub fn check(&mut self, path: &Path) -> Result<Option<Skip>, FilterError> {
        if let Some(verdict) = self.verdicts.get(path) {
            return Ok(*verdict);
        }
        let verdict = self.classify(path)?;
        if let Some(skip) = verdict {
            tracing::debug!(path = %path.display(), ?skip, "skipping file");
        }
        self.verdicts.insert(path.to_path_buf(), verdict);
        Ok(verdict)
    }

    fn classify(&self, path: &Path) -> Result<Option<Skip>, FilterError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !self.config.test_files && name.ends_with("_test.go") {
            return Ok(Some(Skip::Test));
        }
        if !self.config.generated_files && GENERATED_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            return Ok(Some(Skip::Generated));
        }
        if !self.config.has_exclusions() {
            return Ok(None);
        }

        let base = self.cwd.as_ref().map_err(|reason| FilterError::PreFilter {
            path: path.to_path_buf(),
            reason: reason.clone(),
        })?;
        let rel = relative_to(&base.join(path), base);

        let rel_dir = rel.parent().unwrap_or_else(|| Path::new(""));
        if self.exclude_dirs.iter().any(|dir| rel_dir.starts_with(dir)) {
            return Ok(Some(Skip::ExcludedDir));
        }

        let rel_str = rel.to_string_lossy().replace('\\', "/");
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::default()
        };
        if self
            .config
            .exclude_files
            .iter()
            .any(|pattern| pattern.matches_with(&rel_str, options))
        {
            return Ok(Some(Skip::ExcludedFile));
        }
        Ok(None)
    }
}

/// Whether a file's leading comments mark it as generated:
/// `// Code generated <anything> DO NOT EDIT.`
pub fn has_generated_comment(header_comments: &[String]) -> bool {
    header_comments.iter().any(|comment| {
        comment
            .trim_end_matches('\r')
            .strip_prefix("// Code generated ")
            .is_some_and(|rest| rest.ends_with(" DO NOT EDIT."))
    })
}

/// Resolve `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// `path` expressed relative to `base`, both taken lexically. Climbs out
/// of `base` with `..` when needed.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);
    let common = path
        .components()
        .zip(base.components())
        .take_while(|(a, b)| a == b)
        .count();
    let mut rel = PathBuf::new();
    for _ in base.components().skip(common) {
        rel.push("..");
    }
    for component in path.components().skip(common) {
        rel.push(component);
    }
    rel
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
