//! Run driver.
//!
//! A run has five phases:
//! 1. expand package arguments and filter the files by name
//! 2. read and parse every file in parallel
//! 3. pool the declarations of each package, a directory plus a package
//!    clause, so types resolve across its files
//! 4. analyze the files that passed the filter in parallel, one per task
//! 5. merge and report the diagnostics in file and position order, and
//!    with `-apply` persist each file's pending fix
//!
//! Files skipped by name still lend their declarations to their package.
//! Fixes are written only after every file has been analyzed.

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use realign_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use realign_diagnostic::{Diagnostic, DiagnosticQueue, LineOffsetTable};
use realign_fmt::print_file;
use realign_parse::{PackageScope, ParseError, ParsedFile};
use rustc_hash::FxHashMap;

use crate::apply::{apply_fix, ApplyError};
use crate::check::{check_struct, Verdict};
use crate::config::{Config, OutputFormat};
use crate::discover::discover;
use crate::error::ReadError;
use crate::filter::{has_generated_comment, FileFilter, FilterError, Skip};
use crate::markers::Markers;
use crate::rewrite::rewrite_struct;

/// Exit status when a file could not be read or parsed, or on bad usage.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status when diagnostics were reported.
pub const EXIT_DIAGNOSTICS: i32 = 3;

/// Findings for one file.
#[derive(Debug, Default)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    /// The whole file re-serialized with every fix applied.
    pub fix: Option<Arc<[u8]>>,
}

/// Analyze one file's source text as a package of its own.
pub fn analyze_source(path: &Path, source: &str, config: &Config) -> Result<FileReport, ParseError> {
    let parsed = ParsedFile::parse(path, source.to_string())?;
    let scope = PackageScope::collect([&parsed]);
    Ok(analyze_parsed(&parsed, &scope, config))
}

/// Analyze every struct type of `parsed`, nested ones included, resolving
/// names against `scope`.
#[tracing::instrument(level = "debug", skip_all, fields(path = %parsed.path().display()))]
pub fn analyze_parsed(parsed: &ParsedFile, scope: &PackageScope, config: &Config) -> FileReport {
    let path = parsed.path();
    let mut report = FileReport {
        path: path.to_path_buf(),
        ..FileReport::default()
    };
    if !config.generated_files && has_generated_comment(parsed.header_comments()) {
        tracing::debug!("skipping generated file");
        return report;
    }

    let mut file = parsed.build(scope);
    let sizes = config.sizes();
    let markers = Markers::new(config);
    let lines = LineOffsetTable::build(parsed.source());

    for keyword in file.struct_keywords() {
        let Some(node) = file.structs().find(|node| node.keyword() == keyword) else {
            continue;
        };
        let improvement = match check_struct(node, &sizes, markers, config.opt_in) {
            Verdict::Improvable(improvement) => *improvement,
            Verdict::Suppressed(reason) => {
                tracing::debug!(name = %node.name(), ?reason, "suppressed");
                continue;
            }
            Verdict::Unchanged => continue,
        };
        if markers.field_list_ignored(node) {
            tracing::debug!(name = %node.name(), "field list ignored");
            continue;
        }

        let (line, column) = lines.span_start(keyword);
        let mut diagnostic = Diagnostic::new(path, keyword, improvement.message).at(line, column);

        if config.apply {
            if rewrite_struct(&mut file, keyword, &improvement.order.permutation) {
                let fix: Arc<[u8]> = print_file(&file).into_bytes().into();
                diagnostic = diagnostic.with_replacement(Arc::clone(&fix));
                report.fix = Some(fix);
            } else {
                tracing::warn!(
                    path = %path.display(),
                    line,
                    "struct body layout is not supported for rewriting; reporting only"
                );
            }
        }
        report.diagnostics.push(diagnostic);
    }
    report
}

/// Read and parse one file.
pub fn read_file(path: &Path) -> Result<ParsedFile, ReadError> {
    let source = fs::read_to_string(path).map_err(|e| ReadError::io(path, e))?;
    ParsedFile::parse(path, source).map_err(|source| ReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Files of one directory declaring the same package share a scope.
fn package_key(file: &ParsedFile) -> (PathBuf, String) {
    let dir = file.path().parent().unwrap_or(Path::new("")).to_path_buf();
    (dir, file.package().to_string())
}

/// Everything a run found, before anything is written.
#[derive(Debug, Default)]
pub struct Analysis {
    /// Sorted by file, then position.
    pub diagnostics: Vec<Diagnostic>,
    /// One pending replacement per file, in path order.
    pub fixes: Vec<(PathBuf, Arc<[u8]>)>,
    pub errors: Vec<ReadError>,
    pub filter_errors: Vec<FilterError>,
    pub files_analyzed: usize,
}

impl Analysis {
    /// Number of distinct files with diagnostics.
    pub fn files_reported(&self) -> usize {
        let mut files: Vec<&Path> = self.diagnostics.iter().map(Diagnostic::path).collect();
        files.dedup();
        files.len()
    }

    pub fn exit_code(&self) -> i32 {
        if !self.errors.is_empty() || !self.filter_errors.is_empty() {
            EXIT_FAILURE
        } else if !self.diagnostics.is_empty() {
            EXIT_DIAGNOSTICS
        } else {
            0
        }
    }
}

/// Discover, filter and analyze the files named by `args`.
pub fn analyze_paths(config: &Config, args: &[String]) -> Analysis {
    let discovered = discover(args);
    let mut analysis = Analysis {
        errors: discovered.errors,
        ..Analysis::default()
    };

    let mut filter = FileFilter::new(config);
    let mut inputs = Vec::with_capacity(discovered.files.len());
    for path in discovered.files {
        match filter.check(&path) {
            Ok(None) => inputs.push((path, true)),
            // An excluded directory takes its whole package with it.
            Ok(Some(Skip::ExcludedDir)) => {}
            Ok(Some(_)) => inputs.push((path, false)),
            Err(e) => {
                tracing::warn!(path = %path.display(), "pre-filter failed");
                analysis.filter_errors.push(e);
            }
        }
    }
    analysis.files_analyzed = inputs.iter().filter(|(_, analyze)| *analyze).count();

    let read: Vec<(Result<ParsedFile, ReadError>, bool)> = inputs
        .par_iter()
        .map(|(path, analyze)| (read_file(path), *analyze))
        .collect();

    let mut files = Vec::with_capacity(read.len());
    for (result, analyze) in read {
        match result {
            Ok(parsed) => files.push((parsed, analyze)),
            Err(e) if analyze => analysis.errors.push(e),
            Err(e) => tracing::debug!(error = %e, "skipped file left out of its package"),
        }
    }

    let mut packages: FxHashMap<(PathBuf, String), PackageScope> = FxHashMap::default();
    for (parsed, _) in &files {
        packages.entry(package_key(parsed)).or_default().add(parsed);
    }
    tracing::debug!(packages = packages.len(), "pooled package declarations");

    let empty = PackageScope::new();
    let results: Vec<FileReport> = files
        .par_iter()
        .filter(|(_, analyze)| *analyze)
        .map(|(parsed, _)| {
            let scope = packages.get(&package_key(parsed)).unwrap_or(&empty);
            analyze_parsed(parsed, scope, config)
        })
        .collect();

    let mut queue = DiagnosticQueue::new();
    for report in results {
        queue.extend(report.diagnostics);
        if let Some(fix) = report.fix {
            analysis.fixes.push((report.path, fix));
        }
    }
    analysis.diagnostics = queue.flush();
    analysis
}

/// Persist pending fixes. A failure is returned with its path and does not
/// stop the remaining files.
pub fn apply_fixes(fixes: &[(PathBuf, Arc<[u8]>)]) -> Vec<(PathBuf, ApplyError)> {
    fixes
        .iter()
        .filter_map(|(path, contents)| {
            apply_fix(path, contents)
                .err()
                .map(|err| (path.clone(), err))
        })
        .collect()
}

/// Run the whole pipeline and return the process exit status.
pub fn run(config: &Config, args: &[String]) -> i32 {
    let analysis = analyze_paths(config, args);

    for err in &analysis.filter_errors {
        eprintln!("{err}");
    }
    for err in &analysis.errors {
        eprintln!("{err}");
    }
    report(config, &analysis);

    if config.apply {
        for (path, err) in apply_fixes(&analysis.fixes) {
            eprintln!("error applying fixes to {}: {err}", path.display());
        }
    }

    tracing::debug!(
        files = analysis.files_analyzed,
        diagnostics = analysis.diagnostics.len(),
        fixes = analysis.fixes.len(),
        errors = analysis.errors.len(),
        "run finished"
    );
    analysis.exit_code()
}

fn report(config: &Config, analysis: &Analysis) {
    match config.format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::stderr(config.color, std::io::stderr().is_terminal());
            emitter.emit_all(&analysis.diagnostics);
            emitter.emit_summary(analysis.diagnostics.len(), analysis.files_reported());
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(std::io::stdout().lock());
            emitter.begin();
            emitter.emit_all(&analysis.diagnostics);
            emitter.end();
            emitter.flush();
        }
    }
}
