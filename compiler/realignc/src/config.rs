//! Run configuration.
//!
//! One [`Config`] is built from the command line and shared read-only by
//! every stage of a run.

use std::path::PathBuf;

use realign_diagnostic::emitter::ColorMode;
use realign_layout::{GcSizes, Target};

/// Doc-comment marker that skips a declaration.
pub const DEFAULT_IGNORE_MARKER: &str = "realign:ignore";
/// Doc-comment marker that opts a declaration in when `-opt_in` is set.
pub const DEFAULT_CHECK_MARKER: &str = "realign:check";

/// How diagnostics are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// `file:line:col: message` lines on stderr.
    #[default]
    Text,
    /// A JSON array on stdout.
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Errors building a [`Config`] from flags.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for flag -{flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown target architecture {0:?}")]
    UnknownTarget(String),
    #[error("bad exclude pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Options for one run.
#[derive(Clone, Debug)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each bool is an independent command-line switch"
)]
pub struct Config {
    /// Write suggested fixes back to disk.
    pub apply: bool,
    /// Only analyze declarations carrying the check marker.
    pub opt_in: bool,
    /// Include `_test.go` files.
    pub test_files: bool,
    /// Include generated files.
    pub generated_files: bool,
    /// Glob patterns matched against paths relative to the working directory.
    pub exclude_files: Vec<glob::Pattern>,
    /// Directories whose files are skipped, at any depth.
    pub exclude_dirs: Vec<PathBuf>,
    pub target: Target,
    pub format: OutputFormat,
    pub color: ColorMode,
    pub ignore_marker: String,
    pub check_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            apply: false,
            opt_in: false,
            test_files: false,
            generated_files: false,
            exclude_files: Vec::new(),
            exclude_dirs: Vec::new(),
            target: Target::default(),
            format: OutputFormat::default(),
            color: ColorMode::default(),
            ignore_marker: DEFAULT_IGNORE_MARKER.to_string(),
            check_marker: DEFAULT_CHECK_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Layout parameters for the configured target.
    pub fn sizes(&self) -> GcSizes {
        GcSizes::for_target(self.target)
    }

    /// Compile and add an exclude-files pattern.
    pub fn add_exclude_file(&mut self, pattern: &str) -> Result<(), ConfigError> {
        let compiled = glob::Pattern::new(pattern).map_err(|source| ConfigError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.exclude_files.push(compiled);
        Ok(())
    }

    /// Set the target architecture by `GOARCH` name.
    pub fn set_target(&mut self, name: &str) -> Result<(), ConfigError> {
        self.target = Target::lookup(name).ok_or_else(|| ConfigError::UnknownTarget(name.to_string()))?;
        Ok(())
    }

    /// Whether any exclusion needs paths relative to the working directory.
    pub fn has_exclusions(&self) -> bool {
        !self.exclude_files.is_empty() || !self.exclude_dirs.is_empty()
    }
}
