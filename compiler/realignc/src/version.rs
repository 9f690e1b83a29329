//! Build identification.
//!
//! Release builds set `REALIGN_COMMIT` and `REALIGN_BUILD_DATE` in the
//! environment at compile time. Either may be missing.

/// The `-V` line: `realign version X (commit abcdef1) built on 2024-01-31`.
pub fn version() -> String {
    version_string(
        env!("CARGO_PKG_VERSION"),
        option_env!("REALIGN_COMMIT"),
        option_env!("REALIGN_BUILD_DATE"),
    )
}

/// Format the version line from its parts. The commit is cut to seven
/// characters and the date to its `YYYY-MM-DD` prefix; missing parts are
/// left out.
pub fn version_string(version: &str, commit: Option<&str>, date: Option<&str>) -> String {
    let mut line = format!("realign version {version}");
    if let Some(commit) = known(commit) {
        line.push_str(&format!(" (commit {})", prefix(commit, 7)));
    }
    if let Some(date) = known(date) {
        line.push_str(&format!(" built on {}", prefix(date, 10)));
    }
    line
}

fn known(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn prefix(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
