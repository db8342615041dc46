//! CLI command handlers for `gpacalc`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod gpa;
pub mod semester;

use gpa_calc::config::Config;
use std::path::{Path, PathBuf};

/// Resolve a semester file argument
///
/// Paths that exist as given are used unchanged. Otherwise a relative path
/// is looked up in the configured `semesters_dir`; if it is not there either,
/// the original path is returned so the read error names what the user typed.
pub fn resolve_input(path: &Path, config: &Config) -> PathBuf {
    if path.exists() || path.is_absolute() || config.paths.semesters_dir.is_empty() {
        return path.to_path_buf();
    }
    let candidate = Path::new(&config.paths.semesters_dir).join(path);
    if candidate.exists() {
        candidate
    } else {
        path.to_path_buf()
    }
}

/// Default semester name: the file name without extension
pub fn default_semester_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("semester")
        .to_string()
}
