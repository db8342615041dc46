//! CLI argument definitions for `gpacalc`

use clap::{builder::BoolishValueParser, ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_calc::config::{parse_subject_list, ConfigOverrides};
use gpa_calc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key (e.g., `level`, `major_subjects`, `scale.A-`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute major and total GPA over several semesters.
    ///
    /// Each file holds one semester, in chronological order. Retaken courses
    /// keep their best grade.
    Gpa {
        /// Semester files, oldest first
        #[arg(value_name = "FILES", num_args = 1..)]
        input_files: Vec<PathBuf>,

        /// Semester name, repeated once per input file in the same order
        /// (defaults to each file name without extension)
        #[arg(short, long = "name", value_name = "NAME", action = ArgAction::Append)]
        names: Vec<String>,

        /// Export the merged per-course summary as CSV
        #[arg(long)]
        export: bool,

        /// CSV output path (defaults to config `reports_dir`); implies --export
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show one semester's courses and semester GPA.
    Semester {
        /// Semester file
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Semester name (defaults to the file name without extension)
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gpacalc",
    about = "Compute semester and degree GPAs from course records",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override major subject codes for this run (comma separated, e.g. "MAT,CS,STT")
    #[arg(long = "major-subjects", value_name = "CODES")]
    pub major_subjects: Option<String>,

    /// Override the directory searched for semester files
    #[arg(long = "semesters-dir", value_name = "DIR")]
    pub semesters_dir: Option<PathBuf>,

    /// Override the directory for exported summaries
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            major_subjects: self.major_subjects.as_deref().map(parse_subject_list),
            semesters_dir: self
                .semesters_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
