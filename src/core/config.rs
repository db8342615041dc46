//! Configuration module for `gpa-calc`

use crate::core::grading::GradingPolicy;
use crate::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Prefix of keys addressing a single grade in the scale (e.g. `scale.A-`)
const SCALE_KEY_PREFIX: &str = "scale.";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory searched for semester files given as relative paths
    #[serde(default)]
    pub semesters_dir: String,
    /// Directory for exported GPA summaries
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Grade table, dropped code and major subjects
    #[serde(default = "empty_grading")]
    pub grading: GradingPolicy,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            grading: empty_grading(),
            paths: PathsConfig::default(),
        }
    }
}

/// A grading section with nothing set, so defaults can be merged in
fn empty_grading() -> GradingPolicy {
    GradingPolicy {
        dropped_code: String::new(),
        major_subjects: Vec::new(),
        scale: indexmap::IndexMap::new(),
    }
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override major subject codes
    pub major_subjects: Option<Vec<String>>,
    /// Override semesters directory
    pub semesters_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$GPA_CALC` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gpacalc`
    /// - macOS: `~/Library/Application Support/gpacalc`
    /// - Windows: `%APPDATA%\gpacalc`
    #[must_use]
    pub fn get_gpacalc_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gpacalc")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty in the current config and non-empty in
    /// defaults are updated, so a config file written by an older version
    /// picks up new settings without losing user edits.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.grading.dropped_code.is_empty() && !defaults.grading.dropped_code.is_empty() {
            self.grading
                .dropped_code
                .clone_from(&defaults.grading.dropped_code);
            changed = true;
        }
        if self.grading.major_subjects.is_empty() && !defaults.grading.major_subjects.is_empty() {
            self.grading
                .major_subjects
                .clone_from(&defaults.grading.major_subjects);
            changed = true;
        }
        // The scale is replaced as a whole; mixing two tables would be confusing
        if self.grading.scale.is_empty() && !defaults.grading.scale.is_empty() {
            self.grading.scale.clone_from(&defaults.grading.scale);
            changed = true;
        }

        if self.paths.semesters_dir.is_empty() && !defaults.paths.semesters_dir.is_empty() {
            self.paths
                .semesters_dir
                .clone_from(&defaults.paths.semesters_dir);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file itself
    /// is not modified.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(subjects) = &overrides.major_subjects {
            self.grading.major_subjects.clone_from(subjects);
        }

        if let Some(semesters_dir) = &overrides.semesters_dir {
            self.paths.semesters_dir.clone_from(semesters_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gpacalc_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GPA_CALC` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$GPA_CALC") {
            let gpacalc_dir = Self::get_gpacalc_dir();
            value.replace("$GPA_CALC", gpacalc_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults (empty strings, empty tables).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [logging]
    /// level = "info"
    /// file = "$GPA_CALC/gpacalc.log"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.semesters_dir = Self::expand_variables(&config.paths.semesters_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the user configuration file, creating it from defaults if not found
    ///
    /// # Errors
    /// Returns a message naming the file when it exists but cannot be read or
    /// parsed. See [`load_from()`](Config::load_from).
    pub fn load() -> Result<Self, String> {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `config_file`
    ///
    /// - If the file exists: parses it, merges missing fields from defaults
    ///   and saves the result when anything was added.
    /// - On first run: creates the config directory and writes the defaults.
    ///
    /// A failed write is logged as a warning and the loaded values are still
    /// returned.
    ///
    /// # Errors
    /// Returns a message naming the file when it exists but cannot be read or
    /// parsed; such a file never falls back to the defaults.
    pub fn load_from(config_file: &Path) -> Result<Self, String> {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save_to(config_file) {
                warn!(
                    "Could not write default config to {}: {e}",
                    config_file.display()
                );
            }
            return Ok(defaults);
        }

        let content = fs::read_to_string(config_file).map_err(|e| {
            format!("Failed to read config file {}: {e}", config_file.display())
        })?;
        let mut config = Self::from_toml(&content)
            .map_err(|e| format!("Invalid config file {}: {e}", config_file.display()))?;

        if config.merge_defaults(&defaults) {
            if let Err(e) = config.save_to(config_file) {
                warn!(
                    "Could not save merged config to {}: {e}",
                    config_file.display()
                );
            }
        }
        Ok(config)
    }

    /// Copy of this configuration with CLI overrides applied
    ///
    /// `self` keeps the stored values, so it can still be saved without
    /// persisting one-off overrides.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.clone();
        config.apply_overrides(overrides);
        config
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `config_file`, creating its directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`, `file`, `verbose`
    /// - `dropped_code`
    /// - `major_subjects`: comma separated
    /// - `scale`: the whole table, or `scale.<LETTER>` for one grade
    /// - `semesters_dir`, `reports_dir`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(letter) = key.strip_prefix(SCALE_KEY_PREFIX) {
            return self.grading.scale.get(letter).map(ToString::to_string);
        }
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "dropped_code" | "dropped-code" => Some(self.grading.dropped_code.clone()),
            "major_subjects" | "major-subjects" => Some(self.grading.major_subjects.join(",")),
            "scale" => Some(
                self.grading
                    .scale
                    .iter()
                    .map(|(letter, points)| format!("{letter}={points}"))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            "semesters_dir" | "semesters-dir" => Some(self.paths.semesters_dir.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Accepts the keys of [`get`](Config::get) except the whole `scale`.
    /// `scale.<LETTER>` adds or updates one grade.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        if let Some(letter) = key.strip_prefix(SCALE_KEY_PREFIX) {
            if letter.is_empty() {
                return Err(format!("Unknown config key: '{key}'"));
            }
            let points = value
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| format!("Invalid grade points for '{letter}': '{value}'"))?;
            self.grading.scale.insert(letter.to_string(), points);
            return Ok(());
        }
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "dropped_code" | "dropped-code" => {
                if value.trim().is_empty() {
                    return Err("Dropped code cannot be empty".to_string());
                }
                self.grading.dropped_code = value.trim().to_string();
            }
            "major_subjects" | "major-subjects" => {
                self.grading.major_subjects = parse_subject_list(value);
            }
            "semesters_dir" | "semesters-dir" => self.paths.semesters_dir = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// For `scale.<LETTER>` the grade is restored from the defaults, or
    /// removed when the defaults do not have it. `scale` restores the table.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        if let Some(letter) = key.strip_prefix(SCALE_KEY_PREFIX) {
            match defaults.grading.scale.get(letter) {
                Some(points) => {
                    self.grading.scale.insert(letter.to_string(), *points);
                }
                None => {
                    self.grading.scale.shift_remove(letter);
                }
            }
            return Ok(());
        }
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "dropped_code" | "dropped-code" => self
                .grading
                .dropped_code
                .clone_from(&defaults.grading.dropped_code),
            "major_subjects" | "major-subjects" => self
                .grading
                .major_subjects
                .clone_from(&defaults.grading.major_subjects),
            "scale" => self.grading.scale.clone_from(&defaults.grading.scale),
            "semesters_dir" | "semesters-dir" => self
                .paths
                .semesters_dir
                .clone_from(&defaults.paths.semesters_dir),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

/// Split a comma separated subject list, dropping blanks
#[must_use]
pub fn parse_subject_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  dropped_code = \"{}\"", self.grading.dropped_code)?;
        writeln!(
            f,
            "  major_subjects = [{}]",
            self.grading
                .major_subjects
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ")
        )?;

        writeln!(f, "\n[grading.scale]")?;
        for (letter, points) in &self.grading.scale {
            writeln!(f, "  \"{letter}\" = {points:.1}")?;
        }

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  semesters_dir = \"{}\"", self.paths.semesters_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
