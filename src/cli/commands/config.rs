//! Config command handler

use crate::args::ConfigSubcommand;
use gpa_calc::config::Config;
use std::io::{self, Write};
use std::path::Path;

/// Dispatch config subcommands
///
/// `config` must be the stored configuration without CLI overrides; `set`
/// and `unset` write it back to `config_file`.
///
/// # Errors
/// Returns a printable message when a key is unknown, a value is invalid or
/// the config file cannot be written.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
    config_file: &Path,
) -> Result<(), String> {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => {
            handle_config_set(config, config_file, &key, &value)
        }
        Some(ConfigSubcommand::Unset { key }) => {
            handle_config_unset(config, defaults, config_file, &key)
        }
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Print one value, or the whole config when no key is given
fn handle_config_get(config: &Config, key: Option<String>) -> Result<(), String> {
    match key {
        Some(k) => {
            let value = config
                .get(&k)
                .ok_or_else(|| format!("Unknown config key: '{k}'"))?;
            println!("{value}");
        }
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
    }
    Ok(())
}

fn handle_config_set(
    config: &mut Config,
    config_file: &Path,
    key: &str,
    value: &str,
) -> Result<(), String> {
    config.set(key, value)?;
    config
        .save_to(config_file)
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn handle_config_unset(
    config: &mut Config,
    defaults: &Config,
    config_file: &Path,
    key: &str,
) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save_to(config_file)
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

/// Delete the config file after asking for confirmation
fn handle_config_reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpa_calc::config::ConfigOverrides;

    fn overrides() -> ConfigOverrides {
        ConfigOverrides {
            major_subjects: Some(vec!["ART".to_string()]),
            semesters_dir: Some("/tmp/other_semesters".to_string()),
            reports_dir: Some("/tmp/other_reports".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_keeps_overrides_out_of_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_file = dir.path().join("config.toml");
        let defaults = Config::from_defaults();
        let mut stored = Config::load_from(&config_file).expect("load defaults");

        let effective = stored.with_overrides(&overrides());
        assert_eq!(effective.grading.major_subjects, ["ART"]);
        assert_eq!(stored.grading.major_subjects, defaults.grading.major_subjects);

        let set = Some(ConfigSubcommand::Set {
            key: "level".to_string(),
            value: "info".to_string(),
        });
        run(set, &mut stored, &defaults, &config_file).expect("set level");

        let reloaded = Config::load_from(&config_file).expect("reload");
        assert_eq!(reloaded.logging.level, "info");
        assert_eq!(reloaded.grading.major_subjects, defaults.grading.major_subjects);
        assert_eq!(reloaded.paths.semesters_dir, defaults.paths.semesters_dir);
        assert_eq!(reloaded.paths.reports_dir, defaults.paths.reports_dir);
    }

    #[test]
    fn test_unset_keeps_overrides_out_of_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_file = dir.path().join("config.toml");
        let defaults = Config::from_defaults();
        let mut stored = Config::load_from(&config_file).expect("load defaults");
        let _effective = stored.with_overrides(&overrides());

        let unset = Some(ConfigSubcommand::Unset {
            key: "verbose".to_string(),
        });
        run(unset, &mut stored, &defaults, &config_file).expect("unset verbose");

        let reloaded = Config::load_from(&config_file).expect("reload");
        assert_eq!(reloaded.grading.major_subjects, defaults.grading.major_subjects);
        assert_eq!(reloaded.paths.reports_dir, defaults.paths.reports_dir);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_file = dir.path().join("config.toml");
        let defaults = Config::from_defaults();
        let mut stored = Config::from_defaults();

        let set = Some(ConfigSubcommand::Set {
            key: "colour".to_string(),
            value: "blue".to_string(),
        });
        assert!(run(set, &mut stored, &defaults, &config_file).is_err());
        assert!(!config_file.exists());
    }
}
