//! Command-line interface entry point for `gpacalc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gpa_calc::config::Config;
use gpa_calc::info;
use gpa_calc::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Stored config backs the `config` subcommands; overrides only apply to this run
    let mut stored = match Config::load() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("✗ {message}");
            return ExitCode::FAILURE;
        }
    };
    let defaults = Config::from_defaults();
    let config = stored.with_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(
            subcommand,
            &mut stored,
            &defaults,
            &Config::get_config_file_path(),
        ),
        Command::Gpa {
            input_files,
            names,
            export,
            output,
        } => commands::gpa::run(&input_files, &names, export, output.as_deref(), &config),
        Command::Semester { input_file, name } => {
            commands::semester::run(&input_file, name, &config)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
