//! Semester command handler

use super::{default_semester_name, resolve_input};
use gpa_calc::config::Config;
use gpa_calc::core::records::load_semester;
use gpa_calc::core::summary::format_gpa;
use gpa_calc::{error, warn};
use std::path::Path;

/// Run the semester command: print the courses, semester GPA and major semester GPA.
///
/// A semester without major credits only skips the major line.
///
/// # Errors
/// Returns a printable message if the file cannot be loaded or has no credits.
pub fn run(input_file: &Path, name: Option<String>, config: &Config) -> Result<(), String> {
    let name = name.unwrap_or_else(|| default_semester_name(input_file));
    let path = resolve_input(input_file, config);

    let semester = load_semester(name, &path, &config.grading).map_err(|e| {
        error!("Failed to load semester {}: {e}", path.display());
        format!("✗ {e}")
    })?;

    println!("{semester}");
    println!();

    let gpa = semester.semester_gpa().map_err(|e| format!("✗ {e}"))?;
    println!("SEMESTER GPA: {}", format_gpa(gpa));

    if semester.major_credits_attempted() == 0 {
        warn!("{} has no major courses; skipping major GPA", semester.name);
    } else {
        let major_gpa = semester.major_semester_gpa().map_err(|e| format!("✗ {e}"))?;
        println!("MAJOR SEMESTER GPA: {}", format_gpa(major_gpa));
    }

    Ok(())
}
