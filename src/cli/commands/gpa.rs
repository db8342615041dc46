//! GPA command handler

use super::{default_semester_name, resolve_input};
use gpa_calc::config::Config;
use gpa_calc::core::models::{DegreeProgram, Semester};
use gpa_calc::core::records::load_semester;
use gpa_calc::core::summary::{export_program_csv, format_gpa, ProgramSummary};
use gpa_calc::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Run the gpa command.
///
/// # Arguments
/// * `input_files` - Semester files, oldest first
/// * `names` - Optional semester names; must match inputs 1:1 when provided
/// * `export` - Whether to write the merged summary CSV
/// * `output` - Explicit CSV path; implies `export`
/// * `config` - Configuration with grading policy and directories
///
/// # Errors
/// Returns a printable message for the first failure.
pub fn run(
    input_files: &[PathBuf],
    names: &[String],
    export: bool,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    if input_files.is_empty() {
        return Err("✗ No input files provided.".to_string());
    }

    if !names.is_empty() && names.len() != input_files.len() {
        return Err(format!(
            "✗ When using -n/--name, repeat it once per input file ({} inputs, {} names).",
            input_files.len(),
            names.len()
        ));
    }

    let mut semesters = Vec::with_capacity(input_files.len());
    for (idx, input_file) in input_files.iter().enumerate() {
        let name = names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| default_semester_name(input_file));
        let path = resolve_input(input_file, config);
        let semester = load_semester(name, &path, &config.grading).map_err(|e| {
            error!("Failed to load semester {}: {e}", path.display());
            format!("✗ {e}")
        })?;
        print_semester_detail(&semester);
        semesters.push(semester);
    }

    let program = DegreeProgram::new(semesters).map_err(|e| {
        error!("GPA computation failed: {e}");
        format!("✗ {e}")
    })?;

    let summary = ProgramSummary::from_program(&program);
    for line in summary.gpa_lines() {
        println!("{line}");
    }
    verbose!(
        "Counted {} credits ({} major) across {} courses",
        summary.total_credits,
        summary.major_credits,
        program.merged_courses().len()
    );

    if export || output.is_some() {
        let output_path = export_path(output, input_files, config)?;
        export_program_csv(&program, &output_path).map_err(|e| {
            format!(
                "✗ Failed to export summary to {}: {e}",
                output_path.display()
            )
        })?;
        println!("✓ Summary exported to: {}", output_path.display());
        info!("Exported GPA summary to: {}", output_path.display());
    }

    Ok(())
}

/// Print a semester and its GPA when verbose output is on
fn print_semester_detail(semester: &Semester) {
    verbose!("{semester}");
    match semester.semester_gpa() {
        Ok(gpa) => verbose!("SEMESTER GPA: {}\n", format_gpa(gpa)),
        Err(e) => verbose!("SEMESTER GPA: n/a ({e})\n"),
    }
}

/// Pick the CSV path: the explicit output, or `<last input>_gpa.csv` in `reports_dir`
fn export_path(
    output: Option<&Path>,
    input_files: &[PathBuf],
    config: &Config,
) -> Result<PathBuf, String> {
    if let Some(path) = output {
        return Ok(path.to_path_buf());
    }

    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let stem = input_files
        .last()
        .map_or_else(|| "degree".to_string(), |p| default_semester_name(p));
    Ok(reports_dir.join(format!("{stem}_gpa.csv")))
}
