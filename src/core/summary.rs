//! GPA formatting and export of the merged degree view

use super::models::DegreeProgram;
use crate::debug;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Format a GPA rounded to two decimal places (e.g., `4.00`, `3.68`)
#[must_use]
pub fn format_gpa(gpa: f64) -> String {
    format!("{gpa:.2}")
}

/// Headline figures of a degree program
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSummary {
    /// Semester names in merge order
    pub semesters: Vec<String>,
    /// Credits counted toward the total GPA
    pub total_credits: u64,
    /// Best weighted points summed over all courses
    pub total_points: f64,
    /// Program GPA
    pub total_gpa: f64,
    /// Credits counted toward the major GPA
    pub major_credits: u64,
    /// Best weighted points summed over major courses
    pub major_points: f64,
    /// Major GPA
    pub major_gpa: f64,
}

impl ProgramSummary {
    /// Collect the headline figures of `program`
    #[must_use]
    pub fn from_program(program: &DegreeProgram) -> Self {
        Self {
            semesters: program
                .semesters()
                .iter()
                .map(|s| s.name.clone())
                .collect(),
            total_credits: program.total_credits_attempted(),
            total_points: program.total_points(),
            total_gpa: program.total_gpa(),
            major_credits: program.major_credits_attempted(),
            major_points: program.major_points(),
            major_gpa: program.major_gpa(),
        }
    }

    /// The two report lines printed by the CLI
    #[must_use]
    pub fn gpa_lines(&self) -> [String; 2] {
        [
            format!("MAJOR GPA: {}", format_gpa(self.major_gpa)),
            format!("TOTAL GPA: {}", format_gpa(self.total_gpa)),
        ]
    }
}

/// Wrap `value` in double quotes, doubling any embedded quote
fn quote_csv(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote `value` only when it holds a separator, a quote or a line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote_csv(value)
    } else {
        value.to_string()
    }
}

/// Export the merged per-course view of a degree program to CSV
///
/// The file starts with one summary item per row, followed by a `Courses`
/// section listing each course identity with its best points.
///
/// # Errors
/// Returns an error if file writing fails
pub fn export_program_csv<P: AsRef<Path>>(
    program: &DegreeProgram,
    output_path: P,
) -> Result<ProgramSummary, Box<dyn Error>> {
    let summary = ProgramSummary::from_program(program);
    let mut file = File::create(output_path.as_ref())?;

    writeln!(file, "Semesters,{}", quote_csv(&summary.semesters.join(";")))?;
    writeln!(file, "Total Credits,{}", summary.total_credits)?;
    writeln!(file, "Total Points,{:.2}", summary.total_points)?;
    writeln!(file, "Total GPA,{}", format_gpa(summary.total_gpa))?;
    writeln!(file, "Major Credits,{}", summary.major_credits)?;
    writeln!(file, "Major Points,{:.2}", summary.major_points)?;
    writeln!(file, "Major GPA,{}", format_gpa(summary.major_gpa))?;

    writeln!(file, "Courses")?;
    writeln!(file, "Course,Best Points,Credits,Major")?;

    debug!(
        "Exporting {} merged courses",
        program.merged_courses().len()
    );
    for (key, course) in program.merged_courses() {
        writeln!(
            file,
            "{},{:.2},{},{}",
            csv_field(key),
            course.best_points,
            course.credits,
            course.major
        )?;
    }

    Ok(summary)
}
