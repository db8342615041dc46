//! Parser for comma-separated semester files
//!
//! Each non-blank line holds one course record:
//!
//! ```text
//! subject,course_number,name,grade,credits
//! CS,2435,INTRO TO SCIENTIFIC PROGRAM,A,4
//! ```
//!
//! Fields are trimmed. Embedded commas are not supported.

use crate::core::error::{GpaError, Result};
use crate::core::grading::GradingPolicy;
use crate::core::models::{CourseRecord, Semester};
use crate::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of comma-separated fields in a course line
const FIELD_COUNT: usize = 5;

/// Read a semester file and build a [`Semester`] named `name`
///
/// # Errors
/// Returns `GpaError::Io` if the file cannot be read and
/// `GpaError::RecordParse` for the first malformed line.
pub fn load_semester<P: AsRef<Path>>(
    name: String,
    path: P,
    policy: &GradingPolicy,
) -> Result<Semester> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GpaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let courses = read_course_records(BufReader::new(file), path, policy)?;
    info!(
        "Loaded {} course records for '{name}' from {}",
        courses.len(),
        path.display()
    );
    Ok(Semester::new(name, courses))
}

/// Read every course record from a line reader
///
/// `source` only labels errors; nothing is opened through it.
///
/// # Errors
/// Returns `GpaError::Io` on a read failure and `GpaError::RecordParse` for
/// the first malformed line.
pub fn read_course_records<R: BufRead>(
    reader: R,
    source: &Path,
    policy: &GradingPolicy,
) -> Result<Vec<CourseRecord>> {
    let mut courses = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| GpaError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let course = parse_course_line(&line, policy).map_err(|reason| GpaError::RecordParse {
            path: source.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        courses.push(course);
    }

    Ok(courses)
}

/// Parse a single course line
///
/// # Errors
/// Returns a description of the problem when the field count is wrong, the
/// credits are not a non-negative integer, or the grade is unknown.
pub fn parse_course_line(
    line: &str,
    policy: &GradingPolicy,
) -> std::result::Result<CourseRecord, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        ));
    }

    let credits = fields[4]
        .parse::<u32>()
        .map_err(|_| format!("invalid credits '{}'", fields[4]))?;

    CourseRecord::new(
        fields[0].to_string(),
        fields[1].to_string(),
        fields[2].to_string(),
        fields[3].to_string(),
        credits,
        policy,
    )
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Vec<CourseRecord>> {
        read_course_records(
            Cursor::new(text),
            Path::new("test.txt"),
            &GradingPolicy::default(),
        )
    }

    #[test]
    fn test_parse_course_line() {
        let course = parse_course_line(
            "CS,2435,INTRO TO SCIENTIFIC PROGRAM,A,4",
            &GradingPolicy::default(),
        )
        .unwrap();

        assert_eq!(course.subject, "CS");
        assert_eq!(course.number, "2435");
        assert_eq!(course.name, "INTRO TO SCIENTIFIC PROGRAM");
        assert_eq!(course.grade, "A");
        assert_eq!(course.credits, 4);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let course =
            parse_course_line(" MAT , 1500 , CALCULUS I , B+ , 4 \r", &GradingPolicy::default())
                .unwrap();

        assert_eq!(course.subject_course(), "MAT 1500");
        assert_eq!(course.grade, "B+");
        assert_eq!(course.credits, 4);
    }

    #[test]
    fn test_wrong_field_count() {
        let policy = GradingPolicy::default();
        assert_eq!(
            parse_course_line("CS,2435,A,4", &policy).unwrap_err(),
            "expected 5 fields, found 4"
        );
        assert!(parse_course_line("CS,2435,INTRO, PART 2,A,4", &policy).is_err());
    }

    #[test]
    fn test_invalid_credits() {
        let policy = GradingPolicy::default();
        assert_eq!(
            parse_course_line("CS,2435,INTRO,A,four", &policy).unwrap_err(),
            "invalid credits 'four'"
        );
        assert!(parse_course_line("CS,2435,INTRO,A,-3", &policy).is_err());
        assert!(parse_course_line("CS,2435,INTRO,A,3.5", &policy).is_err());
    }

    #[test]
    fn test_unknown_grade_line() {
        let err = parse_course_line("CS,2435,INTRO,E,4", &GradingPolicy::default()).unwrap_err();
        assert_eq!(err, "Unknown grade 'E'");
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let courses = read("CS,2435,INTRO,A,4\n\nART,1001,FOUNDATIONS I,WC,0\n").unwrap();
        assert_eq!(courses.len(), 2);
        assert!(courses[1].was_dropped());
    }

    #[test]
    fn test_read_reports_line_number() {
        let err = read("CS,2435,INTRO,A,4\n\nSD,2400,PRINC,A\n").unwrap_err();
        match err {
            GpaError::RecordParse { path, line, reason } => {
                assert_eq!(path, Path::new("test.txt"));
                assert_eq!(line, 3);
                assert_eq!(reason, "expected 5 fields, found 4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_empty_input() {
        assert!(read("").unwrap().is_empty());
    }
}
