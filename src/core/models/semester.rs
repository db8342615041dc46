//! Semester model

use super::CourseRecord;
use crate::core::error::{checked_gpa, Result};
use indexmap::IndexMap;
use std::fmt;

/// Points and credits a semester contributes for one course identity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseTally {
    /// Grade points multiplied by credits
    pub weighted_points: f64,
    /// Credit weight
    pub credits: u32,
    /// Whether the course counts toward the major
    pub major: bool,
}

/// A named term of course records
///
/// The per-course tallies are computed once at construction and the
/// semester is never modified afterwards.
#[derive(Debug, Clone)]
pub struct Semester {
    /// Semester label (e.g., "Fall 2022")
    pub name: String,

    /// Course records in file order
    courses: Vec<CourseRecord>,

    /// Non-dropped courses keyed by "SUBJECT NUMBER", in first-seen order
    tallies: IndexMap<String, CourseTally>,
}

impl Semester {
    /// Create a semester from its course records
    ///
    /// Dropped courses are kept for display but left out of the tallies.
    /// A course listed twice keeps its first position and its last value.
    #[must_use]
    pub fn new(name: String, courses: Vec<CourseRecord>) -> Self {
        let mut tallies = IndexMap::new();
        for course in &courses {
            if let Some(weighted_points) = course.weighted_points() {
                tallies.insert(
                    course.subject_course(),
                    CourseTally {
                        weighted_points,
                        credits: course.credits,
                        major: course.is_major(),
                    },
                );
            }
        }

        Self {
            name,
            courses,
            tallies,
        }
    }

    /// All course records, dropped ones included
    #[must_use]
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// Per-course tallies of non-dropped courses, in insertion order
    #[must_use]
    pub const fn course_tallies(&self) -> &IndexMap<String, CourseTally> {
        &self.tallies
    }

    /// Sum of credits over every course, dropped ones included
    #[must_use]
    pub fn credits_attempted(&self) -> u64 {
        self.courses.iter().map(|c| u64::from(c.credits)).sum()
    }

    /// Semester GPA over all courses
    ///
    /// # Errors
    /// Returns `GpaError::DivisionByZero` when no credits were attempted.
    pub fn semester_gpa(&self) -> Result<f64> {
        let points: f64 = self
            .courses
            .iter()
            .filter_map(CourseRecord::weighted_points)
            .sum();
        checked_gpa(points, self.credits_attempted(), "semester GPA")
    }

    /// Sum of credits over major courses, dropped ones included
    #[must_use]
    pub fn major_credits_attempted(&self) -> u64 {
        self.courses
            .iter()
            .filter(|c| c.is_major())
            .map(|c| u64::from(c.credits))
            .sum()
    }

    /// Semester GPA over major courses only
    ///
    /// # Errors
    /// Returns `GpaError::DivisionByZero` when no major credits were attempted.
    pub fn major_semester_gpa(&self) -> Result<f64> {
        let points: f64 = self
            .courses
            .iter()
            .filter(|c| c.is_major())
            .filter_map(CourseRecord::weighted_points)
            .sum();
        checked_gpa(points, self.major_credits_attempted(), "major semester GPA")
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for course in &self.courses {
            write!(f, "\n{course}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GpaError;
    use crate::core::grading::{GradingPolicy, DEFAULT_SCALE};

    fn course(subject: &str, number: &str, grade: &str, credits: u32) -> CourseRecord {
        CourseRecord::new(
            subject.to_string(),
            number.to_string(),
            format!("{subject} COURSE"),
            grade.to_string(),
            credits,
            &GradingPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_course_gpa_equals_grade_points() {
        for (letter, points) in DEFAULT_SCALE {
            for credits in [1, 3, 4] {
                let semester =
                    Semester::new("Fall".to_string(), vec![course("SD", "2400", letter, credits)]);
                let gpa = semester.semester_gpa().unwrap();
                assert!((gpa - points).abs() < 1e-12, "{letter} x {credits}");
            }
        }
    }

    #[test]
    fn test_mixed_semester() {
        let semester = Semester::new(
            "Fall 2022".to_string(),
            vec![
                course("CS", "2435", "A", 4),
                course("SD", "2400", "B", 3),
                course("MAT", "1500", "C", 3),
            ],
        );

        assert_eq!(semester.credits_attempted(), 10);
        // (16 + 9 + 6) / 10
        assert!((semester.semester_gpa().unwrap() - 3.1).abs() < 1e-12);
        assert_eq!(semester.major_credits_attempted(), 7);
        // (16 + 6) / 7
        assert!((semester.major_semester_gpa().unwrap() - 22.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_semester_gpa_fails() {
        let semester = Semester::new("Empty".to_string(), Vec::new());
        assert!(matches!(
            semester.semester_gpa(),
            Err(GpaError::DivisionByZero { .. })
        ));
        assert!(matches!(
            semester.major_semester_gpa(),
            Err(GpaError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_no_major_courses() {
        let semester = Semester::new("Fall".to_string(), vec![course("SD", "2400", "A", 3)]);
        assert!(semester.semester_gpa().is_ok());
        assert!(matches!(
            semester.major_semester_gpa(),
            Err(GpaError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_dropped_courses_excluded_from_tallies() {
        let semester = Semester::new(
            "Fall".to_string(),
            vec![course("CS", "2435", "A", 4), course("ART", "1001", "WC", 0)],
        );

        assert_eq!(semester.courses().len(), 2);
        assert_eq!(semester.course_tallies().len(), 1);
        assert!(semester.course_tallies().contains_key("CS 2435"));
        assert!(!semester.course_tallies().contains_key("ART 1001"));
    }

    #[test]
    fn test_dropped_credits_count_toward_denominator() {
        let semester = Semester::new(
            "Fall".to_string(),
            vec![course("CS", "2435", "A", 4), course("ART", "1001", "WC", 4)],
        );

        assert_eq!(semester.credits_attempted(), 8);
        assert!((semester.semester_gpa().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_dropped_semester_gpa_fails() {
        let semester = Semester::new("Fall".to_string(), vec![course("ART", "1001", "WC", 0)]);
        assert!(matches!(
            semester.semester_gpa(),
            Err(GpaError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_repeated_course_keeps_position_and_last_value() {
        let semester = Semester::new(
            "Fall".to_string(),
            vec![
                course("CS", "2435", "C", 4),
                course("SD", "2400", "A", 3),
                course("CS", "2435", "B", 4),
            ],
        );

        let keys: Vec<&String> = semester.course_tallies().keys().collect();
        assert_eq!(keys, ["CS 2435", "SD 2400"]);
        assert!((semester.course_tallies()["CS 2435"].weighted_points - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_credit_totals_do_not_overflow() {
        let semester = Semester::new(
            "Fall".to_string(),
            vec![
                course("CS", "2435", "A", u32::MAX),
                course("MAT", "1500", "A", u32::MAX),
            ],
        );

        assert_eq!(semester.credits_attempted(), 2 * u64::from(u32::MAX));
        assert_eq!(semester.major_credits_attempted(), 2 * u64::from(u32::MAX));
        assert!((semester.semester_gpa().unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let semester = Semester::new(
            "Fall 2022".to_string(),
            vec![course("CS", "2435", "A", 4), course("ART", "1001", "WC", 0)],
        );

        assert_eq!(
            semester.to_string(),
            "Fall 2022\nCS 2435 CS COURSE [4]: A\nART 1001 ART COURSE [0]: WC"
        );
    }
}
