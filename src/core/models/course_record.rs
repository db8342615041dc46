//! Course record model

use crate::core::error::Result;
use crate::core::grading::{GradeValue, GradingPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One attempt at a course, with its grade and credit weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Subject code (e.g., "CS", "MAT")
    pub subject: String,

    /// Course number (e.g., "2435")
    pub number: String,

    /// Display name (e.g., "INTRO TO SCIENTIFIC PROGRAM")
    pub name: String,

    /// Letter grade as recorded (e.g., "A-", "WC")
    pub grade: String,

    /// Credit weight
    pub credits: u32,

    /// Points per credit, `None` when the course was dropped
    grade_points: Option<f64>,

    /// Whether the subject belongs to the major
    major: bool,
}

impl CourseRecord {
    /// Create a new course record, resolving the grade against `policy`
    ///
    /// # Arguments
    /// * `subject` - Subject code
    /// * `number` - Course number
    /// * `name` - Display name
    /// * `grade` - Letter grade or the dropped code
    /// * `credits` - Credit weight
    /// * `policy` - Grade table and major subject set
    ///
    /// # Errors
    /// Returns `GpaError::UnknownGrade` if the grade is not in the policy.
    pub fn new(
        subject: String,
        number: String,
        name: String,
        grade: String,
        credits: u32,
        policy: &GradingPolicy,
    ) -> Result<Self> {
        let grade_points = match policy.lookup(&grade)? {
            GradeValue::Dropped => None,
            GradeValue::Points(points) => Some(points),
        };
        let major = policy.is_major_subject(&subject);

        Ok(Self {
            subject,
            number,
            name,
            grade,
            credits,
            grade_points,
            major,
        })
    }

    /// Course identity shared by every attempt at the same course
    ///
    /// # Returns
    /// A string in the format "SUBJECT NUMBER" (e.g., "CS 2435")
    #[must_use]
    pub fn subject_course(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    /// Whether the course was withdrawn
    #[must_use]
    pub const fn was_dropped(&self) -> bool {
        self.grade_points.is_none()
    }

    /// Whether the course counts toward the major
    #[must_use]
    pub const fn is_major(&self) -> bool {
        self.major
    }

    /// Grade points per credit, `None` for a dropped course
    #[must_use]
    pub const fn grade_points(&self) -> Option<f64> {
        self.grade_points
    }

    /// Grade points multiplied by credits, `None` for a dropped course
    #[must_use]
    pub fn weighted_points(&self) -> Option<f64> {
        self.grade_points
            .map(|points| points * f64::from(self.credits))
    }
}

impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]: {}",
            self.subject, self.number, self.name, self.credits, self.grade
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GpaError;
    use crate::core::grading::DEFAULT_SCALE;

    fn record(subject: &str, number: &str, grade: &str, credits: u32) -> Result<CourseRecord> {
        CourseRecord::new(
            subject.to_string(),
            number.to_string(),
            "TEST COURSE".to_string(),
            grade.to_string(),
            credits,
            &GradingPolicy::default(),
        )
    }

    #[test]
    fn test_course_record_creation() {
        let course = CourseRecord::new(
            "CS".to_string(),
            "2435".to_string(),
            "INTRO TO SCIENTIFIC PROGRAM".to_string(),
            "A".to_string(),
            4,
            &GradingPolicy::default(),
        )
        .unwrap();

        assert_eq!(course.subject, "CS");
        assert_eq!(course.number, "2435");
        assert_eq!(course.subject_course(), "CS 2435");
        assert_eq!(course.grade_points(), Some(4.0));
        assert_eq!(course.weighted_points(), Some(16.0));
        assert!(course.is_major());
        assert!(!course.was_dropped());
    }

    #[test]
    fn test_every_letter_grade() {
        for (letter, points) in DEFAULT_SCALE {
            let course = record("SD", "2400", letter, 3).unwrap();
            assert_eq!(course.grade_points(), Some(points));
        }
    }

    #[test]
    fn test_dropped_course() {
        let course = record("ART", "1001", "WC", 0).unwrap();

        assert!(course.was_dropped());
        assert!(course.grade_points().is_none());
        assert!(course.weighted_points().is_none());
        assert!(!course.is_major());
    }

    #[test]
    fn test_unknown_grade_fails() {
        let result = record("CS", "1000", "Z", 3);
        assert!(matches!(result, Err(GpaError::UnknownGrade { grade }) if grade == "Z"));
    }

    #[test]
    fn test_display() {
        let course = CourseRecord::new(
            "SD".to_string(),
            "2400".to_string(),
            "PRINC SUSTAINABLE DEVELOPMNT".to_string(),
            "A".to_string(),
            3,
            &GradingPolicy::default(),
        )
        .unwrap();

        assert_eq!(
            course.to_string(),
            "SD 2400 PRINC SUSTAINABLE DEVELOPMNT [3]: A"
        );
    }

    #[test]
    fn test_major_uses_policy() {
        let mut policy = GradingPolicy::default();
        policy.major_subjects = vec!["ART".to_string()];

        let art = CourseRecord::new(
            "ART".to_string(),
            "1001".to_string(),
            "FOUNDATIONS I".to_string(),
            "B".to_string(),
            3,
            &policy,
        )
        .unwrap();
        assert!(art.is_major());

        let cs = record("CS", "2435", "B", 3).unwrap();
        assert!(cs.is_major());
    }
}
