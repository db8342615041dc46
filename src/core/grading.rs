//! Grading policy: letter grade table, dropped code and major subjects

use crate::core::error::{GpaError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Grade code used by default for a withdrawn course
pub const DEFAULT_DROPPED_CODE: &str = "WC";

/// Letter grades and their point values used when no scale is configured
pub const DEFAULT_SCALE: [(&str, f64); 12] = [
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("D-", 0.7),
    ("F", 0.0),
];

/// Subject codes counted toward the major when none are configured
pub const DEFAULT_MAJOR_SUBJECTS: [&str; 3] = ["MAT", "CS", "STT"];

/// Result of looking a grade up in a [`GradingPolicy`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeValue {
    /// Course was withdrawn and is excluded from point sums
    Dropped,
    /// Course earned this many grade points per credit
    Points(f64),
}

/// Rules for turning letter grades into points and classifying courses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingPolicy {
    /// Grade code marking a withdrawn course
    #[serde(default)]
    pub dropped_code: String,

    /// Subject codes that belong to the major
    #[serde(default)]
    pub major_subjects: Vec<String>,

    /// Letter grade to grade points, in display order
    #[serde(default)]
    pub scale: IndexMap<String, f64>,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            dropped_code: DEFAULT_DROPPED_CODE.to_string(),
            major_subjects: DEFAULT_MAJOR_SUBJECTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            scale: DEFAULT_SCALE
                .iter()
                .map(|(letter, points)| ((*letter).to_string(), *points))
                .collect(),
        }
    }
}

impl GradingPolicy {
    /// Look up a grade
    ///
    /// # Errors
    /// Returns [`GpaError::UnknownGrade`] if `grade` is neither the dropped
    /// code nor a key of the scale.
    pub fn lookup(&self, grade: &str) -> Result<GradeValue> {
        if grade == self.dropped_code {
            return Ok(GradeValue::Dropped);
        }
        self.scale
            .get(grade)
            .copied()
            .map(GradeValue::Points)
            .ok_or_else(|| GpaError::UnknownGrade {
                grade: grade.to_string(),
            })
    }

    /// Whether a subject code belongs to the major
    #[must_use]
    pub fn is_major_subject(&self, subject: &str) -> bool {
        self.major_subjects.iter().any(|s| s == subject)
    }
}
