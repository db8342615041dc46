//! Degree program model

use super::Semester;
use crate::core::error::{checked_gpa, Result};
use crate::debug;
use indexmap::IndexMap;

/// Best outcome recorded for one course identity across all semesters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedCourse {
    /// Highest weighted points seen for the course
    pub best_points: f64,
    /// Credits from the first semester the course appeared in
    pub credits: u32,
    /// Whether the course counts toward the major
    pub major: bool,
}

/// A sequence of semesters merged into a program-wide view
///
/// Each course identity contributes once: its best weighted points over every
/// attempt and the credits of its first attempt. All figures are computed at
/// construction.
#[derive(Debug, Clone)]
pub struct DegreeProgram {
    semesters: Vec<Semester>,
    merged: IndexMap<String, MergedCourse>,
    total_credits_attempted: u64,
    major_credits_attempted: u64,
    total_points: f64,
    major_points: f64,
    total_gpa: f64,
    major_gpa: f64,
}

impl DegreeProgram {
    /// Merge semesters in order
    ///
    /// A retake replaces the stored points only when strictly higher, so a tie
    /// keeps the earlier attempt. Credits are added on first sight only; a
    /// retake with a different credit weight does not change the total.
    ///
    /// # Errors
    /// Returns `GpaError::DivisionByZero` when no credits, or no major
    /// credits, remain after dropped courses are excluded.
    pub fn new(semesters: Vec<Semester>) -> Result<Self> {
        let mut merged: IndexMap<String, MergedCourse> = IndexMap::new();
        let mut total_credits_attempted = 0;
        let mut major_credits_attempted = 0;

        for semester in &semesters {
            for (key, tally) in semester.course_tallies() {
                if let Some(existing) = merged.get_mut(key) {
                    if tally.weighted_points > existing.best_points {
                        debug!(
                            "{key}: retake in {} improves {} -> {}",
                            semester.name, existing.best_points, tally.weighted_points
                        );
                        existing.best_points = tally.weighted_points;
                    } else {
                        debug!(
                            "{key}: retake in {} ignored ({} <= {})",
                            semester.name, tally.weighted_points, existing.best_points
                        );
                    }
                    continue;
                }

                total_credits_attempted += u64::from(tally.credits);
                if tally.major {
                    major_credits_attempted += u64::from(tally.credits);
                }
                merged.insert(
                    key.clone(),
                    MergedCourse {
                        best_points: tally.weighted_points,
                        credits: tally.credits,
                        major: tally.major,
                    },
                );
            }
        }

        let total_points: f64 = merged.values().map(|c| c.best_points).sum();
        let major_points: f64 = merged
            .values()
            .filter(|c| c.major)
            .map(|c| c.best_points)
            .sum();

        debug!(
            "Merged {} courses from {} semesters ({total_credits_attempted} credits, {major_credits_attempted} major)",
            merged.len(),
            semesters.len()
        );

        let total_gpa = checked_gpa(total_points, total_credits_attempted, "total GPA")?;
        let major_gpa = checked_gpa(major_points, major_credits_attempted, "major GPA")?;

        Ok(Self {
            semesters,
            merged,
            total_credits_attempted,
            major_credits_attempted,
            total_points,
            major_points,
            total_gpa,
            major_gpa,
        })
    }

    /// Semesters in the order they were merged
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Merged view of every course identity, in first-seen order
    #[must_use]
    pub const fn merged_courses(&self) -> &IndexMap<String, MergedCourse> {
        &self.merged
    }

    /// Best weighted points recorded for a course identity (e.g., "CS 2435")
    #[must_use]
    pub fn best_points(&self, subject_course: &str) -> Option<f64> {
        self.merged.get(subject_course).map(|c| c.best_points)
    }

    /// Sum of first-attempt credits over all merged courses
    #[must_use]
    pub const fn total_credits_attempted(&self) -> u64 {
        self.total_credits_attempted
    }

    /// Sum of first-attempt credits over merged major courses
    #[must_use]
    pub const fn major_credits_attempted(&self) -> u64 {
        self.major_credits_attempted
    }

    /// Sum of best weighted points over all merged courses
    #[must_use]
    pub const fn total_points(&self) -> f64 {
        self.total_points
    }

    /// Sum of best weighted points over merged major courses
    #[must_use]
    pub const fn major_points(&self) -> f64 {
        self.major_points
    }

    /// Program GPA over all courses
    #[must_use]
    pub const fn total_gpa(&self) -> f64 {
        self.total_gpa
    }

    /// Program GPA over major courses
    #[must_use]
    pub const fn major_gpa(&self) -> f64 {
        self.major_gpa
    }
}
