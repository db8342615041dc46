//! Error types for GPA computation.
//!
//! Every failure in the aggregation pipeline is surfaced as a [`GpaError`].
//! Nothing is recovered locally; callers propagate with `?` and the CLI
//! reports the message and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for reading course records and computing GPAs.
///
/// # Example
///
/// ```
/// use gpa_calc::core::error::GpaError;
///
/// let error = GpaError::UnknownGrade {
///     grade: "E".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown grade 'E'");
/// ```
#[derive(Debug, Error)]
pub enum GpaError {
    /// Grade is neither in the grading scale nor the dropped code.
    #[error("Unknown grade '{grade}'")]
    UnknownGrade {
        /// The grade string that was rejected.
        grade: String,
    },

    /// A GPA was requested while its credit denominator was zero.
    #[error("Cannot compute {quantity}: no credits attempted")]
    DivisionByZero {
        /// Which figure was being computed (e.g. "major GPA").
        quantity: &'static str,
    },

    /// A line of a semester file could not be turned into a course record.
    #[error("{}:{line}: {reason}", .path.display())]
    RecordParse {
        /// File the line came from.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A semester file could not be opened or read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the core module.
pub type Result<T> = std::result::Result<T, GpaError>;

/// Divide `points` by `credits`, failing when no credits were attempted.
///
/// # Errors
/// Returns [`GpaError::DivisionByZero`] naming `quantity` when `credits` is 0.
#[allow(clippy::cast_precision_loss)]
pub fn checked_gpa(points: f64, credits: u64, quantity: &'static str) -> Result<f64> {
    if credits == 0 {
        return Err(GpaError::DivisionByZero { quantity });
    }
    Ok(points / credits as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_gpa_divides() {
        let gpa = checked_gpa(16.0, 4, "total GPA").unwrap();
        assert!((gpa - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_checked_gpa_zero_credits() {
        let err = checked_gpa(0.0, 0, "major GPA").unwrap_err();
        assert!(matches!(
            err,
            GpaError::DivisionByZero {
                quantity: "major GPA"
            }
        ));
        assert_eq!(
            err.to_string(),
            "Cannot compute major GPA: no credits attempted"
        );
    }

    #[test]
    fn test_record_parse_message_has_location() {
        let err = GpaError::RecordParse {
            path: PathBuf::from("fall.txt"),
            line: 3,
            reason: "expected 5 fields, found 4".to_string(),
        };
        assert_eq!(err.to_string(), "fall.txt:3: expected 5 fields, found 4");
    }
}
