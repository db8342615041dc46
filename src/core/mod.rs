//! Core module: grading rules, course models and GPA aggregation

pub mod config;
pub mod error;
pub mod grading;
pub mod models;
pub mod records;
pub mod summary;

pub use error::GpaError;
pub use grading::GradingPolicy;

/// Returns the current version of the `gpa-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
