//! Library for `gpa-calc`
//! Course records, semester and degree GPA aggregation, configuration and logging

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
