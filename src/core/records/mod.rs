//! Readers for semester course-record files

pub mod semester_file;

pub use semester_file::{load_semester, parse_course_line, read_course_records};
