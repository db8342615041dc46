//! Data models for `gpa-calc`

pub mod course_record;
pub mod degree_program;
pub mod semester;

pub use course_record::CourseRecord;
pub use degree_program::{DegreeProgram, MergedCourse};
pub use semester::{CourseTally, Semester};
