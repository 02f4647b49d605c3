pub mod content;
pub mod grading;
