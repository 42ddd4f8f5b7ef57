pub mod student_service;

pub use student_service::{StudentDraft, StudentId, StudentService, parse_student_id};
