//! Data models for `StudyPlanner`

pub mod course;
pub mod plan;
pub mod semester;
pub mod settings;

pub use course::{Course, CourseDraft, CourseType, ValidationError};
pub use plan::Plan;
pub use semester::{Semester, SemesterKind};
pub use settings::{Settings, SettingsPatch, DEFAULT_TOTAL_SEMESTERS, MAX_TOTAL_SEMESTERS};
