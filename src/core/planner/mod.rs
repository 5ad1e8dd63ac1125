//! Planning core: semester generation, course store, credit checks and the
//! controller that ties them to persistence

pub mod confirm;
pub mod controller;
pub mod credits;
pub mod semesters;
pub mod store;

pub use confirm::{AutoConfirm, Confirm, ConfirmRequest};
pub use controller::{Planner, PlannerError, Progress};
pub use credits::{AssignmentCheck, CreditStatus, SemesterLoad};
pub use store::CourseStore;
