//! Confirmation hook for destructive or over-limit actions
//!
//! The planner never decides on its own whether the user accepts an
//! over-limit placement, a delete, a replacing import or a reset. It builds a
//! [`ConfirmRequest`] and asks a [`Confirm`] implementation.

use super::credits::AssignmentCheck;

/// Action awaiting the user's approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    /// Placing a course would push a semester over its ceiling
    OverLimit {
        /// Code of the course being placed
        code: String,
        /// Load figures for the prompt
        check: AssignmentCheck,
    },
    /// Deleting a course
    DeleteCourse {
        /// Course id
        id: String,
        /// Course code
        code: String,
    },
    /// Replacing every course with the contents of an import
    ReplaceCourses {
        /// Courses currently in the plan
        current: usize,
        /// Courses in the import
        incoming: usize,
    },
    /// Erasing the stored plan and reloading the seed data
    Reset,
}

/// Decides whether a [`ConfirmRequest`] goes ahead
pub trait Confirm {
    /// `true` to proceed
    fn confirm(&mut self, request: &ConfirmRequest) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmRequest) -> bool,
{
    fn confirm(&mut self, request: &ConfirmRequest) -> bool {
        self(request)
    }
}

/// Answers every request the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _request: &ConfirmRequest) -> bool {
        self.0
    }
}
