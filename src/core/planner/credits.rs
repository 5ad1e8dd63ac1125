//! Credit validation against per-semester ceilings

use crate::core::models::{Course, Semester, Settings};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// How a semester's load compares to its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    /// Below the ceiling
    Under,
    /// Exactly at the ceiling
    Exact,
    /// Above the ceiling
    Over,
}

impl CreditStatus {
    /// Compare a credit load to a ceiling
    #[must_use]
    pub fn of(credits: u32, max_credits: u32) -> Self {
        match credits.cmp(&max_credits) {
            Ordering::Less => Self::Under,
            Ordering::Equal => Self::Exact,
            Ordering::Greater => Self::Over,
        }
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Under => "under",
            Self::Exact => "exact",
            Self::Over => "over",
        };
        f.write_str(label)
    }
}

/// Sum of credits of the courses placed in `semester_id`, saturating at
/// `u32::MAX` since imported credits are not range-checked
#[must_use]
pub fn credits_in_semester(courses: &[Course], semester_id: &str) -> u32 {
    courses
        .iter()
        .filter(|c| c.is_in(semester_id))
        .fold(0u32, |sum, c| sum.saturating_add(c.credits))
}

/// Sum of credits of every assigned course
#[must_use]
pub fn assigned_credits(courses: &[Course]) -> u32 {
    courses
        .iter()
        .filter(|c| c.is_assigned())
        .fold(0u32, |sum, c| sum.saturating_add(c.credits))
}

/// `round(taken / target * 100)`; a zero target reports 0
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_percentage(taken: u32, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    (f64::from(taken) / f64::from(target) * 100.0).round() as u32
}

/// Credit load of one semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterLoad {
    /// The semester
    pub semester: Semester,
    /// Credits currently placed there
    pub credits: u32,
    /// Configured ceiling (0 when none is configured)
    pub max_credits: u32,
    /// Comparison of `credits` to `max_credits`
    pub status: CreditStatus,
    /// Number of courses placed there
    pub course_count: usize,
}

impl SemesterLoad {
    /// Credits above the ceiling, 0 when not over
    #[must_use]
    pub const fn overage(&self) -> u32 {
        self.credits.saturating_sub(self.max_credits)
    }
}

/// Compute the load of every semester in `semesters`
#[must_use]
pub fn semester_loads(
    semesters: &[Semester],
    courses: &[Course],
    settings: &Settings,
) -> Vec<SemesterLoad> {
    semesters
        .iter()
        .map(|semester| {
            let credits = credits_in_semester(courses, &semester.id);
            let max_credits = settings.max_credits(&semester.id).unwrap_or(0);
            SemesterLoad {
                semester: semester.clone(),
                credits,
                max_credits,
                status: CreditStatus::of(credits, max_credits),
                course_count: courses.iter().filter(|c| c.is_in(&semester.id)).count(),
            }
        })
        .collect()
}

/// Result of checking a prospective assignment against the ceiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentCheck {
    /// Course being placed
    pub course_id: String,
    /// Target semester
    pub semester_id: String,
    /// Credits already in the target semester
    pub current_credits: u32,
    /// Credits the course adds
    pub course_credits: u32,
    /// Ceiling of the target semester
    pub max_credits: u32,
}

impl AssignmentCheck {
    /// Load after the assignment
    #[must_use]
    pub const fn projected_credits(&self) -> u32 {
        self.current_credits.saturating_add(self.course_credits)
    }

    /// Credits above the ceiling after the assignment, `None` when within it
    #[must_use]
    pub const fn overage(&self) -> Option<u32> {
        let projected = self.projected_credits();
        if projected > self.max_credits {
            Some(projected - self.max_credits)
        } else {
            None
        }
    }

    /// Whether the assignment needs explicit confirmation
    #[must_use]
    pub const fn exceeds_limit(&self) -> bool {
        self.overage().is_some()
    }
}
