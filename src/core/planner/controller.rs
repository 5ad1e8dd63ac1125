//! Planner controller
//!
//! Owns the settings, the course store and the derived semester list. Every
//! mutating call updates what it affects and then writes the plan through
//! the persistence gateway.

use super::confirm::{Confirm, ConfirmRequest};
use super::credits::{self, AssignmentCheck, CreditStatus, SemesterLoad};
use super::semesters;
use super::store::CourseStore;
use crate::core::models::{
    Course, CourseDraft, Plan, Semester, Settings, ValidationError, MAX_TOTAL_SEMESTERS,
};
use crate::core::storage::{self, PlanStorage};
use crate::core::transfer::{self, TransferError};
use crate::{debug, info, warn};
use chrono::{DateTime, Utc};
use std::fmt;

/// Why a planner operation did not happen
#[derive(Debug)]
pub enum PlannerError {
    /// Course form failed validation
    Validation(ValidationError),
    /// Import document was rejected
    Transfer(TransferError),
    /// No course with this id
    CourseNotFound(String),
    /// No semester with this id in the current list
    UnknownSemester(String),
    /// The confirmation hook declined
    Cancelled,
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Transfer(err) => write!(f, "import/export failed: {err}"),
            Self::CourseNotFound(id) => write!(f, "course '{id}' not found"),
            Self::UnknownSemester(id) => write!(f, "semester '{id}' does not exist"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Transfer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for PlannerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<TransferError> for PlannerError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// Graduation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Credits of all assigned courses
    pub credits_taken: u32,
    /// Graduation target
    pub target_credits: u32,
    /// `round(taken / target * 100)`
    pub percentage: u32,
    /// Courses not yet placed
    pub unassigned_count: usize,
}

/// The study plan and everything that mutates it
pub struct Planner {
    settings: Settings,
    store: CourseStore,
    semesters: Vec<Semester>,
    storage: Box<dyn PlanStorage>,
    seed: Plan,
    last_saved: Option<DateTime<Utc>>,
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("settings", &self.settings)
            .field("courses", &self.store.len())
            .field("semesters", &self.semesters.len())
            .field("last_saved", &self.last_saved)
            .finish_non_exhaustive()
    }
}

impl Planner {
    /// Open the plan held by `storage`, or start from `seed` when there is
    /// no usable record. Opening does not write anything.
    #[must_use]
    pub fn open(storage: Box<dyn PlanStorage>, seed: Plan) -> Self {
        let plan = storage::load_plan(storage.as_ref(), seed.clone()).unwrap_or_else(|| {
            info!("No stored plan found, starting from seed data");
            seed.clone()
        });

        let mut planner = Self {
            settings: plan.settings,
            store: CourseStore::new(plan.courses),
            semesters: Vec::new(),
            storage,
            seed,
            last_saved: plan.last_saved,
        };
        planner.regenerate();
        planner
    }

    fn regenerate(&mut self) {
        if self.settings.total_semesters > MAX_TOTAL_SEMESTERS {
            warn!(
                "{} semesters requested, limiting to {MAX_TOTAL_SEMESTERS}",
                self.settings.total_semesters
            );
            self.settings.total_semesters = MAX_TOTAL_SEMESTERS;
        }
        let total = self.settings.total_semesters;
        self.semesters = semesters::semester_list(total);
        let added =
            semesters::fill_default_max_credits(total, &mut self.settings.semester_max_credits);
        if added > 0 {
            debug!("Filled {added} default credit ceilings for {total} semesters");
        }
    }

    fn persist(&mut self) {
        if let Some(stamp) =
            storage::save_plan(self.storage.as_ref(), &self.settings, self.store.courses())
        {
            self.last_saved = Some(stamp);
        }
    }

    /// Plan-wide settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current semester list
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// All courses in display order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        self.store.courses()
    }

    /// Look up a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.store.get(id)
    }

    /// When the plan was last written successfully
    #[must_use]
    pub const fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Snapshot of the persisted aggregate
    #[must_use]
    pub fn plan(&self) -> Plan {
        Plan {
            settings: self.settings.clone(),
            courses: self.store.courses().to_vec(),
            last_saved: self.last_saved,
        }
    }

    fn require_semester(&self, semester_id: &str) -> Result<&Semester, PlannerError> {
        self.semesters
            .iter()
            .find(|s| s.id == semester_id)
            .ok_or_else(|| PlannerError::UnknownSemester(semester_id.to_string()))
    }

    fn require_course(&self, id: &str) -> Result<&Course, PlannerError> {
        self.store
            .get(id)
            .ok_or_else(|| PlannerError::CourseNotFound(id.to_string()))
    }

    /// Add a course; it starts unassigned
    ///
    /// # Returns
    /// The new course's id
    ///
    /// # Errors
    /// Returns [`PlannerError::Validation`] and leaves the plan unchanged when
    /// the draft is invalid.
    pub fn add_course(&mut self, draft: CourseDraft) -> Result<String, PlannerError> {
        let id = self.store.add(draft)?.id.clone();
        self.persist();
        Ok(id)
    }

    /// Replace the editable fields of course `id`
    ///
    /// # Errors
    /// Returns a validation error or [`PlannerError::CourseNotFound`].
    pub fn update_course(&mut self, id: &str, draft: CourseDraft) -> Result<(), PlannerError> {
        if !self.store.update(id, draft)? {
            return Err(PlannerError::CourseNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// Delete course `id` after confirmation
    ///
    /// # Errors
    /// Returns [`PlannerError::CourseNotFound`] or [`PlannerError::Cancelled`].
    pub fn remove_course(
        &mut self,
        id: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<Course, PlannerError> {
        let course = self.require_course(id)?;
        let request = ConfirmRequest::DeleteCourse {
            id: course.id.clone(),
            code: course.code.clone(),
        };
        if !confirm.confirm(&request) {
            return Err(PlannerError::Cancelled);
        }
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| PlannerError::CourseNotFound(id.to_string()))?;
        self.persist();
        Ok(removed)
    }

    /// Load figures for placing course `id` in `semester_id`, without placing it
    ///
    /// # Errors
    /// Returns [`PlannerError::UnknownSemester`] or [`PlannerError::CourseNotFound`].
    pub fn assignment_check(
        &self,
        id: &str,
        semester_id: &str,
    ) -> Result<AssignmentCheck, PlannerError> {
        self.require_semester(semester_id)?;
        self.store
            .check_assignment(id, semester_id, &self.settings)
            .ok_or_else(|| PlannerError::CourseNotFound(id.to_string()))
    }

    /// Place course `id` in `semester_id`
    ///
    /// When the placement would exceed the semester's ceiling, `confirm` is
    /// asked first; a refusal leaves the plan unchanged.
    ///
    /// # Errors
    /// Returns [`PlannerError::UnknownSemester`], [`PlannerError::CourseNotFound`]
    /// or [`PlannerError::Cancelled`].
    pub fn assign_course(
        &mut self,
        id: &str,
        semester_id: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<AssignmentCheck, PlannerError> {
        let check = self.assignment_check(id, semester_id)?;
        if check.exceeds_limit() {
            let request = ConfirmRequest::OverLimit {
                code: self.require_course(id)?.code.clone(),
                check: check.clone(),
            };
            if !confirm.confirm(&request) {
                return Err(PlannerError::Cancelled);
            }
        }
        self.store.assign(id, semester_id);
        self.persist();
        Ok(check)
    }

    /// Take course `id` out of its semester
    ///
    /// # Errors
    /// Returns [`PlannerError::CourseNotFound`].
    pub fn unassign_course(&mut self, id: &str) -> Result<(), PlannerError> {
        if !self.store.unassign(id) {
            return Err(PlannerError::CourseNotFound(id.to_string()));
        }
        self.persist();
        Ok(())
    }

    /// Place unassigned courses in their recommended semester where it exists
    ///
    /// # Returns
    /// The number of courses placed
    pub fn auto_map(&mut self) -> usize {
        let mapped = self.store.auto_map(&self.semesters);
        if mapped > 0 {
            info!("Auto-mapped {mapped} courses");
            self.persist();
        }
        mapped
    }

    /// Change the number of regular semesters and regenerate the list.
    /// Assignments to semesters that disappear are kept; see
    /// [`orphaned_courses`](Self::orphaned_courses).
    pub fn set_total_semesters(&mut self, total: u32) {
        self.settings.total_semesters = total;
        self.regenerate();
        self.persist();
    }

    /// Set the credit ceiling of an existing semester
    ///
    /// # Errors
    /// Returns [`PlannerError::UnknownSemester`].
    pub fn set_max_credits(
        &mut self,
        semester_id: &str,
        max_credits: u32,
    ) -> Result<(), PlannerError> {
        self.require_semester(semester_id)?;
        self.settings
            .semester_max_credits
            .insert(semester_id.to_string(), max_credits);
        self.persist();
        Ok(())
    }

    /// Set the graduation target
    pub fn set_target_credits(&mut self, target: u32) {
        self.settings.target_credits = target;
        self.persist();
    }

    /// Credits placed in `semester_id`
    #[must_use]
    pub fn credits_in(&self, semester_id: &str) -> u32 {
        self.store.credits_in(semester_id)
    }

    /// Load status of `semester_id`, `None` when it has no ceiling
    #[must_use]
    pub fn credit_status(&self, semester_id: &str) -> Option<CreditStatus> {
        let max = self.settings.max_credits(semester_id)?;
        Some(CreditStatus::of(self.credits_in(semester_id), max))
    }

    /// Load of every semester in list order
    #[must_use]
    pub fn semester_loads(&self) -> Vec<SemesterLoad> {
        credits::semester_loads(&self.semesters, self.store.courses(), &self.settings)
    }

    /// Courses with no semester
    #[must_use]
    pub fn unassigned_courses(&self) -> Vec<&Course> {
        self.store.unassigned()
    }

    /// Sum of credits over all assigned courses
    #[must_use]
    pub fn total_credits_taken(&self) -> u32 {
        self.store.total_credits_taken()
    }

    /// Graduation progress figures
    #[must_use]
    pub fn progress(&self) -> Progress {
        let credits_taken = self.total_credits_taken();
        let target_credits = self.settings.target_credits;
        Progress {
            credits_taken,
            target_credits,
            percentage: credits::progress_percentage(credits_taken, target_credits),
            unassigned_count: self.store.unassigned().len(),
        }
    }

    /// Courses assigned to a semester that is no longer in the list
    #[must_use]
    pub fn orphaned_courses(&self) -> Vec<&Course> {
        self.store.orphaned(&self.semesters)
    }

    /// Pretty JSON export stamped with `export_date`
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn export_json(&self, export_date: DateTime<Utc>) -> Result<String, PlannerError> {
        Ok(transfer::export_json(
            &self.settings,
            self.store.courses(),
            export_date,
        )?)
    }

    /// CSV export of the courses
    ///
    /// # Errors
    /// Returns an error if the CSV writer fails.
    pub fn export_csv(&self) -> Result<String, PlannerError> {
        Ok(transfer::export_csv(self.store.courses())?)
    }

    fn confirm_replace(
        &self,
        incoming: usize,
        confirm: &mut dyn Confirm,
    ) -> Result<(), PlannerError> {
        let request = ConfirmRequest::ReplaceCourses {
            current: self.store.len(),
            incoming,
        };
        if confirm.confirm(&request) {
            Ok(())
        } else {
            Err(PlannerError::Cancelled)
        }
    }

    /// Replace all courses from a JSON export, merging its settings if present
    ///
    /// The document is parsed completely before `confirm` is asked, and
    /// nothing changes unless both succeed.
    ///
    /// # Returns
    /// The number of imported courses
    ///
    /// # Errors
    /// Returns [`PlannerError::Transfer`] or [`PlannerError::Cancelled`].
    pub fn import_json(
        &mut self,
        text: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<usize, PlannerError> {
        let import = transfer::import_json(text, Utc::now().timestamp_millis())?;
        self.confirm_replace(import.courses.len(), confirm)?;

        let count = import.courses.len();
        if let Some(patch) = &import.settings {
            self.settings.merge(patch);
            self.regenerate();
        }
        self.store.replace_all(import.courses);
        info!("Imported {count} courses from JSON");
        self.persist();
        Ok(count)
    }

    /// Replace all courses from CSV text. Settings are not touched.
    ///
    /// # Returns
    /// The number of imported courses
    ///
    /// # Errors
    /// Returns [`PlannerError::Transfer`] or [`PlannerError::Cancelled`].
    pub fn import_csv(
        &mut self,
        text: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<usize, PlannerError> {
        let courses = transfer::import_csv(text, Utc::now().timestamp_millis())?;
        self.confirm_replace(courses.len(), confirm)?;

        let count = courses.len();
        self.store.replace_all(courses);
        info!("Imported {count} courses from CSV");
        self.persist();
        Ok(count)
    }

    /// Erase the stored record and go back to the seed plan
    ///
    /// # Errors
    /// Returns [`PlannerError::Cancelled`].
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> Result<(), PlannerError> {
        if !confirm.confirm(&ConfirmRequest::Reset) {
            return Err(PlannerError::Cancelled);
        }
        storage::clear_plan(self.storage.as_ref());
        self.settings = self.seed.settings.clone();
        self.store.replace_all(self.seed.courses.clone());
        self.last_saved = None;
        self.regenerate();
        info!("Plan reset to seed data");
        Ok(())
    }
}
