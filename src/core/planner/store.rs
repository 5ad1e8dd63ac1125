//! In-memory course collection
//!
//! The store is the only owner of the course list. Derived aggregates
//! (unassigned courses, total assigned credits) are cached and the cache is
//! dropped on every mutating call, including in-place edits that leave the
//! number of courses unchanged.

use super::credits::{self, AssignmentCheck};
use crate::core::models::{Course, CourseDraft, Semester, Settings, ValidationError};
use std::cell::OnceCell;
use std::collections::HashSet;

/// Ordered collection of courses with cached aggregates
#[derive(Debug, Clone, Default)]
pub struct CourseStore {
    courses: Vec<Course>,
    unassigned: OnceCell<Vec<usize>>,
    total_taken: OnceCell<u32>,
}

impl CourseStore {
    /// Create a store holding `courses` in the given order
    #[must_use]
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Self::default()
        }
    }

    /// All courses in display order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the store holds no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.id == id)
    }

    fn invalidate(&mut self) {
        self.unassigned = OnceCell::new();
        self.total_taken = OnceCell::new();
    }

    /// Fresh id derived from the current time in milliseconds, bumped until
    /// it collides with no existing course
    #[must_use]
    pub fn next_id(&self) -> String {
        let taken: HashSet<&str> = self.courses.iter().map(|c| c.id.as_str()).collect();
        let mut stamp = chrono::Utc::now().timestamp_millis();
        while taken.contains(stamp.to_string().as_str()) {
            stamp += 1;
        }
        stamp.to_string()
    }

    /// Validate and append a new, unassigned course
    ///
    /// # Errors
    /// Returns the validation failure; the store is left unchanged.
    pub fn add(&mut self, draft: CourseDraft) -> Result<&Course, ValidationError> {
        draft.validate()?;
        let id = self.next_id();
        self.courses.push(Course::from_draft(id, draft));
        self.invalidate();
        Ok(&self.courses[self.courses.len() - 1])
    }

    /// Validate and replace the editable fields of course `id` in place
    ///
    /// # Returns
    /// `Ok(false)` when no course has that id
    ///
    /// # Errors
    /// Returns the validation failure; the store is left unchanged.
    pub fn update(&mut self, id: &str, draft: CourseDraft) -> Result<bool, ValidationError> {
        draft.validate()?;
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };
        self.courses[idx].apply_draft(draft);
        self.invalidate();
        Ok(true)
    }

    /// Delete course `id`, returning it if it existed
    pub fn remove(&mut self, id: &str) -> Option<Course> {
        let idx = self.position(id)?;
        let removed = self.courses.remove(idx);
        self.invalidate();
        Some(removed)
    }

    /// Compute the load semester `semester_id` would carry if course `id`
    /// were placed there. The course itself is not counted twice when it is
    /// already in that semester.
    #[must_use]
    pub fn check_assignment(
        &self,
        id: &str,
        semester_id: &str,
        settings: &Settings,
    ) -> Option<AssignmentCheck> {
        let course = self.get(id)?;
        let mut current_credits = credits::credits_in_semester(&self.courses, semester_id);
        if course.is_in(semester_id) {
            current_credits = current_credits.saturating_sub(course.credits);
        }
        Some(AssignmentCheck {
            course_id: course.id.clone(),
            semester_id: semester_id.to_string(),
            current_credits,
            course_credits: course.credits,
            max_credits: settings.max_credits(semester_id).unwrap_or(0),
        })
    }

    /// Place course `id` in `semester_id`. No ceiling check happens here.
    ///
    /// # Returns
    /// `false` when no course has that id
    pub fn assign(&mut self, id: &str, semester_id: &str) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.courses[idx].assigned_semester = Some(semester_id.to_string());
        self.invalidate();
        true
    }

    /// Clear the placement of course `id`
    ///
    /// # Returns
    /// `false` when no course has that id
    pub fn unassign(&mut self, id: &str) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.courses[idx].assigned_semester = None;
        self.invalidate();
        true
    }

    /// Place every unassigned course in its recommended semester when that
    /// semester is in `semesters`. Other courses are left untouched.
    ///
    /// # Returns
    /// The number of courses placed
    pub fn auto_map(&mut self, semesters: &[Semester]) -> usize {
        let ids: HashSet<&str> = semesters.iter().map(|s| s.id.as_str()).collect();
        let mut mapped = 0;
        for course in &mut self.courses {
            if course.is_assigned() {
                continue;
            }
            let Some(recommended) = course.recommended_semester.map(|n| n.to_string()) else {
                continue;
            };
            if ids.contains(recommended.as_str()) {
                course.assigned_semester = Some(recommended);
                mapped += 1;
            }
        }
        if mapped > 0 {
            self.invalidate();
        }
        mapped
    }

    /// Replace the whole collection
    pub fn replace_all(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        self.invalidate();
    }

    /// Remove every course
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Courses with no semester, in display order
    #[must_use]
    pub fn unassigned(&self) -> Vec<&Course> {
        self.unassigned
            .get_or_init(|| {
                self.courses
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| !c.is_assigned())
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .iter()
            .map(|&idx| &self.courses[idx])
            .collect()
    }

    /// Sum of credits over all assigned courses
    #[must_use]
    pub fn total_credits_taken(&self) -> u32 {
        *self
            .total_taken
            .get_or_init(|| credits::assigned_credits(&self.courses))
    }

    /// Sum of credits placed in `semester_id`, always computed fresh
    #[must_use]
    pub fn credits_in(&self, semester_id: &str) -> u32 {
        credits::credits_in_semester(&self.courses, semester_id)
    }

    /// Courses assigned to a semester id that is not in `semesters`
    #[must_use]
    pub fn orphaned<'a>(&'a self, semesters: &[Semester]) -> Vec<&'a Course> {
        let ids: HashSet<&str> = semesters.iter().map(|s| s.id.as_str()).collect();
        self.courses
            .iter()
            .filter(|c| {
                c.assigned_semester
                    .as_deref()
                    .is_some_and(|s| !ids.contains(s))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::planner::semesters::semester_list;

    fn draft(code: &str, credits: u32) -> CourseDraft {
        CourseDraft::new(code, format!("Course {code}"), credits)
    }

    #[test]
    fn test_add_starts_unassigned() {
        let mut store = CourseStore::default();
        let id = store.add(draft("IF1210", 3)).unwrap().id.clone();

        assert_eq!(store.len(), 1);
        assert_eq!(store.unassigned().len(), 1);
        assert_eq!(store.unassigned()[0].id, id);
        assert_eq!(store.total_credits_taken(), 0);
    }

    #[test]
    fn test_add_rejects_invalid_without_change() {
        let mut store = CourseStore::default();
        assert!(store.add(draft("IF1210", 0)).is_err());
        assert!(store.add(draft("IF1210", 9)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique_within_same_millisecond() {
        let mut store = CourseStore::default();
        let a = store.add(draft("A", 2)).unwrap().id.clone();
        let b = store.add(draft("B", 2)).unwrap().id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_assign_invalidates_cache_without_length_change() {
        let mut store = CourseStore::default();
        let id = store.add(draft("A", 3)).unwrap().id.clone();
        assert_eq!(store.unassigned().len(), 1);
        assert_eq!(store.total_credits_taken(), 0);

        assert!(store.assign(&id, "1"));
        assert!(store.unassigned().is_empty());
        assert_eq!(store.total_credits_taken(), 3);

        assert!(store.unassign(&id));
        assert_eq!(store.unassigned().len(), 1);
        assert_eq!(store.total_credits_taken(), 0);
    }

    #[test]
    fn test_update_in_place_preserves_position() {
        let mut store = CourseStore::default();
        let first = store.add(draft("A", 2)).unwrap().id.clone();
        store.add(draft("B", 2)).unwrap();
        store.assign(&first, "1");
        assert_eq!(store.total_credits_taken(), 2);

        assert_eq!(store.update(&first, draft("A2", 5)), Ok(true));
        assert_eq!(store.courses()[0].code, "A2");
        assert_eq!(store.total_credits_taken(), 5);
        assert_eq!(store.update("missing", draft("C", 2)), Ok(false));
    }

    #[test]
    fn test_update_rejects_invalid() {
        let mut store = CourseStore::default();
        let id = store.add(draft("A", 2)).unwrap().id.clone();
        assert!(store.update(&id, draft("", 2)).is_err());
        assert_eq!(store.courses()[0].code, "A");
    }

    #[test]
    fn test_remove() {
        let mut store = CourseStore::default();
        let id = store.add(draft("A", 2)).unwrap().id.clone();
        assert!(store.remove("missing").is_none());
        assert_eq!(store.remove(&id).map(|c| c.code), Some("A".to_string()));
        assert!(store.unassigned().is_empty());
    }

    #[test]
    fn test_check_assignment_reports_overage() {
        let mut settings = Settings::default();
        settings.semester_max_credits.insert("2".to_string(), 20);
        let mut store = CourseStore::default();
        for code in ["A", "B", "C", "D", "E"] {
            let id = store.add(draft(code, 4)).unwrap().id.clone();
            store.assign(&id, "2");
        }
        let extra = store.add(draft("F", 1)).unwrap().id.clone();

        let check = store.check_assignment(&extra, "2", &settings).unwrap();
        assert_eq!(check.current_credits, 20);
        assert_eq!(check.overage(), Some(1));

        let already_there = store.courses()[0].id.clone();
        let check = store
            .check_assignment(&already_there, "2", &settings)
            .unwrap();
        assert_eq!(check.projected_credits(), 20);
        assert!(!check.exceeds_limit());
    }

    #[test]
    fn test_auto_map_is_idempotent() {
        let semesters = semester_list(4);
        let mut store = CourseStore::default();
        let mut recommended = |code: &str, rec: Option<u32>| {
            let mut d = draft(code, 3);
            d.recommended_semester = rec;
            store.add(d).unwrap().id.clone()
        };
        let in_range = recommended("A", Some(3));
        let out_of_range = recommended("B", Some(7));
        let none = recommended("C", None);

        assert_eq!(store.auto_map(&semesters), 1);
        assert_eq!(store.auto_map(&semesters), 0);
        assert_eq!(
            store.get(&in_range).unwrap().assigned_semester.as_deref(),
            Some("3")
        );
        assert!(!store.get(&out_of_range).unwrap().is_assigned());
        assert!(!store.get(&none).unwrap().is_assigned());
    }

    #[test]
    fn test_auto_map_skips_assigned_courses() {
        let semesters = semester_list(4);
        let mut store = CourseStore::default();
        let mut d = draft("A", 3);
        d.recommended_semester = Some(1);
        let id = store.add(d).unwrap().id.clone();
        store.assign(&id, "antara-1");

        assert_eq!(store.auto_map(&semesters), 0);
        assert!(store.get(&id).unwrap().is_in("antara-1"));
    }

    #[test]
    fn test_orphaned_after_shrink() {
        let mut store = CourseStore::default();
        let id = store.add(draft("A", 3)).unwrap().id.clone();
        store.assign(&id, "8");

        assert!(store.orphaned(&semester_list(8)).is_empty());
        assert_eq!(store.orphaned(&semester_list(6)).len(), 1);
    }
}
