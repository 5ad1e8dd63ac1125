//! Persistence gateway for the plan record
//!
//! The whole plan lives in one JSON record `{settings, courses, lastSaved}`.
//! Saving never fails loudly: errors are logged and the in-memory plan stays
//! authoritative. Loading treats an unreadable or unparseable record as
//! absent.

mod file;
mod seed;

pub use file::{FileStorage, PLAN_RECORD_FILE};
pub use seed::load_seed;

use crate::core::models::{Course, Plan, Settings, SettingsPatch};
use crate::{debug, error, warn};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Error as SerdeJsonError, Value};
use std::cell::RefCell;
use std::fmt;
use std::io;

/// Failure of the underlying record store
#[derive(Debug)]
pub enum StorageError {
    /// Reading, writing or deleting the record failed
    Io(io::Error),
    /// The plan could not be serialized
    Serialization(SerdeJsonError),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Serialization(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SerdeJsonError> for StorageError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

/// Result alias for record store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A single-record key/value store holding the serialized plan
pub trait PlanStorage {
    /// Raw record contents, `None` when nothing is stored
    ///
    /// # Errors
    /// Returns an error when the record exists but cannot be read.
    fn read(&self) -> StorageResult<Option<String>>;

    /// Replace the record
    ///
    /// # Errors
    /// Returns an error when the record cannot be written.
    fn write(&self, contents: &str) -> StorageResult<()>;

    /// Delete the record. Succeeds when nothing is stored.
    ///
    /// # Errors
    /// Returns an error when an existing record cannot be removed.
    fn clear(&self) -> StorageResult<()>;
}

/// Record store kept in memory, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `contents`
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            record: RefCell::new(Some(contents.into())),
        }
    }

    /// Current raw record
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl PlanStorage for MemoryStorage {
    fn read(&self) -> StorageResult<Option<String>> {
        Ok(self.record.borrow().clone())
    }

    fn write(&self, contents: &str) -> StorageResult<()> {
        *self.record.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        *self.record.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanRecord<'a> {
    settings: &'a Settings,
    courses: &'a [Course],
    last_saved: DateTime<Utc>,
}

/// Serialize the plan and write it as the stored record
///
/// # Errors
/// Returns an error when serialization or the write fails.
pub fn try_save_plan(
    storage: &dyn PlanStorage,
    settings: &Settings,
    courses: &[Course],
) -> StorageResult<DateTime<Utc>> {
    let last_saved = Utc::now();
    let record = PlanRecord {
        settings,
        courses,
        last_saved,
    };
    let json = serde_json::to_string(&record)?;
    storage.write(&json)?;
    Ok(last_saved)
}

/// Save the plan, logging instead of propagating failures
///
/// # Returns
/// The save time on success, `None` when the save failed
pub fn save_plan(
    storage: &dyn PlanStorage,
    settings: &Settings,
    courses: &[Course],
) -> Option<DateTime<Utc>> {
    match try_save_plan(storage, settings, courses) {
        Ok(stamp) => {
            debug!("Plan saved ({} courses)", courses.len());
            Some(stamp)
        }
        Err(err) => {
            error!("Failed to save plan: {err}");
            None
        }
    }
}

/// Read the stored plan, merged over `defaults`
///
/// Only the recognised top-level keys (`settings`, `courses`, `lastSaved`)
/// replace the matching field of `defaults`; a key that is missing or has the
/// wrong shape leaves the default in place. Stored settings are merged key by
/// key, so a non-integer `totalSemesters` falls back to the default count
/// without losing the other settings.
///
/// # Returns
/// `None` when no record exists, it cannot be read, or it is not a JSON object
#[must_use]
pub fn load_plan(storage: &dyn PlanStorage, defaults: Plan) -> Option<Plan> {
    let raw = match storage.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!("Failed to read stored plan: {err}");
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("Stored plan is corrupt, ignoring it: {err}");
            return None;
        }
    };

    let Value::Object(mut record) = value else {
        warn!("Stored plan is not a JSON object, ignoring it");
        return None;
    };

    let mut plan = defaults;
    if let Some(patch) = take_field::<SettingsPatch>(&mut record, "settings") {
        plan.settings.merge(&patch);
    }
    if let Some(courses) = take_field(&mut record, "courses") {
        plan.courses = courses;
    }
    if let Some(last_saved) = take_field(&mut record, "lastSaved") {
        plan.last_saved = Some(last_saved);
    }
    Some(plan)
}

fn take_field<T: serde::de::DeserializeOwned>(
    record: &mut serde_json::Map<String, Value>,
    key: &str,
) -> Option<T> {
    let value = record.remove(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("Ignoring malformed '{key}' in stored plan: {err}");
            None
        }
    }
}

/// Delete the stored record, logging failures
pub fn clear_plan(storage: &dyn PlanStorage) -> bool {
    match storage.clear() {
        Ok(()) => true,
        Err(err) => {
            error!("Failed to clear stored plan: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{CourseDraft, DEFAULT_TOTAL_SEMESTERS};

    struct BrokenStorage;

    impl PlanStorage for BrokenStorage {
        fn read(&self) -> StorageResult<Option<String>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
        fn write(&self, _contents: &str) -> StorageResult<()> {
            Err(io::Error::new(io::ErrorKind::Other, "quota exceeded").into())
        }
        fn clear(&self) -> StorageResult<()> {
            Ok(())
        }
    }

    fn sample_courses() -> Vec<Course> {
        let mut course =
            Course::from_draft("1".to_string(), CourseDraft::new("IF1210", "Dasar", 3));
        course.assigned_semester = Some("1".to_string());
        vec![course]
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let settings = Settings::default();
        let courses = sample_courses();

        let stamp = save_plan(&storage, &settings, &courses).unwrap();
        let plan = load_plan(&storage, Plan::default()).unwrap();

        assert_eq!(plan.settings, settings);
        assert_eq!(plan.courses, courses);
        assert_eq!(plan.last_saved, Some(stamp));
    }

    #[test]
    fn test_missing_record_is_none() {
        assert!(load_plan(&MemoryStorage::new(), Plan::default()).is_none());
    }

    #[test]
    fn test_corrupt_record_is_none() {
        let storage = MemoryStorage::with_contents("{not json");
        assert!(load_plan(&storage, Plan::default()).is_none());
        let storage = MemoryStorage::with_contents("[1, 2]");
        assert!(load_plan(&storage, Plan::default()).is_none());
    }

    #[test]
    fn test_partial_record_keeps_defaults() {
        let storage =
            MemoryStorage::with_contents(r#"{"settings":{"totalSemesters":6},"extra":1}"#);
        let defaults = Plan::new(Settings::default(), sample_courses());

        let plan = load_plan(&storage, defaults.clone()).unwrap();
        assert_eq!(plan.settings.total_semesters, 6);
        assert_eq!(plan.courses, defaults.courses);
        assert!(plan.last_saved.is_none());
    }

    #[test]
    fn test_non_integer_semester_count_keeps_other_settings() {
        for total in [r#""6""#, "6.5"] {
            let record = format!(
                r#"{{"settings":{{"totalSemesters":{total},"targetCredits":120,{}}}}}"#,
                r#""semesterMaxCredits":{"1":18}"#
            );
            let storage = MemoryStorage::with_contents(record);
            let plan = load_plan(&storage, Plan::default()).unwrap();

            assert_eq!(plan.settings.total_semesters, DEFAULT_TOTAL_SEMESTERS);
            assert_eq!(plan.settings.target_credits, 120);
            assert_eq!(plan.settings.max_credits("1"), Some(18));
        }
    }

    #[test]
    fn test_malformed_field_keeps_default() {
        let storage = MemoryStorage::with_contents(r#"{"courses":"oops"}"#);
        let defaults = Plan::new(Settings::default(), sample_courses());
        let plan = load_plan(&storage, defaults.clone()).unwrap();
        assert_eq!(plan.courses, defaults.courses);
    }

    #[test]
    fn test_failures_are_swallowed() {
        assert!(save_plan(&BrokenStorage, &Settings::default(), &[]).is_none());
        assert!(load_plan(&BrokenStorage, Plan::default()).is_none());
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::with_contents("{}");
        assert!(clear_plan(&storage));
        assert!(storage.contents().is_none());
    }
}
