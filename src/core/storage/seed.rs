//! Initial plan used when nothing is stored yet

use crate::core::models::Plan;
use crate::core::transfer::fill_missing_ids;
use crate::{info, warn};
use std::fs;
use std::path::Path;

/// Read the seed plan `{settings, courses}` from `path`
///
/// Any failure is logged and yields default settings with no courses.
/// Courses without an id get one synthesized from the current time.
#[must_use]
pub fn load_seed(path: &Path) -> Plan {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!("Could not read seed data {}: {err}", path.display());
            return Plan::default();
        }
    };

    let mut plan: Plan = match serde_json::from_str(&content) {
        Ok(plan) => plan,
        Err(err) => {
            warn!("Seed data {} is invalid: {err}", path.display());
            return Plan::default();
        }
    };

    fill_missing_ids(&mut plan.courses, chrono::Utc::now().timestamp_millis());
    plan.last_saved = None;
    info!(
        "Loaded {} seed courses from {}",
        plan.courses.len(),
        path.display()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_missing_seed_is_empty_default() {
        let dir = TempDir::new().unwrap();
        let plan = load_seed(&dir.path().join("courses.json"));
        assert!(plan.courses.is_empty());
        assert_eq!(plan.settings, Settings::default());
    }

    #[test]
    fn test_seed_with_courses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.json");
        fs::write(
            &path,
            r#"{"settings":{"totalSemesters":4},"courses":[{"code":"A","credits":3}]}"#,
        )
        .unwrap();

        let plan = load_seed(&path);
        assert_eq!(plan.settings.total_semesters, 4);
        assert_eq!(plan.courses.len(), 1);
        assert!(!plan.courses[0].id.is_empty());
    }

    #[test]
    fn test_invalid_seed_is_empty_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.json");
        fs::write(&path, "{").unwrap();
        assert!(load_seed(&path).courses.is_empty());
    }
}
