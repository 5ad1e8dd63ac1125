//! Integration tests for the on-disk plan record

use std::fs;
use study_planner::core::models::{CourseDraft, Plan};
use study_planner::core::planner::{AutoConfirm, Planner};
use study_planner::core::storage::{load_seed, FileStorage, PlanStorage, PLAN_RECORD_FILE};
use tempfile::TempDir;

fn seed() -> Plan {
    let mut plan = Plan::default();
    plan.settings.total_semesters = 4;
    plan
}

#[test]
fn test_plan_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let saved_at = {
        let mut planner = Planner::open(Box::new(FileStorage::in_dir(dir.path())), seed());
        let id = planner
            .add_course(CourseDraft::new("IF2110", "Algoritma dan Struktur Data", 4))
            .unwrap();
        planner.assign_course(&id, "antara-1", &mut AutoConfirm(true)).unwrap();
        planner.set_target_credits(100);
        planner.last_saved()
    };
    assert!(saved_at.is_some());
    assert!(dir.path().join(PLAN_RECORD_FILE).exists());

    let reopened = Planner::open(Box::new(FileStorage::in_dir(dir.path())), Plan::default());
    assert_eq!(reopened.courses().len(), 1);
    assert!(reopened.courses()[0].is_in("antara-1"));
    assert_eq!(reopened.settings().target_credits, 100);
    assert_eq!(reopened.settings().total_semesters, 4);
    assert_eq!(reopened.last_saved(), saved_at);
}

#[test]
fn test_opening_does_not_write() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(dir.path());
    let path = storage.path().to_path_buf();

    let planner = Planner::open(Box::new(storage), seed());
    assert_eq!(planner.semesters().len(), 5);
    assert!(!path.exists());
}

#[test]
fn test_partial_record_keeps_seed_courses() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::in_dir(dir.path());
    storage
        .write(r#"{"settings":{"totalSemesters":2,"semesterMaxCredits":{},"targetCredits":60}}"#)
        .unwrap();

    let mut seed = seed();
    seed.courses.push(study_planner::core::models::Course::from_draft(
        "1".to_string(),
        CourseDraft::new("KU1001", "Olah Raga", 1),
    ));

    let planner = Planner::open(Box::new(storage), seed);
    assert_eq!(planner.settings().total_semesters, 2);
    assert_eq!(planner.settings().target_credits, 60);
    assert_eq!(planner.courses().len(), 1);
    assert_eq!(planner.semesters().len(), 2);
}

#[test]
fn test_reset_removes_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PLAN_RECORD_FILE);

    let mut planner = Planner::open(Box::new(FileStorage::new(&path)), seed());
    planner.add_course(CourseDraft::new("A", "Course A", 2)).unwrap();
    assert!(path.exists());

    planner.reset(&mut AutoConfirm(true)).unwrap();
    assert!(!path.exists());
    assert!(planner.courses().is_empty());
}

#[test]
fn test_bundled_seed_loads() {
    let plan = load_seed(std::path::Path::new("data/courses.json"));
    assert_eq!(plan.settings.total_semesters, 8);
    assert_eq!(plan.settings.target_credits, 144);
    assert!(!plan.courses.is_empty());
    assert!(plan.courses.iter().all(|c| !c.id.is_empty()));
    assert!(plan.courses.iter().all(|c| !c.is_assigned()));
}

#[test]
fn test_seed_auto_map_fills_recommended_semesters() {
    let dir = TempDir::new().unwrap();
    let plan = load_seed(std::path::Path::new("data/courses.json"));
    let total = plan.courses.len();

    let mut planner = Planner::open(Box::new(FileStorage::in_dir(dir.path())), plan);
    assert_eq!(planner.auto_map(), total);
    assert!(planner.unassigned_courses().is_empty());

    let record = fs::read_to_string(dir.path().join(PLAN_RECORD_FILE)).unwrap();
    assert!(record.contains("\"lastSaved\""));
}
