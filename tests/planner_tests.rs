//! Integration tests for the planner controller

use chrono::Utc;
use study_planner::core::models::{CourseDraft, Plan};
use study_planner::core::planner::{
    AutoConfirm, ConfirmRequest, CreditStatus, Planner, PlannerError,
};
use study_planner::core::storage::MemoryStorage;

fn planner_with_semesters(total: u32) -> Planner {
    let mut seed = Plan::default();
    seed.settings.total_semesters = total;
    Planner::open(Box::new(MemoryStorage::new()), seed)
}

fn add(planner: &mut Planner, code: &str, credits: u32) -> String {
    planner
        .add_course(CourseDraft::new(code, format!("Course {code}"), credits))
        .expect("valid course")
}

#[test]
fn test_four_semester_walkthrough() {
    let mut planner = planner_with_semesters(4);

    let ids: Vec<&str> = planner.semesters().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "antara-1", "3", "4"]);

    let settings = planner.settings();
    assert_eq!(settings.max_credits("1"), Some(20));
    assert_eq!(settings.max_credits("2"), Some(20));
    assert_eq!(settings.max_credits("3"), Some(24));
    assert_eq!(settings.max_credits("4"), Some(24));
    assert_eq!(settings.max_credits("antara-1"), Some(9));

    for (n, credits) in [4, 4, 4, 4, 4].iter().enumerate() {
        let id = add(&mut planner, &format!("C{n}"), *credits);
        planner.assign_course(&id, "2", &mut AutoConfirm(false)).unwrap();
    }
    assert_eq!(planner.credits_in("2"), 20);
    assert_eq!(planner.credit_status("2"), Some(CreditStatus::Exact));

    let extra = add(&mut planner, "X1", 1);
    let check = planner.assignment_check(&extra, "2").unwrap();
    assert_eq!(check.overage(), Some(1));

    let mut prompts = 0;
    planner
        .assign_course(&extra, "2", &mut |request: &ConfirmRequest| {
            prompts += 1;
            matches!(request, ConfirmRequest::OverLimit { .. })
        })
        .unwrap();
    assert_eq!(prompts, 1);
    assert_eq!(planner.credit_status("2"), Some(CreditStatus::Over));
    let load = planner
        .semester_loads()
        .into_iter()
        .find(|l| l.semester.id == "2")
        .unwrap();
    assert_eq!(load.overage(), 1);
}

#[test]
fn test_new_course_starts_unassigned() {
    let mut planner = planner_with_semesters(8);
    let before = planner.total_credits_taken();
    let id = add(&mut planner, "IF1210", 3);

    assert!(planner.unassigned_courses().iter().any(|c| c.id == id));
    assert_eq!(planner.total_credits_taken(), before);
}

#[test]
fn test_assign_unassign_round_trip() {
    let mut planner = planner_with_semesters(8);
    let a = add(&mut planner, "A", 3);
    let b = add(&mut planner, "B", 2);
    planner.assign_course(&a, "3", &mut AutoConfirm(true)).unwrap();
    let before = planner.credits_in("3");

    planner.assign_course(&b, "3", &mut AutoConfirm(true)).unwrap();
    assert_eq!(planner.credits_in("3"), before + 2);
    assert!(planner.unassigned_courses().is_empty());

    planner.unassign_course(&b).unwrap();
    assert_eq!(planner.credits_in("3"), before);
    assert_eq!(planner.unassigned_courses().len(), 1);
}

#[test]
fn test_credit_boundaries_rejected() {
    let mut planner = planner_with_semesters(8);
    for credits in [0, 9] {
        let result = planner.add_course(CourseDraft::new("A", "Course", credits));
        assert!(matches!(result, Err(PlannerError::Validation(_))));
    }
    assert!(planner.courses().is_empty());
    assert!(planner.last_saved().is_none());

    for credits in [1, 8] {
        assert!(planner.add_course(CourseDraft::new("A", "Course", credits)).is_ok());
    }
}

#[test]
fn test_auto_map_is_idempotent_and_skips_missing_semesters() {
    let mut planner = planner_with_semesters(4);
    for (code, recommended) in [("A", Some(1)), ("B", Some(4)), ("C", Some(7)), ("D", None)] {
        let mut draft = CourseDraft::new(code, "Course", 2);
        draft.recommended_semester = recommended;
        planner.add_course(draft).unwrap();
    }

    assert_eq!(planner.auto_map(), 2);
    assert_eq!(planner.auto_map(), 0);

    let unassigned: Vec<&str> = planner
        .unassigned_courses()
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(unassigned, ["C", "D"]);
}

#[test]
fn test_json_export_import_round_trip() {
    let mut source = planner_with_semesters(6);
    source.set_target_credits(120);
    source.set_max_credits("antara-2", 6).unwrap();
    let id = add(&mut source, "IF2110", 4);
    add(&mut source, "IF2120", 3);
    source.assign_course(&id, "antara-1", &mut AutoConfirm(true)).unwrap();

    let exported = source.export_json(Utc::now()).unwrap();

    let mut target = planner_with_semesters(8);
    let count = target.import_json(&exported, &mut AutoConfirm(true)).unwrap();

    assert_eq!(count, 2);
    assert_eq!(target.courses(), source.courses());
    assert_eq!(target.settings(), source.settings());
    assert_eq!(target.semesters(), source.semesters());
}

#[test]
fn test_import_declined_changes_nothing() {
    let mut planner = planner_with_semesters(8);
    add(&mut planner, "KEEP", 2);
    let before = planner.plan();

    let doc = r#"{
        "settings": {"totalSemesters": 2},
        "courses": [{"id": "9", "code": "NEW", "credits": 3}]
    }"#;
    let result = planner.import_json(doc, &mut AutoConfirm(false));

    assert!(matches!(result, Err(PlannerError::Cancelled)));
    assert_eq!(planner.plan(), before);
    assert_eq!(planner.semesters().len(), 11);
}

#[test]
fn test_invalid_import_never_asks() {
    let mut planner = planner_with_semesters(8);
    let mut never = |_: &ConfirmRequest| -> bool { panic!("confirmation requested for bad input") };

    assert!(matches!(
        planner.import_json(r#"{"courses": {}}"#, &mut never),
        Err(PlannerError::Transfer(_))
    ));
    assert!(matches!(
        planner.import_csv("ID,Code\n\"1\",\"A\",\"extra\"\n", &mut never),
        Err(PlannerError::Transfer(_))
    ));
}

#[test]
fn test_csv_import_replaces_courses_and_keeps_settings() {
    let mut planner = planner_with_semesters(4);
    add(&mut planner, "OLD", 2);
    let settings = planner.settings().clone();

    let csv = "ID,Code,Name,Type,Credits,Lecturer,RecommendedSemester,AssignedSemester\n\
               \"\",\"MA1101\",\"Matematika, Dasar\",\"\",\"4\",\"\",\"\",\"1\"\n";
    let count = planner.import_csv(csv, &mut AutoConfirm(true)).unwrap();

    assert_eq!(count, 1);
    assert_eq!(planner.settings(), &settings);
    let course = &planner.courses()[0];
    assert_eq!(course.code, "MA1101");
    assert_eq!(course.name, "Matematika, Dasar");
    assert_eq!(course.recommended_semester, Some(1));
    assert!(course.is_in("1"));
    assert!(!course.id.is_empty());
}

#[test]
fn test_json_import_without_settings_keeps_semesters_and_ceilings() {
    let mut planner = planner_with_semesters(4);
    planner.set_max_credits("1", 18).unwrap();
    planner.set_target_credits(120);
    add(&mut planner, "OLD", 2);
    let settings = planner.settings().clone();
    let semesters = planner.semesters().to_vec();

    let doc = r#"{"courses": [
        {"id": "x1", "code": "NEW", "credits": 3, "assignedSemester": "1"}
    ]}"#;
    let count = planner.import_json(doc, &mut AutoConfirm(true)).unwrap();

    assert_eq!(count, 1);
    assert_eq!(planner.settings(), &settings);
    assert_eq!(planner.semesters(), semesters.as_slice());
    assert_eq!(planner.settings().max_credits("1"), Some(18));
    assert_eq!(planner.courses()[0].code, "NEW");
    assert_eq!(planner.credits_in("1"), 3);
}

#[test]
fn test_imported_huge_credits_do_not_overflow() {
    let mut planner = planner_with_semesters(4);
    let doc = r#"{"courses": [
        {"id": "big", "code": "BIG", "credits": 4294967295, "assignedSemester": "1"},
        {"id": "small", "code": "SMALL", "credits": 2, "assignedSemester": "1"},
        {"id": "late", "code": "LATE", "credits": 3}
    ]}"#;
    planner.import_json(doc, &mut AutoConfirm(true)).unwrap();

    assert_eq!(planner.total_credits_taken(), u32::MAX);
    assert_eq!(planner.credits_in("1"), u32::MAX);
    assert_eq!(planner.credit_status("1"), Some(CreditStatus::Over));
    assert_eq!(planner.semester_loads()[0].credits, u32::MAX);
    assert_eq!(planner.progress().credits_taken, u32::MAX);

    let check = planner.assignment_check("late", "1").unwrap();
    assert_eq!(check.projected_credits(), u32::MAX);
    planner.assign_course("late", "1", &mut AutoConfirm(true)).unwrap();
    assert!(planner.course("late").unwrap().is_in("1"));
}

#[test]
fn test_corrupt_record_behaves_like_no_record() {
    let mut seed = Plan::default();
    seed.settings.total_semesters = 4;

    let fresh = Planner::open(Box::new(MemoryStorage::new()), seed.clone());
    let corrupt = Planner::open(Box::new(MemoryStorage::with_contents("{not json")), seed);

    assert_eq!(fresh.plan(), corrupt.plan());
    assert_eq!(fresh.semesters(), corrupt.semesters());
}

#[test]
fn test_reset_restores_seed() {
    let mut seed = Plan::default();
    seed.settings.total_semesters = 4;
    let mut planner = Planner::open(Box::new(MemoryStorage::new()), seed);

    add(&mut planner, "A", 3);
    planner.set_total_semesters(10);

    assert!(matches!(
        planner.reset(&mut AutoConfirm(false)),
        Err(PlannerError::Cancelled)
    ));
    assert_eq!(planner.courses().len(), 1);

    planner.reset(&mut AutoConfirm(true)).unwrap();
    assert!(planner.courses().is_empty());
    assert_eq!(planner.settings().total_semesters, 4);
    assert_eq!(planner.semesters().len(), 5);
    assert!(planner.last_saved().is_none());
}
