//! Course command handlers

use super::{fail, semester_label, StdinConfirm};
use crate::args::CourseSubcommand;
use study_planner::core::i18n::Translator;
use study_planner::core::models::Course;
use study_planner::core::planner::Planner;
use study_planner::info;

/// Dispatch course subcommands
pub fn run(subcommand: CourseSubcommand, planner: &mut Planner, t: &Translator) {
    match subcommand {
        CourseSubcommand::Add { fields } => {
            let draft = fields.into_draft();
            let code = draft.code.clone();
            match planner.add_course(draft) {
                Ok(id) => {
                    info!("Added course {code} as {id}");
                    println!("✓ {} [{id}]", t.t_with("msg.course_added", &[("code", &code)]));
                }
                Err(e) => fail(t, &e),
            }
        }
        CourseSubcommand::Edit { id, fields } => {
            let draft = fields.into_draft();
            let code = draft.code.clone();
            if let Err(e) = planner.update_course(&id, draft) {
                fail(t, &e);
            }
            println!("✓ {}", t.t_with("msg.course_updated", &[("code", &code)]));
        }
        CourseSubcommand::Remove { id, yes } => {
            match planner.remove_course(&id, &mut StdinConfirm::new(t, yes)) {
                Ok(course) => println!(
                    "✓ {}",
                    t.t_with("msg.course_removed", &[("code", &course.code)])
                ),
                Err(e) => fail(t, &e),
            }
        }
        CourseSubcommand::List { unassigned } => {
            let courses: Vec<&Course> = if unassigned {
                planner.unassigned_courses()
            } else {
                planner.courses().iter().collect()
            };
            print_table(&courses, t);
        }
    }
}

fn print_table(courses: &[&Course], t: &Translator) {
    println!(
        "{:<15} {:<10} {:<36} {:>4} {:<10} {:>4} {:<14}",
        "ID",
        "Code",
        "Name",
        t.t("label.credits"),
        "Type",
        "Rec",
        t.t("label.semester"),
    );
    for course in courses {
        let placed = course
            .assigned_semester
            .as_deref()
            .map_or_else(|| t.t("label.unassigned"), semester_label);
        let recommended = course
            .recommended_semester
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        println!(
            "{:<15} {:<10} {:<36} {:>4} {:<10} {:>4} {:<14}",
            course.id,
            course.code,
            truncate(&course.name, 36),
            course.credits,
            course.course_type,
            recommended,
            placed,
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
