//! Semester and settings command handlers

use super::{fail, semester_label, StdinConfirm};
use crate::args::SettingsSubcommand;
use study_planner::core::i18n::Translator;
use study_planner::core::planner::{CreditStatus, Planner};

fn status_text(t: &Translator, status: CreditStatus) -> String {
    t.t(&format!("status.{status}"))
}

/// Print every semester with its load
pub fn list(planner: &Planner, t: &Translator) {
    println!(
        "{:<12} {:<14} {:>6} {:>10}  {}",
        "ID",
        t.t("label.semester"),
        t.t("label.credits"),
        t.t("label.max_credits"),
        t.t("label.status"),
    );
    for load in planner.semester_loads() {
        let status = match load.overage() {
            0 => status_text(t, load.status),
            over => format!("{} (+{over})", status_text(t, load.status)),
        };
        println!(
            "{:<12} {:<14} {:>6} {:>10}  {}",
            load.semester.id, load.semester.name, load.credits, load.max_credits, status
        );
    }
}

/// Place a course, asking before going over the ceiling
pub fn assign(planner: &mut Planner, t: &Translator, id: &str, semester: &str, yes: bool) {
    match planner.assign_course(id, semester, &mut StdinConfirm::new(t, yes)) {
        Ok(_) => {
            let code = planner.course(id).map(|c| c.code.clone()).unwrap_or_default();
            println!(
                "✓ {}",
                t.t_with(
                    "msg.assigned",
                    &[("code", &code), ("semester", &semester_label(semester))]
                )
            );
        }
        Err(e) => fail(t, &e),
    }
}

/// Take a course out of its semester
pub fn unassign(planner: &mut Planner, t: &Translator, id: &str) {
    if let Err(e) = planner.unassign_course(id) {
        fail(t, &e);
    }
    let code = planner.course(id).map(|c| c.code.clone()).unwrap_or_default();
    println!("✓ {}", t.t_with("msg.unassigned", &[("code", &code)]));
}

/// Place unassigned courses in their recommended semester
pub fn automap(planner: &mut Planner, t: &Translator) {
    let mapped = planner.auto_map();
    println!(
        "✓ {}",
        t.t_with("msg.automapped", &[("count", &mapped.to_string())])
    );
}

/// Dispatch settings subcommands
pub fn settings(subcommand: Option<SettingsSubcommand>, planner: &mut Planner, t: &Translator) {
    match subcommand {
        None | Some(SettingsSubcommand::Show) => show_settings(planner, t),
        Some(SettingsSubcommand::Total { total }) => {
            planner.set_total_semesters(total);
            println!("✓ total_semesters = {total}");
            warn_orphans(planner, t);
        }
        Some(SettingsSubcommand::MaxCredits { semester, credits }) => {
            if let Err(e) = planner.set_max_credits(&semester, credits) {
                fail(t, &e);
            }
            println!("✓ {} {} = {credits}", t.t("label.max_credits"), semester_label(&semester));
        }
        Some(SettingsSubcommand::Target { credits }) => {
            planner.set_target_credits(credits);
            println!("✓ target_credits = {credits}");
        }
    }
}

fn show_settings(planner: &Planner, t: &Translator) {
    let settings = planner.settings();
    println!("\n=== Settings ===\n");
    println!("total_semesters = {}", settings.total_semesters);
    println!("target_credits = {}", settings.target_credits);
    println!("\n[{}]", t.t("label.max_credits"));
    for semester in planner.semesters() {
        let max = settings.max_credits(&semester.id).unwrap_or(0);
        println!("{} = {max}", semester.id);
    }
}

/// Mention assignments whose semester no longer exists
pub fn warn_orphans(planner: &Planner, t: &Translator) {
    let orphaned = planner.orphaned_courses();
    if orphaned.is_empty() {
        return;
    }
    println!(
        "⚠ {}",
        t.t_with("msg.orphaned", &[("count", &orphaned.len().to_string())])
    );
    for course in orphaned {
        println!(
            "  {} {} -> {}",
            course.id,
            course.code,
            course.assigned_semester.as_deref().unwrap_or_default()
        );
    }
}
