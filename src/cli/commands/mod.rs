//! CLI command handlers for `studyplan`.
//!
//! Each group of subcommands lives in its own submodule. Handlers print
//! through the [`Translator`] and exit with status 1 on failure.

pub mod config;
pub mod course;
pub mod plan;
pub mod semester;

use std::io::{self, BufRead, Write};
use study_planner::core::i18n::Translator;
use study_planner::core::planner::{Confirm, ConfirmRequest, PlannerError};

/// Ask a yes/no question on stdout and read the answer from stdin
pub fn prompt_yes_no(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    if io::stdin().lock().read_line(&mut response).is_err() {
        return false;
    }
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

/// Display label for a semester id (`3` -> `Semester 3`, `antara-1` -> `Antara 1`)
pub fn semester_label(id: &str) -> String {
    id.strip_prefix("antara-")
        .map_or_else(|| format!("Semester {id}"), |n| format!("Antara {n}"))
}

/// Localised prompt text for a confirmation request
pub fn request_text(t: &Translator, request: &ConfirmRequest) -> String {
    match request {
        ConfirmRequest::OverLimit { code, check } => t.t_with(
            "confirm.over_limit",
            &[
                ("code", code),
                ("semester", &semester_label(&check.semester_id)),
                ("max", &check.max_credits.to_string()),
                ("overage", &check.overage().unwrap_or(0).to_string()),
            ],
        ),
        ConfirmRequest::DeleteCourse { code, .. } => t.t_with("confirm.delete", &[("code", code)]),
        ConfirmRequest::ReplaceCourses { current, incoming } => t.t_with(
            "confirm.import",
            &[
                ("current", &current.to_string()),
                ("count", &incoming.to_string()),
            ],
        ),
        ConfirmRequest::Reset => t.t("confirm.reset"),
    }
}

/// Confirmation through an interactive prompt, or unconditional with `--yes`
pub struct StdinConfirm<'a> {
    translator: &'a Translator,
    assume_yes: bool,
}

impl<'a> StdinConfirm<'a> {
    pub const fn new(translator: &'a Translator, assume_yes: bool) -> Self {
        Self {
            translator,
            assume_yes,
        }
    }
}

impl Confirm for StdinConfirm<'_> {
    fn confirm(&mut self, request: &ConfirmRequest) -> bool {
        self.assume_yes || prompt_yes_no(&request_text(self.translator, request))
    }
}

/// Print a planner error in the active language and exit with status 1.
/// A declined confirmation prints the cancel message and exits with 0.
pub fn fail(t: &Translator, err: &PlannerError) -> ! {
    let message = match err {
        PlannerError::Cancelled => {
            println!("✗ {}", t.t("msg.cancelled"));
            std::process::exit(0);
        }
        PlannerError::Validation(e) => t.t_with("error.validation", &[("reason", &e.to_string())]),
        PlannerError::Transfer(e) => t.t_with("error.import", &[("reason", &e.to_string())]),
        PlannerError::CourseNotFound(id) => t.t_with("error.not_found", &[("id", id)]),
        PlannerError::UnknownSemester(id) => t.t_with("error.unknown_semester", &[("id", id)]),
    };
    eprintln!("✗ {message}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_planner::core::planner::AssignmentCheck;

    #[test]
    fn test_semester_label() {
        assert_eq!(semester_label("3"), "Semester 3");
        assert_eq!(semester_label("antara-2"), "Antara 2");
    }

    #[test]
    fn test_over_limit_prompt_text() {
        let t = Translator::builtin("en");
        let request = ConfirmRequest::OverLimit {
            code: "IF2110".to_string(),
            check: AssignmentCheck {
                course_id: "1".to_string(),
                semester_id: "1".to_string(),
                current_credits: 18,
                course_credits: 3,
                max_credits: 20,
            },
        };
        assert_eq!(
            request_text(&t, &request),
            "Adding IF2110 to Semester 1 exceeds the 20-credit limit by 1. Continue?"
        );
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let t = Translator::builtin("id");
        let mut confirm = StdinConfirm::new(&t, true);
        assert!(confirm.confirm(&ConfirmRequest::Reset));
    }
}
