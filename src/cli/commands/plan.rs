//! Whole-plan command handlers: status, export, import and reset

use super::{fail, semester::warn_orphans, StdinConfirm};
use chrono::{Local, Utc};
use study_planner::config::Config;
use study_planner::core::i18n::Translator;
use study_planner::core::planner::{Planner, PlannerError};
use study_planner::core::transfer::{self, TransferError, TransferFormat};
use study_planner::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Print graduation progress
pub fn status(planner: &Planner, t: &Translator) {
    let progress = planner.progress();
    println!("\n=== {} ===\n", t.t("app.title"));
    println!(
        "{}: {} / {} ({}%)",
        t.t("label.credits"),
        progress.credits_taken,
        progress.target_credits,
        progress.percentage
    );
    println!("{}: {}", t.t("label.unassigned"), progress.unassigned_count);
    if let Some(saved) = planner.last_saved() {
        println!(
            "{}: {}",
            t.t("msg.saved"),
            saved.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
    warn_orphans(planner, t);
}

/// Write an export to `output`, or to a date-stamped file in the exports directory
pub fn export(
    planner: &Planner,
    t: &Translator,
    config: &Config,
    format: TransferFormat,
    output: Option<PathBuf>,
) {
    let contents = match format {
        TransferFormat::Json => planner.export_json(Utc::now()),
        TransferFormat::Csv => planner.export_csv(),
    };
    let contents = contents.unwrap_or_else(|e| fail(t, &e));

    let path = output.unwrap_or_else(|| {
        PathBuf::from(&config.paths.exports_dir)
            .join(transfer::export_file_name(format, Local::now().date_naive()))
    });

    if let Err(e) = write_export(&path, &contents) {
        error!("Export to {} failed: {e}", path.display());
        eprintln!("✗ {}: {e}", path.display());
        std::process::exit(1);
    }
    info!("Exported {} bytes to {}", contents.len(), path.display());
    println!(
        "✓ {}",
        t.t_with("msg.exported", &[("path", &path.display().to_string())])
    );
}

fn write_export(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)
}

/// Replace all courses with the contents of `file`
pub fn import(
    planner: &mut Planner,
    t: &Translator,
    file: &Path,
    format: Option<TransferFormat>,
    yes: bool,
) {
    let Some(format) = format.or_else(|| TransferFormat::from_path(file)) else {
        eprintln!(
            "✗ {}",
            t.t_with(
                "error.import",
                &[("reason", "unknown file type, use --format json|csv")]
            )
        );
        std::process::exit(1);
    };

    let text = fs::read_to_string(file)
        .unwrap_or_else(|e| fail(t, &PlannerError::Transfer(TransferError::Io(e))));

    let mut confirm = StdinConfirm::new(t, yes);
    let result = match format {
        TransferFormat::Json => planner.import_json(&text, &mut confirm),
        TransferFormat::Csv => planner.import_csv(&text, &mut confirm),
    };
    match result {
        Ok(count) => {
            println!(
                "✓ {}",
                t.t_with("msg.imported", &[("count", &count.to_string())])
            );
            warn_orphans(planner, t);
        }
        Err(e) => fail(t, &e),
    }
}

/// Erase the stored plan and reload the seed data
pub fn reset(planner: &mut Planner, t: &Translator, yes: bool) {
    if let Err(e) = planner.reset(&mut StdinConfirm::new(t, yes)) {
        fail(t, &e);
    }
    println!("✓ {}", t.t("msg.reset"));
}
