//! CLI argument definitions for `studyplan`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use study_planner::config::ConfigOverrides;
use study_planner::core::models::{CourseDraft, CourseType};
use study_planner::core::transfer::TransferFormat;
use study_planner::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// [`Level`] for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Import/export file format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    /// Full plan as JSON
    Json,
    /// Course table as CSV
    Csv,
}

impl From<FormatArg> for TransferFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `language`, `storage_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Course form fields shared by `course add` and `course edit`
#[derive(Debug, Clone, clap::Args)]
pub struct CourseFields {
    /// Course code (e.g., IF2110)
    #[arg(long)]
    pub code: String,

    /// Course name
    #[arg(long)]
    pub name: String,

    /// Credit units (1-8)
    #[arg(long)]
    pub credits: u32,

    /// Lecturer name
    #[arg(long, default_value = "")]
    pub lecturer: String,

    /// Course type tag (required, elective, or any other tag)
    #[arg(long = "type", value_name = "TYPE", default_value = "required")]
    pub course_type: String,

    /// Recommended semester number, used by `automap`
    #[arg(long, value_name = "N")]
    pub recommended: Option<u32>,
}

impl CourseFields {
    /// Turn the flags into a course draft
    pub fn into_draft(self) -> CourseDraft {
        CourseDraft {
            code: self.code,
            name: self.name,
            lecturer: self.lecturer,
            course_type: CourseType::from(self.course_type),
            credits: self.credits,
            recommended_semester: self.recommended,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// Add a course. It starts unassigned.
    Add {
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Replace the fields of an existing course.
    Edit {
        /// Course id
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: CourseFields,
    },
    /// Delete a course (requires confirmation).
    Remove {
        /// Course id
        #[arg(value_name = "ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List courses.
    List {
        /// Only show courses with no semester
        #[arg(long)]
        unassigned: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsSubcommand {
    /// Show plan settings and every semester ceiling.
    Show,
    /// Set the number of regular semesters.
    Total {
        /// Number of regular semesters
        #[arg(value_name = "N")]
        total: u32,
    },
    /// Set the credit ceiling of one semester.
    MaxCredits {
        /// Semester id (`1`, `2`, `antara-1`, ...)
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Credit ceiling
        #[arg(value_name = "N")]
        credits: u32,
    },
    /// Set the graduation credit target.
    Target {
        /// Target credits
        #[arg(value_name = "N")]
        credits: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Add, edit, remove or list courses.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Place a course in a semester.
    ///
    /// Asks for confirmation when the semester would go over its ceiling.
    Assign {
        /// Course id
        #[arg(value_name = "ID")]
        id: String,
        /// Semester id (`1`, `2`, `antara-1`, ...)
        #[arg(value_name = "SEMESTER")]
        semester: String,
        /// Accept an over-limit placement without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Take a course out of its semester.
    Unassign {
        /// Course id
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Place unassigned courses in their recommended semester.
    Automap,
    /// Show every semester with its credits, ceiling and status.
    Semesters,
    /// View or change plan settings.
    Settings {
        #[command(subcommand)]
        subcommand: Option<SettingsSubcommand>,
    },
    /// Show graduation progress.
    Status,
    /// Export the plan.
    ///
    /// Defaults to a date-stamped file in the configured exports directory.
    Export {
        /// Export format
        #[arg(value_enum, value_name = "FORMAT")]
        format: FormatArg,
        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace all courses with the contents of a JSON or CSV file.
    Import {
        /// File to import
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// File format (inferred from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Erase the stored plan and reload the initial data.
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studyplan",
    about = "Semester study planner",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Interface language (id, en, ms)
    #[arg(long = "lang", value_name = "LANG")]
    pub lang: Option<String>,

    /// Plan storage file for this run
    #[arg(long, value_name = "PATH")]
    pub storage_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config exports directory
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            language: self.lang.clone(),
            storage_file: self.storage_file.as_ref().map(path_string),
            exports_dir: self.exports_dir.as_ref().map(path_string),
        }
    }
}
