//! Command-line interface entry point for `studyplan`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use std::path::{Path, PathBuf};
use study_planner::config::Config;
use study_planner::core::i18n::Translator;
use study_planner::core::planner::Planner;
use study_planner::core::storage::{load_seed, FileStorage};
use study_planner::logger::{
    close_file_logging, enable_debug, enable_verbose, init_file_logging, set_level, Level,
};
use study_planner::{debug, info, verbose};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    init_logging(&args, &config);

    let translator = Translator::load(
        Path::new(&config.paths.locales_dir),
        &config.planner.language,
    );
    debug!("Interface language: {}", translator.language());

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        command => {
            let mut planner = open_planner(&config);
            dispatch(command, &mut planner, &translator, &config);
        }
    }

    close_file_logging();
}

/// Set up level, debug/verbose flags and file logging
fn init_logging(args: &Cli, config: &Config) {
    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path =
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
}

fn open_planner(config: &Config) -> Planner {
    let storage = FileStorage::new(&config.paths.storage_file);
    let seed = load_seed(Path::new(&config.paths.seed_file));
    verbose!("✓ Plan storage: {}", storage.path().display());
    Planner::open(Box::new(storage), seed)
}

fn dispatch(command: Command, planner: &mut Planner, t: &Translator, config: &Config) {
    match command {
        Command::Config { .. } => {}
        Command::Course { subcommand } => commands::course::run(subcommand, planner, t),
        Command::Assign { id, semester, yes } => {
            commands::semester::assign(planner, t, &id, &semester, yes);
        }
        Command::Unassign { id } => commands::semester::unassign(planner, t, &id),
        Command::Automap => commands::semester::automap(planner, t),
        Command::Semesters => commands::semester::list(planner, t),
        Command::Settings { subcommand } => commands::semester::settings(subcommand, planner, t),
        Command::Status => commands::plan::status(planner, t),
        Command::Export { format, output } => {
            commands::plan::export(planner, t, config, format.into(), output);
        }
        Command::Import { file, format, yes } => {
            commands::plan::import(planner, t, &file, format.map(Into::into), yes);
        }
        Command::Reset { yes } => commands::plan::reset(planner, t, yes),
    }
}
