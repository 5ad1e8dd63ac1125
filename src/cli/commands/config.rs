//! Config command handler

use super::prompt_yes_no;
use crate::args::ConfigSubcommand;
use study_planner::config::Config;
use study_planner::core::i18n::normalize_language;

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            show(config, key.as_deref());
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => config
            .unset(&key, defaults)
            .and_then(|()| save(config))
            .map(|()| println!("✓ Reset {key} to default")),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        },
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            println!("\nConfig file: {}", Config::get_config_file_path().display());
        }
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    config.set(key, value)?;
    if matches!(key, "language" | "lang") && normalize_language(value) != value {
        eprintln!(
            "⚠ Language '{value}' is not supported; '{}' will be used",
            normalize_language(value)
        );
    }
    save(config)?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn save(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    if !prompt_yes_no("Are you sure you want to reset config to defaults?") {
        println!("✗ Reset cancelled");
        return Ok(());
    }

    Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
    println!("✓ Config reset to defaults");
    Ok(())
}
