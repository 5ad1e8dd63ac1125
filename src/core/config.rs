//! Configuration module for `StudyPlanner`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the planner's config directory in path values
const DIR_VARIABLE: &str = "$STUDY_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Planner behaviour configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Interface language code (e.g. `id`, `en`, `ms`)
    #[serde(default)]
    pub language: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// File holding the persisted plan record
    #[serde(default)]
    pub storage_file: String,
    /// Directory for exported JSON/CSV plans
    #[serde(default)]
    pub exports_dir: String,
    /// Directory holding `{lang}.json` translation files
    #[serde(default)]
    pub locales_dir: String,
    /// Seed plan used when no stored plan exists
    #[serde(default)]
    pub seed_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override interface language
    pub language: Option<String>,
    /// Override plan storage file
    pub storage_file: Option<String>,
    /// Override exports directory
    pub exports_dir: Option<String>,
}

impl Config {
    /// Get the `$STUDY_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studyplanner`
    /// - macOS: `~/Library/Application Support/studyplanner`
    /// - Windows: `%APPDATA%\studyplanner`
    #[must_use]
    pub fn get_studyplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studyplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that fields added in newer versions pick up their
    /// defaults while existing user values are kept. Only fields that are empty
    /// here and non-empty in `defaults` are touched.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        let mut fill = |field: &mut String, default: &String| {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        };

        fill(&mut self.logging.level, &defaults.logging.level);
        fill(&mut self.logging.file, &defaults.logging.file);
        fill(&mut self.planner.language, &defaults.planner.language);
        fill(&mut self.paths.storage_file, &defaults.paths.storage_file);
        fill(&mut self.paths.exports_dir, &defaults.paths.exports_dir);
        fill(&mut self.paths.locales_dir, &defaults.paths.locales_dir);
        fill(&mut self.paths.seed_file, &defaults.paths.seed_file);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect the current run; the config file is not modified.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(language) = &overrides.language {
            self.planner.language.clone_from(language);
        }
        if let Some(storage_file) = &overrides.storage_file {
            self.paths.storage_file.clone_from(storage_file);
        }
        if let Some(exports_dir) = &overrides.exports_dir {
            self.paths.exports_dir.clone_from(exports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_studyplanner_dir`](Self::get_studyplanner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studyplanner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$STUDY_PLANNER` to the planner's config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_studyplanner_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$STUDY_PLANNER` is expanded in
    /// every path-like value.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.storage_file = Self::expand_variables(&config.paths.storage_file);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);
        config.paths.locales_dir = Self::expand_variables(&config.paths.locales_dir);
        config.paths.seed_file = Self::expand_variables(&config.paths.seed_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary, so this is a build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - Existing file: parsed, missing fields merged from defaults and saved back.
    /// - First run: the default config is written out and returned.
    ///
    /// Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `language`, `storage_file`,
    /// `exports_dir`, `locales_dir`, `seed_file` (dashes accepted for the path keys).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "language" | "lang" => Some(self.planner.language.clone()),
            "storage_file" | "storage-file" => Some(self.paths.storage_file.clone()),
            "exports_dir" | "exports-dir" => Some(self.paths.exports_dir.clone()),
            "locales_dir" | "locales-dir" => Some(self.paths.locales_dir.clone()),
            "seed_file" | "seed-file" => Some(self.paths.seed_file.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// (`verbose` must be `true` or `false`, `level` must be a known level).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                if crate::logger::Level::parse(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "language" | "lang" => self.planner.language = value.to_string(),
            "storage_file" | "storage-file" => self.paths.storage_file = value.to_string(),
            "exports_dir" | "exports-dir" => self.paths.exports_dir = value.to_string(),
            "locales_dir" | "locales-dir" => self.paths.locales_dir = value.to_string(),
            "seed_file" | "seed-file" => self.paths.seed_file = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "language" | "lang" => self
                .planner
                .language
                .clone_from(&defaults.planner.language),
            "storage_file" | "storage-file" => self
                .paths
                .storage_file
                .clone_from(&defaults.paths.storage_file),
            "exports_dir" | "exports-dir" => self
                .paths
                .exports_dir
                .clone_from(&defaults.paths.exports_dir),
            "locales_dir" | "locales-dir" => self
                .paths
                .locales_dir
                .clone_from(&defaults.paths.locales_dir),
            "seed_file" | "seed-file" => self.paths.seed_file.clone_from(&defaults.paths.seed_file),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[planner]")?;
        writeln!(f, "  language = \"{}\"", self.planner.language)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  storage_file = \"{}\"", self.paths.storage_file)?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;
        writeln!(f, "  locales_dir = \"{}\"", self.paths.locales_dir)?;
        writeln!(f, "  seed_file = \"{}\"", self.paths.seed_file)?;

        Ok(())
    }
}
