//! Translation tables with built-in fallbacks
//!
//! A locale file is a flat JSON map of key to text at
//! `{locales_dir}/{lang}.json`. When it cannot be read or parsed the built-in
//! table for that language is used. Lookups fall back from the loaded table
//! to the built-in table of the language, then to the built-in table of the
//! default language, then to the key itself.

mod fallback;

use crate::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Language used when none is configured or the code is not supported
pub const DEFAULT_LANGUAGE: &str = "id";

/// Languages with a built-in fallback table
pub const SUPPORTED_LANGUAGES: [&str; 3] = ["id", "en", "ms"];

/// Normalise a language code (`en-US` -> `en`); unsupported codes map to the default
#[must_use]
pub fn normalize_language(lang: &str) -> &'static str {
    let lang = lang.trim().to_ascii_lowercase();
    let primary = lang.split(['-', '_']).next().unwrap_or_default();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&supported| supported == primary)
        .copied()
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Translation lookup for one language
#[derive(Debug, Clone)]
pub struct Translator {
    language: &'static str,
    loaded: HashMap<String, String>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::builtin(DEFAULT_LANGUAGE)
    }
}

impl Translator {
    /// Translator backed only by the built-in table
    #[must_use]
    pub fn builtin(lang: &str) -> Self {
        Self {
            language: normalize_language(lang),
            loaded: HashMap::new(),
        }
    }

    /// Load `{locales_dir}/{lang}.json`, falling back to the built-in table on
    /// any read or parse failure
    #[must_use]
    pub fn load(locales_dir: &Path, lang: &str) -> Self {
        let mut translator = Self::builtin(lang);
        let path = locales_dir.join(format!("{}.json", translator.language));

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    "Could not read locale file {}: {err}; using built-in texts",
                    path.display()
                );
                return translator;
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(table) => {
                debug!(
                    "Loaded {} translations from {}",
                    table.len(),
                    path.display()
                );
                translator.loaded = table;
            }
            Err(err) => {
                warn!(
                    "Locale file {} is not a flat string map: {err}; using built-in texts",
                    path.display()
                );
            }
        }
        translator
    }

    /// Active language code
    #[must_use]
    pub const fn language(&self) -> &'static str {
        self.language
    }

    /// Text for `key`
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        if let Some(text) = self.loaded.get(key) {
            return text.clone();
        }
        fallback::lookup(self.language, key)
            .or_else(|| fallback::lookup(DEFAULT_LANGUAGE, key))
            .map_or_else(|| key.to_string(), str::to_string)
    }

    /// Text for `key` with `{name}` placeholders replaced from `args`
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.t(key), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}
