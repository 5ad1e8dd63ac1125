//! Plan-wide settings

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Regular semesters used when the count is missing or not an integer
pub const DEFAULT_TOTAL_SEMESTERS: u32 = 8;

/// Largest semester count the planner will lay out
pub const MAX_TOTAL_SEMESTERS: u32 = 64;

/// Default graduation target in credits
pub const DEFAULT_TARGET_CREDITS: u32 = 144;

/// Plan-wide configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Number of regular semesters
    #[serde(default = "default_total_semesters")]
    pub total_semesters: u32,

    /// Credit ceiling per semester id. Entries for removed semesters are kept.
    #[serde(default)]
    pub semester_max_credits: BTreeMap<String, u32>,

    /// Total credits needed to graduate
    #[serde(default = "default_target_credits")]
    pub target_credits: u32,
}

const fn default_total_semesters() -> u32 {
    DEFAULT_TOTAL_SEMESTERS
}

const fn default_target_credits() -> u32 {
    DEFAULT_TARGET_CREDITS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_semesters: DEFAULT_TOTAL_SEMESTERS,
            semester_max_credits: BTreeMap::new(),
            target_credits: DEFAULT_TARGET_CREDITS,
        }
    }
}

impl Settings {
    /// Credit ceiling for a semester, if one is configured
    #[must_use]
    pub fn max_credits(&self, semester_id: &str) -> Option<u32> {
        self.semester_max_credits.get(semester_id).copied()
    }

    /// Shallow-merge imported settings: keys present in `patch` win, the rest stay.
    ///
    /// `semesterMaxCredits` is replaced as a whole, not merged per semester.
    pub fn merge(&mut self, patch: &SettingsPatch) {
        if let Some(total) = &patch.total_semesters {
            self.total_semesters = coerce_total_semesters(total);
        }
        if let Some(max_credits) = &patch.semester_max_credits {
            self.semester_max_credits.clone_from(max_credits);
        }
        if let Some(target) = patch.target_credits {
            self.target_credits = target;
        }
    }
}

/// Settings as read from an import file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// Raw value; see [`coerce_total_semesters`]
    #[serde(default)]
    pub total_semesters: Option<Value>,
    /// Replacement ceiling map
    #[serde(default)]
    pub semester_max_credits: Option<BTreeMap<String, u32>>,
    /// Replacement graduation target
    #[serde(default)]
    pub target_credits: Option<u32>,
}

/// Read a semester count permissively.
///
/// Non-negative integers are taken as-is, negative integers become 0, and
/// anything else (strings, fractions, null) falls back to
/// [`DEFAULT_TOTAL_SEMESTERS`].
#[must_use]
pub fn coerce_total_semesters(value: &Value) -> u32 {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(u32::MAX);
    }
    if value.as_i64().is_some() {
        return 0;
    }
    DEFAULT_TOTAL_SEMESTERS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_total_semesters() {
        assert_eq!(coerce_total_semesters(&json!(6)), 6);
        assert_eq!(coerce_total_semesters(&json!(-2)), 0);
        assert_eq!(coerce_total_semesters(&json!("10")), DEFAULT_TOTAL_SEMESTERS);
        assert_eq!(coerce_total_semesters(&json!(6.5)), DEFAULT_TOTAL_SEMESTERS);
        assert_eq!(coerce_total_semesters(&Value::Null), DEFAULT_TOTAL_SEMESTERS);
    }

    #[test]
    fn test_merge_keeps_unlisted_keys() {
        let mut settings = Settings::default();
        settings.semester_max_credits.insert("1".to_string(), 20);

        let patch = SettingsPatch {
            target_credits: Some(150),
            ..SettingsPatch::default()
        };
        settings.merge(&patch);

        assert_eq!(settings.target_credits, 150);
        assert_eq!(settings.total_semesters, DEFAULT_TOTAL_SEMESTERS);
        assert_eq!(settings.max_credits("1"), Some(20));
    }

    #[test]
    fn test_merge_replaces_ceiling_map_whole() {
        let mut settings = Settings::default();
        settings.semester_max_credits.insert("1".to_string(), 20);
        settings.semester_max_credits.insert("2".to_string(), 20);

        let patch: SettingsPatch =
            serde_json::from_value(json!({"semesterMaxCredits": {"1": 18}, "totalSemesters": 4}))
                .unwrap();
        settings.merge(&patch);

        assert_eq!(settings.total_semesters, 4);
        assert_eq!(settings.max_credits("1"), Some(18));
        assert_eq!(settings.max_credits("2"), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
