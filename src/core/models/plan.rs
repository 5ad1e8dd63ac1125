//! Plan model: the persisted aggregate

use super::{Course, Settings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settings plus courses, with the time of the last successful save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Plan-wide settings
    #[serde(default)]
    pub settings: Settings,

    /// Courses in display order
    #[serde(default)]
    pub courses: Vec<Course>,

    /// When the plan was last written to storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Plan {
    /// Create an unsaved plan
    #[must_use]
    pub const fn new(settings: Settings, courses: Vec<Course>) -> Self {
        Self {
            settings,
            courses,
            last_saved: None,
        }
    }
}
