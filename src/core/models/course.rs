//! Course model

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Lowest credit value accepted on manual entry
pub const MIN_CREDITS: u32 = 1;

/// Highest credit value accepted on manual entry
pub const MAX_CREDITS: u32 = 8;

/// Course category tag. Only used for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseType {
    /// Mandatory course (`required`, also read from `wajib`)
    #[default]
    Required,
    /// Elective course (`elective`, also read from `pilihan`)
    Elective,
    /// Any other tag found in imported data, kept verbatim
    Other(String),
}

impl CourseType {
    /// Tag as written to JSON and CSV
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Elective => "elective",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for CourseType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "required" | "wajib" => Self::Required,
            "elective" | "pilihan" => Self::Elective,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for CourseType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CourseType> for String {
    fn from(value: CourseType) -> Self {
        match value {
            CourseType::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a course form is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `code` is empty or whitespace
    MissingCode,
    /// `name` is empty or whitespace
    MissingName,
    /// `credits` is outside `MIN_CREDITS..=MAX_CREDITS`
    CreditsOutOfRange(u32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "course code is required"),
            Self::MissingName => write!(f, "course name is required"),
            Self::CreditsOutOfRange(credits) => write!(
                f,
                "credits must be between {MIN_CREDITS} and {MAX_CREDITS} (got {credits})"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// User-entered course fields, before an id is assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    /// Course code (e.g., "IF2110")
    pub code: String,
    /// Course name
    pub name: String,
    /// Lecturer name, free text
    pub lecturer: String,
    /// Category tag
    pub course_type: CourseType,
    /// Credit units (SKS)
    pub credits: u32,
    /// Suggested semester number, used by auto-mapping
    pub recommended_semester: Option<u32>,
}

impl CourseDraft {
    /// Create a draft with the required fields set
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
            ..Self::default()
        }
    }

    /// Check the fields a manual entry must satisfy
    ///
    /// # Errors
    /// Returns the first failing rule: missing code, missing name, then credit range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::MissingCode);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !(MIN_CREDITS..=MAX_CREDITS).contains(&self.credits) {
            return Err(ValidationError::CreditsOutOfRange(self.credits));
        }
        Ok(())
    }
}

/// One course in the study plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Opaque unique id. Numeric ids from older exports are read as text.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    /// Course code
    #[serde(default)]
    pub code: String,

    /// Course name
    #[serde(default)]
    pub name: String,

    /// Lecturer name
    #[serde(default)]
    pub lecturer: String,

    /// Category tag
    #[serde(rename = "type", default)]
    pub course_type: CourseType,

    /// Credit units. Range checks apply to manual entry only.
    #[serde(default)]
    pub credits: u32,

    /// Suggested semester number
    #[serde(default)]
    pub recommended_semester: Option<u32>,

    /// Semester id this course is placed in; `None` means unassigned
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub assigned_semester: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_string_or_number(deserializer)?.unwrap_or_default())
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

impl Course {
    /// Build an unassigned course from a draft
    #[must_use]
    pub fn from_draft(id: String, draft: CourseDraft) -> Self {
        Self {
            id,
            code: draft.code,
            name: draft.name,
            lecturer: draft.lecturer,
            course_type: draft.course_type,
            credits: draft.credits,
            recommended_semester: draft.recommended_semester,
            assigned_semester: None,
        }
    }

    /// Overwrite the editable fields from a draft, keeping id and placement
    pub fn apply_draft(&mut self, draft: CourseDraft) {
        self.code = draft.code;
        self.name = draft.name;
        self.lecturer = draft.lecturer;
        self.course_type = draft.course_type;
        self.credits = draft.credits;
        self.recommended_semester = draft.recommended_semester;
    }

    /// Whether the course is placed in any semester
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned_semester.is_some()
    }

    /// Whether the course is placed in the given semester
    #[must_use]
    pub fn is_in(&self, semester_id: &str) -> bool {
        self.assigned_semester.as_deref() == Some(semester_id)
    }
}
