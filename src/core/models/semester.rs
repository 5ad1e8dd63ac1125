//! Semester model (derived from settings, never persisted)

use serde::Serialize;
use std::fmt;

/// Kind of term slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemesterKind {
    /// Regular semester, id is its number
    Normal,
    /// Short inter-semester term, id is `antara-{n}`
    Antara,
}

/// One entry of the generated semester list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Semester {
    /// Identifier referenced by `Course::assigned_semester`
    pub id: String,
    /// Display label
    pub name: String,
    /// Regular or antara
    #[serde(rename = "type")]
    pub kind: SemesterKind,
}

impl Semester {
    /// Regular semester `number`
    #[must_use]
    pub fn normal(number: u32) -> Self {
        Self {
            id: number.to_string(),
            name: format!("Semester {number}"),
            kind: SemesterKind::Normal,
        }
    }

    /// Inter-semester term `number` (1-based)
    #[must_use]
    pub fn antara(number: u32) -> Self {
        Self {
            id: antara_id(number),
            name: format!("Antara {number}"),
            kind: SemesterKind::Antara,
        }
    }

    /// Whether this is an antara slot
    #[must_use]
    pub const fn is_antara(&self) -> bool {
        matches!(self.kind, SemesterKind::Antara)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Id of antara slot `number`
#[must_use]
pub fn antara_id(number: u32) -> String {
    format!("antara-{number}")
}
