//! Import and export of plans as JSON or CSV text
//!
//! Parsing is all-or-nothing: an import either yields a complete course list
//! or an error, so callers never commit a partial result.

mod csv_format;
mod json_format;

pub use csv_format::{export_csv, import_csv, CSV_HEADER};
pub use json_format::{export_json, import_json, JsonImport};

use crate::core::models::Course;
use chrono::NaiveDate;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::Path;

/// Failure to read or write an import/export document
#[derive(Debug)]
pub enum TransferError {
    /// Document is not valid JSON, or could not be serialized
    Json(SerdeJsonError),
    /// CSV reader/writer failure
    Csv(csv::Error),
    /// Reading or writing the file failed
    Io(io::Error),
    /// JSON document has no `courses` key
    MissingCourses,
    /// JSON `courses` is not an array
    CoursesNotArray,
    /// A JSON course entry has the wrong shape
    InvalidCourse {
        /// Position in the `courses` array
        index: usize,
        /// What was wrong
        message: String,
    },
    /// CSV input has no header row
    MissingHeader,
    /// A CSV row has a different number of fields than the header
    RowLength {
        /// 1-based line number
        line: u64,
        /// Number of header fields
        expected: usize,
        /// Number of fields found
        found: usize,
    },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Csv(err) => write!(f, "invalid CSV: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::MissingCourses => write!(f, "file has no 'courses' field"),
            Self::CoursesNotArray => write!(f, "'courses' must be an array"),
            Self::InvalidCourse { index, message } => {
                write!(f, "course #{} is invalid: {message}", index + 1)
            }
            Self::MissingHeader => write!(f, "CSV file has no header row"),
            Self::RowLength {
                line,
                expected,
                found,
            } => write!(
                f,
                "CSV line {line} has {found} fields, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<SerdeJsonError> for TransferError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for TransferError {
    fn from(value: csv::Error) -> Self {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = value.kind()
        {
            return Self::RowLength {
                line: pos.as_ref().map_or(0, csv::Position::line),
                expected: usize::try_from(*expected_len).unwrap_or(usize::MAX),
                found: usize::try_from(*len).unwrap_or(usize::MAX),
            };
        }
        Self::Csv(value)
    }
}

impl From<io::Error> for TransferError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Result alias for import/export operations
pub type TransferResult<T> = Result<T, TransferError>;

/// Document format for import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    /// Pretty-printed `{settings, courses, exportDate}`
    Json,
    /// One header row plus one quoted row per course
    Csv,
}

impl TransferFormat {
    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Guess the format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Date-stamped export file name, e.g. `study-plan-2024-08-01.csv`
#[must_use]
pub fn export_file_name(format: TransferFormat, date: NaiveDate) -> String {
    format!("study-plan-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Give every course with an empty id one derived from the batch time plus
/// its index, bumped past any id already present in the batch
pub fn fill_missing_ids(courses: &mut [Course], batch_millis: i64) {
    let mut taken: HashSet<String> = courses
        .iter()
        .filter(|c| !c.id.is_empty())
        .map(|c| c.id.clone())
        .collect();
    for (index, course) in courses.iter_mut().enumerate() {
        if !course.id.is_empty() {
            continue;
        }
        let offset = i64::try_from(index).unwrap_or(i64::MAX);
        let mut stamp = batch_millis.saturating_add(offset);
        while taken.contains(&stamp.to_string()) {
            stamp = stamp.saturating_add(1);
        }
        course.id = stamp.to_string();
        taken.insert(course.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseDraft;
    use std::path::PathBuf;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(
            export_file_name(TransferFormat::Json, date),
            "study-plan-2024-08-01.json"
        );
        assert_eq!(
            export_file_name(TransferFormat::Csv, date),
            "study-plan-2024-08-01.csv"
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            TransferFormat::from_path(&PathBuf::from("plan.JSON")),
            Some(TransferFormat::Json)
        );
        assert_eq!(
            TransferFormat::from_path(&PathBuf::from("a/b/plan.csv")),
            Some(TransferFormat::Csv)
        );
        assert_eq!(TransferFormat::from_path(&PathBuf::from("plan.txt")), None);
        assert_eq!(TransferFormat::from_path(&PathBuf::from("plan")), None);
    }

    fn blank(id: &str) -> Course {
        Course::from_draft(id.to_string(), CourseDraft::new("A", "A", 2))
    }

    #[test]
    fn test_filled_ids_are_distinct() {
        let mut courses = vec![blank(""), blank(""), blank("")];
        fill_missing_ids(&mut courses, 1_000);
        let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1000", "1001", "1002"]);
    }

    #[test]
    fn test_filled_ids_skip_ids_in_batch() {
        let mut courses = vec![blank(""), blank("1001"), blank(""), blank("1000")];
        fill_missing_ids(&mut courses, 1_000);

        let ids: HashSet<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), courses.len());
        assert_eq!(courses[1].id, "1001");
        assert_eq!(courses[3].id, "1000");
    }
}
