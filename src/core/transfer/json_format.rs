//! JSON export/import

use super::{fill_missing_ids, TransferError, TransferResult};
use crate::core::models::{Course, Settings, SettingsPatch};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    settings: &'a Settings,
    courses: &'a [Course],
    export_date: DateTime<Utc>,
}

/// Render the plan as pretty-printed `{settings, courses, exportDate}`
///
/// # Errors
/// Returns an error if serialization fails.
pub fn export_json(
    settings: &Settings,
    courses: &[Course],
    export_date: DateTime<Utc>,
) -> TransferResult<String> {
    let document = ExportDocument {
        settings,
        courses,
        export_date,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parsed JSON import, not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct JsonImport {
    /// Courses that replace the whole collection
    pub courses: Vec<Course>,
    /// Settings to shallow-merge, when the file has them
    pub settings: Option<SettingsPatch>,
}

/// Parse an exported plan
///
/// Courses without an id get one from `batch_millis` plus their index,
/// skipping ids already used in the file.
///
/// # Errors
/// Returns an error when the text is not JSON, `courses` is missing or not an
/// array, an entry has the wrong shape, or `settings` is present but malformed.
pub fn import_json(text: &str, batch_millis: i64) -> TransferResult<JsonImport> {
    let mut document: Value = serde_json::from_str(text)?;

    let courses = match document.get_mut("courses").map(Value::take) {
        None | Some(Value::Null) => return Err(TransferError::MissingCourses),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(TransferError::CoursesNotArray),
    };

    let mut courses = courses
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<Course>(entry).map_err(|err| TransferError::InvalidCourse {
                index,
                message: err.to_string(),
            })
        })
        .collect::<TransferResult<Vec<_>>>()?;
    fill_missing_ids(&mut courses, batch_millis);

    let settings = match document.get_mut("settings").map(Value::take) {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value::<SettingsPatch>(value)?),
    };

    Ok(JsonImport { courses, settings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CourseDraft;

    #[test]
    fn test_export_shape() {
        let courses = vec![Course::from_draft(
            "1".to_string(),
            CourseDraft::new("IF1210", "Dasar Pemrograman", 3),
        )];
        let text = export_json(&Settings::default(), &courses, Utc::now()).unwrap();

        assert!(text.contains('\n'), "export should be pretty-printed");
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value["exportDate"].is_string());
        assert_eq!(value["courses"][0]["code"], "IF1210");
        assert!(value["settings"].is_object());
    }

    #[test]
    fn test_rejects_missing_or_non_array_courses() {
        assert!(matches!(
            import_json(r#"{"settings":{}}"#, 0),
            Err(TransferError::MissingCourses)
        ));
        assert!(matches!(
            import_json(r#"{"courses":{"a":1}}"#, 0),
            Err(TransferError::CoursesNotArray)
        ));
        assert!(matches!(import_json("nope", 0), Err(TransferError::Json(_))));
    }

    #[test]
    fn test_reports_bad_course_entry() {
        let err = import_json(r#"{"courses":[{"id":"1"},{"credits":"three"}]}"#, 0).unwrap_err();
        assert!(matches!(err, TransferError::InvalidCourse { index: 1, .. }));
    }

    #[test]
    fn test_settings_optional() {
        let import = import_json(r#"{"courses":[]}"#, 0).unwrap();
        assert!(import.settings.is_none());

        let import = import_json(r#"{"courses":[],"settings":{"totalSemesters":6}}"#, 0).unwrap();
        let patch = import.settings.unwrap();
        assert_eq!(patch.total_semesters, Some(Value::from(6)));
        assert!(patch.semester_max_credits.is_none());
    }

    #[test]
    fn test_missing_ids_synthesized() {
        let import = import_json(r#"{"courses":[{"code":"A"},{"id":"keep","code":"B"}]}"#, 500)
            .unwrap();
        assert_eq!(import.courses[0].id, "500");
        assert_eq!(import.courses[1].id, "keep");
    }

    #[test]
    fn test_synthesized_id_avoids_explicit_id() {
        let import = import_json(r#"{"courses":[{"code":"A"},{"id":"500","code":"B"}]}"#, 500)
            .unwrap();
        assert_eq!(import.courses[1].id, "500");
        assert_ne!(import.courses[0].id, "500");
    }
}
