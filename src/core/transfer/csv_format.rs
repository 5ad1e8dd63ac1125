//! CSV export/import
//!
//! Columns are matched by header name (case-insensitive), so reordered
//! columns import correctly. Rows must have as many fields as the header.

use super::{fill_missing_ids, TransferError, TransferResult};
use crate::core::models::{Course, CourseType};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Trim, WriterBuilder};

/// Header row written on export
pub const CSV_HEADER: [&str; 8] = [
    "ID",
    "Code",
    "Name",
    "Type",
    "Credits",
    "Lecturer",
    "RecommendedSemester",
    "AssignedSemester",
];

/// Recommended semester used when the column is empty or unreadable
const DEFAULT_RECOMMENDED_SEMESTER: u32 = 1;

/// Render courses as CSV: the header row, then one fully quoted row per course
///
/// # Errors
/// Returns an error if the CSV writer fails.
pub fn export_csv(courses: &[Course]) -> TransferResult<String> {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    for course in courses {
        let credits = course.credits.to_string();
        let recommended = course
            .recommended_semester
            .map(|n| n.to_string())
            .unwrap_or_default();
        writer.write_record([
            course.id.as_str(),
            course.code.as_str(),
            course.name.as_str(),
            course.course_type.as_str(),
            credits.as_str(),
            course.lecturer.as_str(),
            recommended.as_str(),
            course.assigned_semester.as_deref().unwrap_or(""),
        ])?;
    }
    let body = writer
        .into_inner()
        .map_err(|err| TransferError::Io(err.into_error()))?;
    out.push_str(&String::from_utf8_lossy(&body));
    Ok(out)
}

/// Column positions resolved from the header row
struct Columns {
    id: Option<usize>,
    code: Option<usize>,
    name: Option<usize>,
    course_type: Option<usize>,
    credits: Option<usize>,
    lecturer: Option<usize>,
    recommended: Option<usize>,
    assigned: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Self {
        let find = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
        Self {
            id: find("ID"),
            code: find("Code"),
            name: find("Name"),
            course_type: find("Type"),
            credits: find("Credits"),
            lecturer: find("Lecturer"),
            recommended: find("RecommendedSemester"),
            assigned: find("AssignedSemester"),
        }
    }
}

fn field(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|idx| record.get(idx)).unwrap_or("")
}

/// Parse CSV text into a complete replacement course list
///
/// Empty `Credits` becomes 0, empty `Type` becomes required, empty
/// `RecommendedSemester` becomes 1 and empty `ID` is synthesized from
/// `batch_millis` plus the row index, skipping ids used by other rows.
///
/// # Errors
/// Returns an error when there is no header row or a row's field count
/// differs from the header's.
pub fn import_csv(text: &str, batch_millis: i64) -> TransferResult<Vec<Course>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let header = reader.headers()?.clone();
    if header.iter().all(str::is_empty) {
        return Err(TransferError::MissingHeader);
    }
    let columns = Columns::from_header(&header);

    let mut courses = Vec::new();
    for record in reader.records() {
        let record = record?;
        let assigned = field(&record, columns.assigned);
        courses.push(Course {
            id: field(&record, columns.id).to_string(),
            code: field(&record, columns.code).to_string(),
            name: field(&record, columns.name).to_string(),
            lecturer: field(&record, columns.lecturer).to_string(),
            course_type: CourseType::from(field(&record, columns.course_type)),
            credits: field(&record, columns.credits).parse().unwrap_or(0),
            recommended_semester: Some(
                field(&record, columns.recommended)
                    .parse()
                    .unwrap_or(DEFAULT_RECOMMENDED_SEMESTER),
            ),
            assigned_semester: (!assigned.is_empty()).then(|| assigned.to_string()),
        });
    }
    fill_missing_ids(&mut courses, batch_millis);
    Ok(courses)
}
