//! Row ingest and filtering.
//!
//! Turns loosely-typed `[[x, y], ...]` rows into a clean `SampleSet`.
//!
//! Rules:
//! - each entry may be a JSON number or a string holding a finite number
//! - rows that are not at least a pair, hold a non-numeric entry, or have
//!   `x <= 0` are skipped and recorded, never fatal
//! - entries beyond the first two are ignored

use std::fs::File;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::domain::SampleSet;
use crate::error::{AppError, EXIT_USAGE};

/// Why a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    /// Not an array of at least two entries.
    NotAPair,
    /// `x` or `y` is not a finite number.
    NonNumeric,
    /// `x <= 0`.
    NonPositiveX,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::NotAPair => write!(f, "row is not an [x, y] pair"),
            RowRejection::NonNumeric => write!(f, "x or y is not a number"),
            RowRejection::NonPositiveX => write!(f, "x must be > 0"),
        }
    }
}

/// A skipped row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub index: usize,
    pub reason: RowRejection,
}

/// Ingest output: surviving samples + skipped rows.
#[derive(Debug, Clone, Default)]
pub struct IngestedRows {
    pub samples: SampleSet,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedRows {
    pub fn rows_used(&self) -> usize {
        self.samples.len()
    }
}

/// `rows` was not a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsNotArray;

impl std::fmt::Display for RowsNotArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rows must be an array")
    }
}

impl std::error::Error for RowsNotArray {}

/// Filter a JSON `rows` value into samples.
pub fn parse_rows(rows: &Value) -> Result<IngestedRows, RowsNotArray> {
    let rows = rows.as_array().ok_or(RowsNotArray)?;
    Ok(collect_rows(rows.iter().map(|row| match row.as_array() {
        Some(pair) if pair.len() >= 2 => Some((parse_number(&pair[0]), parse_number(&pair[1]))),
        _ => None,
    })))
}

/// Parse one row entry as a finite `f64`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_str(s),
        _ => None,
    }
}

fn parse_str(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Shared filter over already-split rows.
///
/// `None` marks a row that is not a pair; `Some((x, y))` carries parsed entries.
fn collect_rows<I>(rows: I) -> IngestedRows
where
    I: Iterator<Item = Option<(Option<f64>, Option<f64>)>>,
{
    let mut out = IngestedRows::default();

    for (index, row) in rows.enumerate() {
        out.rows_read += 1;
        let reason = match row {
            None => RowRejection::NotAPair,
            Some((Some(x), Some(y))) if x > 0.0 => {
                out.samples.push(x, y);
                continue;
            }
            Some((Some(_), Some(_))) => RowRejection::NonPositiveX,
            Some(_) => RowRejection::NonNumeric,
        };
        debug!(index, %reason, "skipping row");
        out.row_errors.push(RowError { index, reason });
    }

    out
}

/// Load rows from a file for offline use.
///
/// Accepted formats, chosen by extension:
/// - `.json`: `{"rows": [[x, y], ...]}` or a bare `[[x, y], ...]`
/// - anything else: CSV with `x,y` in the first two columns (header optional)
pub fn load_rows_file(path: &Path) -> Result<IngestedRows, AppError> {
    let file = File::open(path)
        .map_err(|e| {
            AppError::new(EXIT_USAGE, format!("Failed to open '{}': {e}", path.display()))
        })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let doc: Value = serde_json::from_reader(file)
            .map_err(|e| {
                AppError::new(EXIT_USAGE, format!("Invalid JSON in '{}': {e}", path.display()))
            })?;
        let rows = match &doc {
            Value::Object(map) => map.get("rows").unwrap_or(&Value::Null),
            other => other,
        };
        return parse_rows(rows).map_err(|e| AppError::new(EXIT_USAGE, e.to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to read CSV row: {e}")))?;
        records.push(match (record.get(0), record.get(1)) {
            (Some(x), Some(y)) => Some((parse_str(x), parse_str(y))),
            _ => None,
        });
    }

    Ok(collect_rows(records.into_iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_valid_rows_in_order() {
        let out = parse_rows(&json!([[1, 5], [2, 2], [3, 1.2], [4, 0.8]])).unwrap();
        assert_eq!(out.rows_read, 4);
        assert_eq!(out.rows_used(), 4);
        assert_eq!(out.samples.x(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(out.samples.y(), &[5.0, 2.0, 1.2, 0.8]);
        assert!(out.row_errors.is_empty());
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let out = parse_rows(&json!([[" 2.5 ", "1e-1"]])).unwrap();
        assert_eq!(out.samples.x(), &[2.5]);
        assert_eq!(out.samples.y(), &[0.1]);
    }

    #[test]
    fn bad_rows_are_skipped_with_reasons() {
        let out = parse_rows(&json!([
            ["abc", 5],
            [-1, 5],
            [0, 1],
            [1],
            "row",
            [2, null],
            [2, true],
            ["inf", 1],
            [1, 3, 99]
        ]))
        .unwrap();

        assert_eq!(out.rows_read, 9);
        assert_eq!(out.samples.x(), &[1.0]);
        let reasons: Vec<RowRejection> = out.row_errors.iter().map(|e| e.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RowRejection::NonNumeric,
                RowRejection::NonPositiveX,
                RowRejection::NonPositiveX,
                RowRejection::NotAPair,
                RowRejection::NotAPair,
                RowRejection::NonNumeric,
                RowRejection::NonNumeric,
                RowRejection::NonNumeric,
            ]
        );
        assert_eq!(out.row_errors[1].index, 1);
    }

    #[test]
    fn rows_must_be_an_array() {
        assert_eq!(parse_rows(&json!({"x": 1})).unwrap_err(), RowsNotArray);
        assert_eq!(parse_rows(&Value::Null).unwrap_err(), RowsNotArray);
    }

    #[test]
    fn empty_rows_is_not_an_error() {
        let out = parse_rows(&json!([])).unwrap();
        assert_eq!(out.rows_used(), 0);
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("invsq_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_header() {
        let path = temp_file("rows.csv", "x,y\n1,5\n2,2\nfoo,3\n-1,2\n");
        let out = load_rows_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(out.rows_read, 5);
        assert_eq!(out.samples.x(), &[1.0, 2.0]);
    }

    #[test]
    fn loads_json_object_and_bare_array() {
        let obj = temp_file("obj.json", r#"{"rows": [[1, 5], [2, 2]]}"#);
        let arr = temp_file("arr.json", r#"[[1, 5], [2, 2], [3, 1]]"#);
        let a = load_rows_file(&obj).unwrap();
        let b = load_rows_file(&arr).unwrap();
        std::fs::remove_file(&obj).ok();
        std::fs::remove_file(&arr).ok();
        assert_eq!(a.rows_used(), 2);
        assert_eq!(b.rows_used(), 3);
    }

    #[test]
    fn json_without_rows_is_a_usage_error() {
        let path = temp_file("norows.json", r#"{"points": []}"#);
        let err = load_rows_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }
}
