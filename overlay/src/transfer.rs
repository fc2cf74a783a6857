//! Annotation file export and import.
//!
//! Export writes every annotation as a pretty-printed JSON array (2-space
//! indent). Import is two-staged: the text must parse as a JSON array or the
//! whole import fails; after that every row is validated on its own, valid
//! rows become [`NewAnnotation`]s and invalid rows are reported with the
//! offending field. Ids in the file are never reused; the store assigns new
//! ones, so importing the same file twice yields two independent sets.

#[cfg(test)]
#[path = "transfer_test.rs"]
mod transfer_test;

use serde_json::{Map, Value};

use crate::store::{Annotation, AnnotationId, AnnotationStore, NewAnnotation};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("annotation file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("annotation file must hold a JSON array, found {found}")]
    NotAnArray { found: &'static str },
}

/// Why one row of an import was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {index}: {field}: {reason}")]
pub struct RowError {
    /// Zero-based position of the row in the file.
    pub index: usize,
    /// Field that failed validation, or `"row"` for the row itself.
    pub field: &'static str,
    pub reason: String,
}

/// Outcome of parsing an annotation file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Rows that passed validation, in file order.
    pub annotations: Vec<NewAnnotation>,
    /// Rows that did not.
    pub errors: Vec<RowError>,
}

impl ImportReport {
    /// True when every row was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// Serialize annotations to the `annotations.json` format.
///
/// # Errors
///
/// Returns `Parse` if serialization fails.
pub fn export_json<'a, I>(annotations: I) -> Result<String, TransferError>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let rows: Vec<&Annotation> = annotations.into_iter().collect();
    let json = serde_json::to_string_pretty(&rows)?;
    tracing::debug!(count = rows.len(), "annotations exported");
    Ok(json)
}

// =============================================================================
// IMPORT
// =============================================================================

/// Parse and validate an annotation file.
///
/// # Errors
///
/// Returns `Parse` for malformed JSON and `NotAnArray` when the top-level
/// value is not an array. Row-level problems are reported in
/// [`ImportReport::errors`] instead.
pub fn parse_import(text: &str) -> Result<ImportReport, TransferError> {
    let value: Value = serde_json::from_str(text)?;
    let rows = match value {
        Value::Array(rows) => rows,
        other => return Err(TransferError::NotAnArray { found: json_kind(&other) }),
    };

    let mut report = ImportReport::default();
    for (index, row) in rows.iter().enumerate() {
        match parse_row(index, row) {
            Ok(annotation) => report.annotations.push(annotation),
            Err(err) => {
                tracing::warn!(%err, "annotation row rejected");
                report.errors.push(err);
            }
        }
    }
    Ok(report)
}

/// Insert every row as a new annotation and return the assigned ids.
pub fn import_into(store: &mut AnnotationStore, rows: Vec<NewAnnotation>) -> Vec<AnnotationId> {
    rows.into_iter().map(|row| store.add(row).id).collect()
}

fn parse_row(index: usize, row: &Value) -> Result<NewAnnotation, RowError> {
    let Some(obj) = row.as_object() else {
        return Err(RowError { index, field: "row", reason: format!("expected an object, found {}", json_kind(row)) });
    };

    let page = required_number(index, obj, "page")?;
    if page < 1.0 || page.fract() != 0.0 || page > f64::from(u32::MAX) {
        return Err(RowError { index, field: "page", reason: format!("expected a positive integer, found {page}") });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let page = page as u32;

    Ok(NewAnnotation {
        page,
        x: required_extent(index, obj, "x")?,
        y: required_extent(index, obj, "y")?,
        width: required_extent(index, obj, "width")?,
        height: required_extent(index, obj, "height")?,
        text: coerce_text(obj.get("text")),
        image_url: optional_text(obj.get("imageUrl")),
        aspect_ratio: optional_number(index, obj, "aspectRatio")?,
        original_width: optional_number(index, obj, "originalWidth")?,
        original_height: optional_number(index, obj, "originalHeight")?,
    })
}

fn required_number(index: usize, obj: &Map<String, Value>, field: &'static str) -> Result<f64, RowError> {
    let Some(value) = obj.get(field).filter(|v| !v.is_null()) else {
        return Err(RowError { index, field, reason: "missing".to_owned() });
    };
    coerce_number(value).ok_or_else(|| RowError { index, field, reason: format!("not a number: {value}") })
}

fn required_extent(index: usize, obj: &Map<String, Value>, field: &'static str) -> Result<f64, RowError> {
    let n = required_number(index, obj, field)?;
    if n < 0.0 {
        return Err(RowError { index, field, reason: format!("must not be negative, found {n}") });
    }
    Ok(n)
}

/// Absent, null, `false`, `0` and `""` all mean "not set".
fn optional_number(index: usize, obj: &Map<String, Value>, field: &'static str) -> Result<Option<f64>, RowError> {
    let Some(value) = obj.get(field).filter(|v| is_truthy(v)) else {
        return Ok(None);
    };
    match coerce_number(value) {
        Some(n) if n != 0.0 => Ok(Some(n)),
        Some(_) => Ok(None),
        None => Err(RowError { index, field, reason: format!("not a number: {value}") }),
    }
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| is_truthy(v)).map(|v| coerce_text(Some(v)))
}

/// Finite number from a JSON number or a numeric string.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return None,
        },
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
