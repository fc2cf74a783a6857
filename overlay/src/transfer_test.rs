#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use super::*;

fn seeded_store() -> AnnotationStore {
    let mut store = AnnotationStore::new();
    store.add(NewAnnotation {
        page: 1,
        x: 10.0,
        y: 20.0,
        width: 100.0,
        height: 50.0,
        text: "first".to_owned(),
        ..Default::default()
    });
    store.add(NewAnnotation {
        page: 2,
        x: 0.5,
        y: 0.25,
        width: 80.0,
        height: 40.0,
        text: "with image".to_owned(),
        image_url: Some("data:image/png;base64,iVBORw0KGgo=".to_owned()),
        aspect_ratio: Some(2.0),
        original_width: Some(640.0),
        original_height: Some(320.0),
    });
    store.add(NewAnnotation { page: 1, x: 3.0, y: 4.0, width: 5.0, height: 6.0, ..Default::default() });
    store
}

// =============================================================
// Export
// =============================================================

#[test]
fn export_is_pretty_array_with_two_space_indent() {
    let store = seeded_store();
    let json = export_json(store.all()).unwrap();
    assert!(json.starts_with("[\n  {\n    \""));
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(3));
}

#[test]
fn export_includes_every_page() {
    let store = seeded_store();
    let json = export_json(store.all()).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    let pages: HashSet<u64> = parsed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|row| row["page"].as_u64())
        .collect();
    assert_eq!(pages, HashSet::from([1, 2]));
}

#[test]
fn export_of_empty_store_is_empty_array() {
    let store = AnnotationStore::new();
    assert_eq!(export_json(store.all()).unwrap(), "[]");
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn export_then_import_keeps_fields_and_assigns_new_ids() {
    let mut store = seeded_store();
    let originals: Vec<Annotation> = store.all().into_iter().cloned().collect();
    let json = export_json(&originals).unwrap();

    let report = parse_import(&json).unwrap();
    assert!(report.is_clean());
    let new_ids = import_into(&mut store, report.annotations);

    assert_eq!(new_ids.len(), originals.len());
    let unique: HashSet<_> = new_ids.iter().collect();
    assert_eq!(unique.len(), new_ids.len());

    for (original, id) in originals.iter().zip(&new_ids) {
        assert_ne!(original.id, *id);
        let imported = store.get(id).unwrap();
        assert_eq!(imported.to_new(), original.to_new());
    }
    assert_eq!(store.len(), originals.len() * 2);
}

#[test]
fn importing_twice_yields_two_independent_sets() {
    let json = export_json(seeded_store().all()).unwrap();
    let mut store = AnnotationStore::new();
    let first = import_into(&mut store, parse_import(&json).unwrap().annotations);
    let second = import_into(&mut store, parse_import(&json).unwrap().annotations);
    assert_eq!(store.len(), 6);
    assert!(first.iter().all(|id| !second.contains(id)));
}

// =============================================================
// Import failures
// =============================================================

#[test]
fn malformed_json_fails_whole_import() {
    let err = parse_import("[{\"page\": 1,").unwrap_err();
    assert!(matches!(err, TransferError::Parse(_)));
}

#[test]
fn non_array_top_level_fails() {
    let err = parse_import("{\"page\": 1}").unwrap_err();
    assert!(matches!(err, TransferError::NotAnArray { found: "object" }));
}

#[test]
fn parse_failure_leaves_store_untouched() {
    let mut store = seeded_store();
    let before = store.len();
    if let Ok(report) = parse_import("not json") {
        import_into(&mut store, report.annotations);
    }
    assert_eq!(store.len(), before);
}

// =============================================================
// Row validation and coercion
// =============================================================

#[test]
fn missing_required_field_is_reported_per_row() {
    let json = r#"[
        {"page": 1, "x": 1, "y": 2, "width": 3, "height": 4, "text": "ok"},
        {"page": 1, "y": 2, "width": 3, "height": 4},
        {"page": 1, "x": 1, "y": 2, "width": 3, "height": 4}
    ]"#;
    let report = parse_import(json).unwrap();
    assert_eq!(report.annotations.len(), 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].index, 1);
    assert_eq!(report.errors[0].field, "x");
}

#[test]
fn non_object_row_is_rejected() {
    let report = parse_import("[42]").unwrap();
    assert!(report.annotations.is_empty());
    assert_eq!(report.errors[0].field, "row");
}

#[test]
fn non_numeric_and_negative_values_are_rejected() {
    let json = r#"[
        {"page": 1, "x": "abc", "y": 0, "width": 1, "height": 1},
        {"page": 1, "x": -5, "y": 0, "width": 1, "height": 1},
        {"page": 0, "x": 0, "y": 0, "width": 1, "height": 1},
        {"page": 1.5, "x": 0, "y": 0, "width": 1, "height": 1}
    ]"#;
    let report = parse_import(json).unwrap();
    assert!(report.annotations.is_empty());
    let fields: Vec<_> = report.errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["x", "x", "page", "page"]);
}

#[test]
fn numeric_strings_are_coerced() {
    let json = r#"[{"id": "7", "page": "2", "x": "1.5", "y": 2, "width": "10", "height": 4}]"#;
    let report = parse_import(json).unwrap();
    let row = &report.annotations[0];
    assert_eq!(row.page, 2);
    assert_eq!(row.x, 1.5);
    assert_eq!(row.width, 10.0);
}

#[test]
fn text_is_coerced_to_string() {
    let json = r#"[
        {"page": 1, "x": 0, "y": 0, "width": 1, "height": 1},
        {"page": 1, "x": 0, "y": 0, "width": 1, "height": 1, "text": 123}
    ]"#;
    let report = parse_import(json).unwrap();
    assert_eq!(report.annotations[0].text, "");
    assert_eq!(report.annotations[1].text, "123");
}

#[test]
fn falsy_optional_fields_are_omitted() {
    let json = r#"[{"page": 1, "x": 0, "y": 0, "width": 1, "height": 1,
        "imageUrl": "", "aspectRatio": 0, "originalWidth": null, "originalHeight": false}]"#;
    let row = &parse_import(json).unwrap().annotations[0];
    assert!(row.image_url.is_none());
    assert!(row.aspect_ratio.is_none());
    assert!(row.original_width.is_none());
    assert!(row.original_height.is_none());
}

#[test]
fn invalid_optional_number_is_reported() {
    let json = r#"[{"page": 1, "x": 0, "y": 0, "width": 1, "height": 1, "aspectRatio": "wide"}]"#;
    let report = parse_import(json).unwrap();
    assert_eq!(report.errors[0].field, "aspectRatio");
}

#[test]
fn row_error_display_names_row_and_field() {
    let err = RowError { index: 3, field: "width", reason: "missing".to_owned() };
    assert_eq!(err.to_string(), "row 3: width: missing");
}
