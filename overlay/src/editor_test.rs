#![allow(clippy::float_cmp)]

use super::*;

fn image(w: f64, h: f64) -> ImageAttachment {
    ImageAttachment { url: "data:image/png;base64,AAAA".to_owned(), original_width: w, original_height: h }
}

#[test]
fn new_draft_is_blank_with_square_preview() {
    let d = AnnotationDraft::new();
    assert_eq!(d.text(), "");
    assert!(d.image().is_none());
    assert_eq!(d.preview(), Size::new(MAX_PREVIEW_SIZE, MAX_PREVIEW_SIZE));
}

#[test]
fn text_only_payload_has_no_image_fields() {
    let mut d = AnnotationDraft::new();
    d.set_text("hello");
    let p = d.payload();
    assert_eq!(p.text, "hello");
    assert!(p.image_url.is_none());
    assert!(p.aspect_ratio.is_none());
    assert!(p.original_width.is_none());
    assert!(p.original_height.is_none());
}

#[test]
fn attach_image_sets_ratio_and_preview() {
    let mut d = AnnotationDraft::new();
    let token = d.begin_image_load();
    assert!(d.attach_image(token, image(400.0, 200.0)));
    assert_eq!(d.preview(), Size::new(200.0, 100.0));

    let p = d.payload();
    assert_eq!(p.aspect_ratio, Some(2.0));
    assert_eq!(p.original_width, Some(400.0));
    assert_eq!(p.original_height, Some(200.0));
    assert!(p.image_url.is_some());
}

#[test]
fn degenerate_image_ratio_defaults_to_one() {
    let mut d = AnnotationDraft::new();
    let token = d.begin_image_load();
    d.attach_image(token, image(0.0, 0.0));
    assert_eq!(d.payload().aspect_ratio, Some(1.0));
}

#[test]
fn zero_size_image_omits_dimensions() {
    let mut d = AnnotationDraft::new();
    let token = d.begin_image_load();
    d.attach_image(token, image(0.0, 0.0));
    let p = d.payload();
    assert!(p.image_url.is_some());
    assert!(p.original_width.is_none());
    assert!(p.original_height.is_none());
}

#[test]
fn zero_size_image_survives_export_and_import() {
    let mut d = AnnotationDraft::new();
    let token = d.begin_image_load();
    d.attach_image(token, image(0.0, 0.0));

    let mut store = crate::store::AnnotationStore::new();
    let stored = store.add(d.payload().into_annotation(1, Rect::new(0.0, 0.0, 20.0, 20.0)));
    let json = crate::transfer::export_json(store.all()).unwrap();
    let report = crate::transfer::parse_import(&json).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.annotations, vec![stored.to_new()]);
}

#[test]
fn newer_load_makes_older_token_stale() {
    let mut d = AnnotationDraft::new();
    let old = d.begin_image_load();
    let new = d.begin_image_load();
    assert!(!d.attach_image(old, image(10.0, 10.0)));
    assert!(d.image().is_none());
    assert!(d.attach_image(new, image(10.0, 20.0)));
}

#[test]
fn completion_after_reset_is_ignored() {
    let mut d = AnnotationDraft::new();
    d.set_text("x");
    let token = d.begin_image_load();
    d.reset();
    assert!(!d.attach_image(token, image(10.0, 10.0)));
    assert!(d.image().is_none());
    assert_eq!(d.text(), "");
}

#[test]
fn remove_image_restores_square_preview() {
    let mut d = AnnotationDraft::new();
    let token = d.begin_image_load();
    d.attach_image(token, image(100.0, 400.0));
    assert_eq!(d.preview(), Size::new(50.0, 200.0));
    d.remove_image();
    assert!(d.image().is_none());
    assert_eq!(d.preview(), Size::new(200.0, 200.0));
}

#[test]
fn payload_into_annotation_copies_box_and_page() {
    let p = AnnotationPayload { text: "t".to_owned(), ..AnnotationPayload::default() };
    let a = p.into_annotation(3, Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(a.page, 3);
    assert_eq!((a.x, a.y, a.width, a.height), (1.0, 2.0, 3.0, 4.0));
    assert_eq!(a.text, "t");
}
