use uuid::Uuid;

use super::*;

#[test]
fn starts_with_nothing_selected() {
    assert!(Selection::new().selected().is_none());
}

#[test]
fn toggle_selects_then_deselects() {
    let id = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.toggle(id);
    assert_eq!(sel.selected(), Some(id));
    sel.toggle(id);
    assert!(sel.selected().is_none());
}

#[test]
fn toggle_other_switches_selection() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.toggle(a);
    sel.toggle(b);
    assert_eq!(sel.selected(), Some(b));
}

#[test]
fn page_change_clears_selection() {
    let id = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.select(id);
    assert_eq!(sel.selected(), Some(id));
    sel.on_page_changed();
    assert!(sel.selected().is_none());
}

#[test]
fn deleting_selected_clears_it() {
    let id = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.select(id);
    sel.on_deleted(&id);
    assert!(sel.selected().is_none());
}

#[test]
fn deleting_other_keeps_selection() {
    let id = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.select(id);
    sel.on_deleted(&Uuid::new_v4());
    assert_eq!(sel.selected(), Some(id));
}

#[test]
fn click_outside_all_rects_clears() {
    let mut sel = Selection::new();
    sel.select(Uuid::new_v4());
    let rects = [Rect::new(0.0, 0.0, 10.0, 10.0)];
    assert!(sel.on_document_click(Point::new(50.0, 50.0), &rects));
    assert!(sel.selected().is_none());
}

#[test]
fn click_inside_a_rect_keeps_selection() {
    let id = Uuid::new_v4();
    let mut sel = Selection::new();
    sel.select(id);
    let rects = [Rect::new(100.0, 100.0, 10.0, 10.0), Rect::new(0.0, 0.0, 10.0, 10.0)];
    assert!(!sel.on_document_click(Point::new(5.0, 5.0), &rects));
    assert_eq!(sel.selected(), Some(id));
}

#[test]
fn click_with_nothing_selected_is_noop() {
    let mut sel = Selection::new();
    assert!(!sel.on_document_click(Point::new(5.0, 5.0), &[]));
}
