#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn rect_approx_eq(a: Rect, b: Rect) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.width, b.width) && approx_eq(a.height, b.height)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// to_document_coordinates
// =============================================================

#[test]
fn document_coords_subtracts_origin_at_identity_zoom() {
    let p = to_document_coordinates(pt(150.0, 120.0), pt(100.0, 100.0), Size::new(800.0, 600.0), 1.0);
    assert_eq!(p, pt(50.0, 20.0));
}

#[test]
fn document_coords_divides_by_zoom() {
    let p = to_document_coordinates(pt(300.0, 200.0), pt(100.0, 100.0), Size::new(800.0, 600.0), 2.0);
    assert_eq!(p, pt(100.0, 50.0));
}

#[test]
fn document_coords_clamps_left_of_container_to_zero() {
    let p = to_document_coordinates(pt(90.0, 150.0), pt(100.0, 100.0), Size::new(800.0, 600.0), 2.0);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 25.0);
}

#[test]
fn document_coords_clamps_past_far_edge_to_unscaled_size() {
    let p = to_document_coordinates(pt(2000.0, 2000.0), pt(0.0, 0.0), Size::new(800.0, 600.0), 2.0);
    assert_eq!(p, pt(400.0, 300.0));
}

#[test]
fn document_coords_always_within_bounds() {
    let size = Size::new(800.0, 600.0);
    for zoom in [0.1, 0.5, 1.0, 1.7, 3.0] {
        for (sx, sy) in [(-500.0, -500.0), (0.0, 0.0), (400.0, 300.0), (5000.0, 5000.0)] {
            let p = to_document_coordinates(pt(sx, sy), pt(10.0, 20.0), size, zoom);
            assert!(p.x >= 0.0 && p.x <= size.width / zoom, "x={} zoom={zoom}", p.x);
            assert!(p.y >= 0.0 && p.y <= size.height / zoom, "y={} zoom={zoom}", p.y);
        }
    }
}

// =============================================================
// box_from_drag
// =============================================================

#[test]
fn box_from_drag_forward() {
    let r = box_from_drag(pt(10.0, 20.0), pt(60.0, 80.0));
    assert_eq!(r, Rect::new(10.0, 20.0, 50.0, 60.0));
}

#[test]
fn box_from_drag_backward_normalizes() {
    let r = box_from_drag(pt(50.0, 50.0), pt(10.0, 10.0));
    assert_eq!(r, Rect::new(10.0, 10.0, 40.0, 40.0));
}

#[test]
fn box_from_drag_mixed_direction() {
    let r = box_from_drag(pt(50.0, 10.0), pt(20.0, 70.0));
    assert_eq!(r, Rect::new(20.0, 10.0, 30.0, 60.0));
}

#[test]
fn box_from_drag_zero_size_allowed() {
    let r = box_from_drag(pt(5.0, 5.0), pt(5.0, 5.0));
    assert_eq!(r, Rect::at(pt(5.0, 5.0)));
}

#[test]
fn box_from_drag_never_negative() {
    let points = [(0.0, 0.0), (100.0, 3.0), (-4.0, 77.0), (33.0, -12.0)];
    for &(ax, ay) in &points {
        for &(bx, by) in &points {
            let r = box_from_drag(pt(ax, ay), pt(bx, by));
            assert!(r.width >= 0.0);
            assert!(r.height >= 0.0);
        }
    }
}

// =============================================================
// adjust_for_aspect_ratio
// =============================================================

#[test]
fn aspect_none_returns_box_unchanged() {
    let r = Rect::new(5.0, 6.0, 70.0, 20.0);
    assert_eq!(adjust_for_aspect_ratio(r, None, 100.0, 100.0), r);
}

#[test]
fn aspect_zero_or_nan_returns_box_unchanged() {
    let r = Rect::new(5.0, 6.0, 70.0, 20.0);
    assert_eq!(adjust_for_aspect_ratio(r, Some(0.0), 100.0, 100.0), r);
    assert_eq!(adjust_for_aspect_ratio(r, Some(f64::NAN), 100.0, 100.0), r);
}

#[test]
fn aspect_wide_branch_derives_height() {
    let r = adjust_for_aspect_ratio(Rect::new(0.0, 0.0, 80.0, 80.0), Some(2.0), 100.0, 50.0);
    assert!(rect_approx_eq(r, Rect::new(0.0, 0.0, 80.0, 40.0)));
}

#[test]
fn aspect_wide_branch_clamps_height_and_rescales_width() {
    let r = adjust_for_aspect_ratio(Rect::new(0.0, 0.0, 90.0, 10.0), Some(1.0), 200.0, 50.0);
    assert!(rect_approx_eq(r, Rect::new(0.0, 0.0, 50.0, 50.0)));
}

#[test]
fn aspect_tall_branch_derives_width() {
    let r = adjust_for_aspect_ratio(Rect::new(10.0, 10.0, 20.0, 60.0), Some(0.5), 200.0, 200.0);
    assert!(rect_approx_eq(r, Rect::new(10.0, 10.0, 30.0, 60.0)));
}

#[test]
fn aspect_tall_branch_clamps_width_and_rescales_height() {
    let r = adjust_for_aspect_ratio(Rect::new(0.0, 0.0, 10.0, 100.0), Some(4.0), 100.0, 500.0);
    assert!(rect_approx_eq(r, Rect::new(0.0, 0.0, 100.0, 25.0)));
}

#[test]
fn aspect_pulls_origin_back_inside_bounds() {
    let r = adjust_for_aspect_ratio(Rect::new(90.0, 45.0, 40.0, 10.0), Some(2.0), 100.0, 50.0);
    assert!(rect_approx_eq(r, Rect::new(60.0, 30.0, 40.0, 20.0)));
    assert!(r.right() <= 100.0 + EPSILON);
    assert!(r.bottom() <= 50.0 + EPSILON);
}

// =============================================================
// Drag state and delta
// =============================================================

#[test]
fn init_drag_state_records_pointer_and_origin() {
    let s = init_drag_state(pt(300.0, 200.0), 40.0, 50.0);
    assert!(s.is_dragging);
    assert_eq!((s.start_x, s.start_y), (300.0, 200.0));
    assert_eq!((s.original_x, s.original_y), (40.0, 50.0));
}

#[test]
fn reset_drag_state_is_neutral() {
    let s = reset_drag_state();
    assert!(!s.is_dragging);
    assert_eq!(s, DragState::default());
}

#[test]
fn drag_delta_translates_by_screen_delta() {
    let s = init_drag_state(pt(300.0, 200.0), 40.0, 50.0);
    assert_eq!(drag_delta(pt(310.0, 195.0), &s), pt(50.0, 45.0));
}

#[test]
fn drag_delta_ignores_zoom() {
    let s = init_drag_state(pt(0.0, 0.0), 0.0, 0.0);
    assert_eq!(drag_delta(pt(20.0, 20.0), &s), pt(20.0, 20.0));
}

#[test]
fn drag_delta_scaled_divides_delta_by_zoom() {
    let s = init_drag_state(pt(0.0, 0.0), 10.0, 10.0);
    assert_eq!(drag_delta_scaled(pt(20.0, 40.0), &s, 2.0), pt(20.0, 30.0));
}

// =============================================================
// preview_scale
// =============================================================

#[test]
fn preview_landscape_fits_width() {
    let s = preview_scale(400.0, 200.0, 200.0);
    assert_eq!(s, Size::new(200.0, 100.0));
}

#[test]
fn preview_portrait_fits_height() {
    let s = preview_scale(100.0, 400.0, 200.0);
    assert_eq!(s, Size::new(50.0, 200.0));
}

#[test]
fn preview_square_is_max_square() {
    assert_eq!(preview_scale(640.0, 640.0, 200.0), Size::new(200.0, 200.0));
}

#[test]
fn preview_degenerate_dimensions_fall_back_to_square() {
    assert_eq!(preview_scale(0.0, 300.0, 200.0), Size::new(200.0, 200.0));
}

// =============================================================
// Hit helpers
// =============================================================

#[test]
fn point_in_rect_includes_edges() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(point_in_rect(pt(10.0, 10.0), &r));
    assert!(point_in_rect(pt(30.0, 30.0), &r));
    assert!(!point_in_rect(pt(30.1, 15.0), &r));
}

#[test]
fn point_in_any_checks_every_rect() {
    let rects = [Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(50.0, 50.0, 5.0, 5.0)];
    assert!(point_in_any(pt(52.0, 52.0), &rects));
    assert!(!point_in_any(pt(20.0, 20.0), &rects));
    assert!(!point_in_any(pt(0.0, 0.0), &[]));
}

#[test]
fn clamp_origin_keeps_box_inside_bounds() {
    let size = Size::new(100.0, 50.0);
    let bounds = Size::new(800.0, 600.0);
    assert_eq!(clamp_origin(pt(-40.0, 10.0), size, bounds), pt(0.0, 10.0));
    assert_eq!(clamp_origin(pt(750.0, 580.0), size, bounds), pt(700.0, 550.0));
    assert_eq!(clamp_origin(pt(30.0, 40.0), size, bounds), pt(30.0, 40.0));
}

#[test]
fn clamp_origin_pins_oversized_box_to_corner() {
    let p = clamp_origin(pt(20.0, 20.0), Size::new(900.0, 700.0), Size::new(800.0, 600.0));
    assert_eq!(p, pt(0.0, 0.0));
}
