//! Pointer and box geometry for the annotation overlay.
//!
//! All functions here are pure. Screen-space inputs are CSS pixels as
//! reported by pointer events; document-space outputs are unscaled page
//! pixels, i.e. screen distances divided by the current zoom.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a container or image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box used while drawing a region or fitting it to an image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Degenerate box anchored at `p`.
    #[must_use]
    pub fn at(p: Point) -> Self {
        Self { x: p.x, y: p.y, width: 0.0, height: 0.0 }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Move-gesture bookkeeping: where the pointer went down and where the
/// annotation was at that moment.
///
/// `start_x`/`start_y` are screen pixels; `original_x`/`original_y` are the
/// annotation's document-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub start_x: f64,
    pub start_y: f64,
    pub original_x: f64,
    pub original_y: f64,
}

/// Convert a pointer position to document coordinates inside a container.
///
/// `origin` is the container's top-left and `size` its rendered (zoomed)
/// size, both in screen pixels. The result is clamped to
/// `[0, size / zoom]` on each axis, so a pointer outside the container maps
/// to the nearest edge.
#[must_use]
pub fn to_document_coordinates(pointer: Point, origin: Point, size: Size, zoom: f64) -> Point {
    let x = (pointer.x - origin.x) / zoom;
    let y = (pointer.y - origin.y) / zoom;
    Point {
        x: x.min(size.width / zoom).max(0.0),
        y: y.min(size.height / zoom).max(0.0),
    }
}

/// Normalized box spanned by a drag from `start` to `current`.
///
/// Width and height are never negative, whichever way the pointer moved.
#[must_use]
pub fn box_from_drag(start: Point, current: Point) -> Rect {
    Rect {
        x: start.x.min(current.x),
        y: start.y.min(current.y),
        width: (current.x - start.x).abs(),
        height: (current.y - start.y).abs(),
    }
}

/// Reshape `rect` to `aspect_ratio` (width / height) and keep it inside
/// `[0, max_width] x [0, max_height]`.
///
/// A missing, zero, negative or non-finite ratio leaves `rect` untouched.
/// Wider-than-tall boxes (ties included) keep their width and derive the
/// height; taller boxes keep their height and derive the width. If the
/// derived side overflows its bound it is clamped and the other side is
/// rescaled. Finally the origin is pulled back so the box fits.
#[must_use]
pub fn adjust_for_aspect_ratio(rect: Rect, aspect_ratio: Option<f64>, max_width: f64, max_height: f64) -> Rect {
    let Some(ratio) = aspect_ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return rect;
    };

    let mut width = rect.width;
    let mut height = rect.height;

    if rect.width >= rect.height {
        height = rect.width / ratio;
        if height > max_height {
            height = max_height;
            width = height * ratio;
        }
    } else {
        width = rect.height * ratio;
        if width > max_width {
            width = max_width;
            height = width / ratio;
        }
    }

    Rect {
        x: rect.x.min(max_width - width).max(0.0),
        y: rect.y.min(max_height - height).max(0.0),
        width,
        height,
    }
}

/// Clamp the origin of a box of `size` so the box stays inside `bounds`.
///
/// A box larger than `bounds` is pinned to the top-left corner.
#[must_use]
pub fn clamp_origin(origin: Point, size: Size, bounds: Size) -> Point {
    let max_x = (bounds.width - size.width).max(0.0);
    let max_y = (bounds.height - size.height).max(0.0);
    Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
}

/// Start a move gesture at screen position `pointer` for an annotation at `(x, y)`.
#[must_use]
pub fn init_drag_state(pointer: Point, x: f64, y: f64) -> DragState {
    DragState {
        is_dragging: true,
        start_x: pointer.x,
        start_y: pointer.y,
        original_x: x,
        original_y: y,
    }
}

/// Neutral "not dragging" state.
#[must_use]
pub fn reset_drag_state() -> DragState {
    DragState::default()
}

/// New annotation position for a pointer at `pointer` during a move gesture.
///
/// The screen-pixel delta is added to the document-space origin unscaled.
/// See [`drag_delta_scaled`] for the zoom-aware variant.
#[must_use]
pub fn drag_delta(pointer: Point, drag: &DragState) -> Point {
    Point {
        x: drag.original_x + (pointer.x - drag.start_x),
        y: drag.original_y + (pointer.y - drag.start_y),
    }
}

/// Like [`drag_delta`] but converts the screen delta to document space first.
#[must_use]
pub fn drag_delta_scaled(pointer: Point, drag: &DragState, zoom: f64) -> Point {
    Point {
        x: drag.original_x + (pointer.x - drag.start_x) / zoom,
        y: drag.original_y + (pointer.y - drag.start_y) / zoom,
    }
}

/// Preview size for an image of `original_width` x `original_height` whose
/// longer side is scaled to `max_size`.
///
/// Square images take the landscape branch. Degenerate dimensions yield a
/// `max_size` square.
#[must_use]
pub fn preview_scale(original_width: f64, original_height: f64, max_size: f64) -> Size {
    if original_width <= 0.0 || original_height <= 0.0 {
        return Size::new(max_size, max_size);
    }
    let ratio = original_width / original_height;
    if ratio >= 1.0 {
        Size::new(max_size, max_size / ratio)
    } else {
        Size::new(max_size * ratio, max_size)
    }
}

/// Whether `p` lies inside `rect`, edges included.
#[must_use]
pub fn point_in_rect(p: Point, rect: &Rect) -> bool {
    p.x >= rect.x && p.x <= rect.right() && p.y >= rect.y && p.y <= rect.bottom()
}

/// Whether `p` lies inside any of `rects`.
#[must_use]
pub fn point_in_any<'a, I>(p: Point, rects: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects.into_iter().any(|r| point_in_rect(p, r))
}
