//! Inline style strings for the page and overlay elements.
//!
//! The page wrapper is scaled with a CSS transform, so everything inside it
//! (annotations, draft box, editor) is positioned in document units.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use overlay::geometry::{Rect, Size};
use overlay::nav::Zoom;

/// Absolute placement of a box in document units.
pub fn box_style(rect: &Rect) -> String {
    format!(
        "left: {}px; top: {}px; width: {}px; height: {}px;",
        rect.x, rect.y, rect.width, rect.height
    )
}

/// Scale transform for the page wrapper.
pub fn page_style(zoom: Zoom) -> String {
    format!("transform: scale({}); transform-origin: top left;", zoom.level())
}

/// Editor placement: just under the drawn box.
pub fn editor_style(rect: &Rect) -> String {
    format!("left: {}px; top: {}px;", rect.x, rect.bottom())
}

pub fn preview_style(size: Size) -> String {
    format!("width: {}px; height: {}px;", size.width, size.height)
}
