//! Single-annotation selection for the current page.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::geometry::{Point, Rect, point_in_any};
use crate::store::AnnotationId;

/// At most one selected annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<AnnotationId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected annotation.
    #[must_use]
    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    #[must_use]
    pub fn is_selected(&self, id: &AnnotationId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Select `id`, replacing any previous selection.
    pub fn select(&mut self, id: AnnotationId) {
        self.selected = Some(id);
    }

    /// Click on an annotation: select it, or deselect it if already selected.
    pub fn toggle(&mut self, id: AnnotationId) {
        if self.is_selected(&id) {
            self.selected = None;
        } else {
            self.selected = Some(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The active page changed; nothing stays selected.
    pub fn on_page_changed(&mut self) {
        self.clear();
    }

    /// An annotation was deleted; drop it from the selection.
    pub fn on_deleted(&mut self, id: &AnnotationId) {
        if self.is_selected(id) {
            self.clear();
        }
    }

    /// A click landed somewhere in the document.
    ///
    /// Clears the selection unless `point` hits one of the rendered
    /// annotation boxes. Returns whether the selection changed.
    pub fn on_document_click<'a, I>(&mut self, point: Point, annotation_rects: I) -> bool
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        if self.selected.is_none() || point_in_any(point, annotation_rects) {
            return false;
        }
        self.clear();
        true
    }
}
