//! Render-side projection of the overlay core.
//!
//! SYSTEM CONTEXT
//! ==============
//! `OverlayCore` owns annotation truth. After every dispatched event the
//! bridge copies what the components render into a `ViewerState` signal,
//! so components never borrow the core while rendering. `annotations` is
//! filled by the store's page observer instead of `sync`.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use overlay::engine::{Action, OverlayCore};
use overlay::geometry::Rect;
use overlay::nav::Zoom;
use overlay::store::{Annotation, AnnotationId};

/// What the page content, annotation layer and header render.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub page: u32,
    pub zoom: Zoom,
    pub annotation_mode: bool,
    /// Annotations on `page`, in insertion order.
    pub annotations: Vec<Annotation>,
    pub selected: Option<AnnotationId>,
    /// Box being drawn or waiting for the editor.
    pub draft: Option<Rect>,
    pub editor_open: bool,
    /// Annotation following the pointer, if any.
    pub dragging: Option<AnnotationId>,
    /// Result of the last save/load, shown in the header.
    pub notice: Option<Notice>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            page: 1,
            zoom: Zoom::default(),
            annotation_mode: false,
            annotations: Vec::new(),
            selected: None,
            draft: None,
            editor_open: false,
            dragging: None,
            notice: None,
        }
    }
}

/// Outcome of an annotation file operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Imported { added: usize, rejected: usize },
    ImportFailed(String),
    ExportFailed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Imported { added, rejected: 0 } => format!("Loaded {added} annotations"),
            Self::Imported { added, rejected } => format!("Loaded {added} annotations, skipped {rejected} invalid rows"),
            Self::ImportFailed(reason) => format!("Failed to load annotations: {reason}"),
            Self::ExportFailed(reason) => format!("Failed to save annotations: {reason}"),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Imported { rejected: 0, .. })
    }
}

impl ViewerState {
    /// Copy view flags, selection and gesture state from `core`.
    pub fn sync(&mut self, core: &OverlayCore) {
        self.page = core.page;
        self.zoom = core.zoom;
        self.annotation_mode = core.annotation_mode;
        self.selected = core.selected();
        self.draft = core.draft_rect();
        self.dragging = core.gesture.moving_id();
    }

    /// Fold UI-only consequences of `actions` into the state.
    pub fn apply(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::EditorRequested { .. } => self.editor_open = true,
                Action::EditorClosed => self.editor_open = false,
                Action::SelectionChanged(selected) => self.selected = *selected,
                _ => {}
            }
        }
    }

    /// Replace the current page's annotations with an observer snapshot.
    pub fn set_annotations(&mut self, list: &[Annotation]) {
        self.annotations = list.to_vec();
    }

    pub fn is_selected(&self, id: &AnnotationId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == *id)
    }
}
