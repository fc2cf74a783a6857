use crate::editor::AnnotationPayload;
use crate::geometry::{
    DragState, Point, Rect, Size, adjust_for_aspect_ratio, box_from_drag, clamp_origin, drag_delta,
    drag_delta_scaled, init_drag_state, to_document_coordinates,
};
use crate::gesture::{GestureState, ListenerPair, ListenerRegistry};
use crate::nav::Zoom;
use crate::selection::Selection;
use crate::store::{Annotation, AnnotationId, AnnotationStore, PageObserver, Subscription};
use crate::transfer::{self, ImportReport, TransferError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new annotation was stored.
    AnnotationCreated(Annotation),
    /// An annotation was moved or edited.
    AnnotationUpdated(Annotation),
    AnnotationDeleted { id: AnnotationId },
    SelectionChanged(Option<AnnotationId>),
    /// The drawn box is frozen; show the editor over it.
    EditorRequested { rect: Rect },
    EditorClosed,
    /// Attach window-level pointer move/up listeners for this pair.
    AttachListeners(ListenerPair),
    /// Detach the window-level listeners of this pair.
    DetachListeners(ListenerPair),
    RenderNeeded,
}

/// How pointer deltas are applied while moving an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragScale {
    /// Add the raw screen-pixel delta to the document position. At zoom
    /// other than 1 the annotation under- or overshoots the pointer.
    #[default]
    ScreenPixels,
    /// Divide the delta by zoom so the annotation tracks the pointer.
    DocumentSpace,
}

/// Screen-space placement of the page container, refreshed by the host
/// from the element's bounding rect before pointer events are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageFrame {
    pub origin: Point,
    /// Rendered (zoomed) size.
    pub size: Size,
}

/// Overlay state and event handling, independent of the DOM.
#[derive(Debug, Default)]
pub struct OverlayCore {
    pub store: AnnotationStore,
    pub gesture: GestureState,
    pub selection: Selection,
    pub listeners: ListenerRegistry,
    pub page: u32,
    pub zoom: Zoom,
    pub frame: PageFrame,
    pub annotation_mode: bool,
    pub drag_scale: DragScale,
    /// Store subscription feeding the host's render of the current page.
    watch: Option<Subscription>,
}

impl OverlayCore {
    #[must_use]
    pub fn new() -> Self {
        Self { page: 1, ..Self::default() }
    }

    // --- View inputs ---

    /// Switch to `page`. Clears the selection and abandons any gesture.
    pub fn set_page(&mut self, page: u32) -> Vec<Action> {
        if page == self.page {
            return Vec::new();
        }
        self.page = page;
        let mut actions = self.abandon_gesture();
        let had_selection = self.selection.selected().is_some();
        self.selection.on_page_changed();
        if had_selection {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Route store changes on the current page to `observer`, dropping the
    /// observer registered for the previously watched page.
    ///
    /// Returns the page's annotations as they are now, since the observer
    /// only hears about later changes.
    pub fn watch_current_page(&mut self, observer: PageObserver) -> Vec<Annotation> {
        if let Some(previous) = self.watch.take() {
            self.store.unsubscribe(previous);
        }
        self.watch = Some(self.store.subscribe(self.page, observer));
        self.visible().into_iter().cloned().collect()
    }

    /// Page the current observer is registered for.
    #[must_use]
    pub fn watched_page(&self) -> Option<u32> {
        self.watch.map(|w| w.page())
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    pub fn set_page_bounds(&mut self, frame: PageFrame) {
        self.frame = frame;
    }

    /// Enter or leave annotation (draw) mode. Leaving abandons an unfinished draw.
    pub fn set_annotation_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.annotation_mode = enabled;
        if !enabled && (self.gesture.is_drawing() || self.gesture.is_awaiting_input()) {
            return self.abandon_gesture();
        }
        Vec::new()
    }

    // --- Draw flow ---

    /// Primary-button press on the page surface.
    pub fn on_pointer_down(&mut self, screen: Point) -> Vec<Action> {
        if !self.annotation_mode || self.gesture.is_awaiting_input() {
            return Vec::new();
        }
        let mut actions = self.abandon_gesture();
        let start = self.to_document(screen);
        self.gesture = GestureState::Drawing { start, rect: Rect::at(start) };
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer move over the page surface.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let GestureState::Drawing { start, .. } = self.gesture else {
            return Vec::new();
        };
        let current = self.to_document(screen);
        self.gesture = GestureState::Drawing { start, rect: box_from_drag(start, current) };
        vec![Action::RenderNeeded]
    }

    /// Pointer release over the page surface: freeze the box and ask for input.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let GestureState::Drawing { rect, .. } = self.gesture else {
            return Vec::new();
        };
        self.gesture = GestureState::AwaitingInput { rect, saving: false };
        vec![Action::EditorRequested { rect }, Action::RenderNeeded]
    }

    /// Editor saved: fit the box to the image, store the annotation, go idle
    /// and leave annotation mode.
    ///
    /// Returns nothing when no box is awaiting input or a submit for this
    /// gesture is already being finalized.
    pub fn submit(&mut self, payload: AnnotationPayload) -> Vec<Action> {
        let rect = match &mut self.gesture {
            GestureState::AwaitingInput { rect, saving } if !*saving => {
                *saving = true;
                *rect
            }
            _ => return Vec::new(),
        };

        let bounds = self.page_bounds();
        let fitted = adjust_for_aspect_ratio(rect, payload.aspect_ratio, bounds.width, bounds.height);
        let created = self.store.add(payload.into_annotation(self.page, fitted));
        tracing::debug!(id = %created.id, page = self.page, "annotation created from draw");

        self.gesture = GestureState::Idle;
        self.annotation_mode = false;
        vec![Action::AnnotationCreated(created), Action::EditorClosed, Action::RenderNeeded]
    }

    /// Editor cancelled: drop the box without touching the store and leave
    /// annotation mode.
    pub fn cancel(&mut self) -> Vec<Action> {
        if !self.gesture.is_awaiting_input() && !self.gesture.is_drawing() {
            return Vec::new();
        }
        self.gesture = GestureState::Idle;
        self.annotation_mode = false;
        vec![Action::EditorClosed, Action::RenderNeeded]
    }

    // --- Move flow ---

    /// Press on an existing annotation: select it and start following the pointer.
    pub fn begin_move(&mut self, id: &AnnotationId, screen: Point) -> Vec<Action> {
        if self.annotation_mode || self.gesture.is_awaiting_input() {
            return Vec::new();
        }
        let Some(annotation) = self.store.get(id).cloned() else {
            return Vec::new();
        };

        let mut actions = self.abandon_gesture();
        let (pair, previous) = self.listeners.install();
        if let Some(previous) = previous {
            actions.push(Action::DetachListeners(previous));
        }

        self.selection.select(annotation.id);
        self.gesture = GestureState::Moving {
            id: annotation.id,
            drag: init_drag_state(screen, annotation.x, annotation.y),
            snapshot: Box::new(annotation),
        };

        actions.push(Action::SelectionChanged(Some(*id)));
        actions.push(Action::AttachListeners(pair));
        actions
    }

    /// Window-level pointer move delivered to listener `pair`.
    ///
    /// The moved box never leaves the page: the origin is clamped to
    /// `[0, page_bounds - size]`, or to non-negative values while the page
    /// has not been measured yet.
    pub fn move_to(&mut self, pair: ListenerPair, screen: Point) -> Vec<Action> {
        if !self.listeners.is_current(pair) {
            return Vec::new();
        }
        let GestureState::Moving { drag, snapshot, .. } = &self.gesture else {
            return Vec::new();
        };
        if !drag.is_dragging {
            return Vec::new();
        }

        let position = match self.drag_scale {
            DragScale::ScreenPixels => drag_delta(screen, drag),
            DragScale::DocumentSpace => drag_delta_scaled(screen, drag, self.zoom.level()),
        };
        let position = self.keep_on_page(position, Size::new(snapshot.width, snapshot.height));
        let moved = Annotation { x: position.x, y: position.y, ..(**snapshot).clone() };

        if self.store.update(moved.clone()) {
            vec![Action::AnnotationUpdated(moved), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Window-level pointer release delivered to listener `pair`.
    pub fn end_move(&mut self, pair: ListenerPair) -> Vec<Action> {
        if !self.listeners.is_current(pair) || !self.gesture.is_moving() {
            return Vec::new();
        }
        self.gesture = GestureState::Idle;
        self.listeners
            .teardown()
            .map(Action::DetachListeners)
            .into_iter()
            .collect()
    }

    // --- Selection / deletion ---

    /// Click on an annotation: toggle its selection.
    pub fn click_annotation(&mut self, id: &AnnotationId) -> Vec<Action> {
        self.selection.toggle(*id);
        vec![Action::SelectionChanged(self.selection.selected())]
    }

    /// Click anywhere in the document at `screen`; clears the selection
    /// unless it hits a rendered annotation on the current page.
    pub fn document_click(&mut self, screen: Point) -> Vec<Action> {
        let point = self.to_unclamped_document(screen);
        let rects: Vec<Rect> = self.store.list(self.page).iter().map(|a| a.rect()).collect();
        if self.selection.on_document_click(point, &rects) {
            vec![Action::SelectionChanged(None)]
        } else {
            Vec::new()
        }
    }

    /// Delete an annotation. Unknown ids are ignored.
    pub fn delete(&mut self, id: &AnnotationId) -> Vec<Action> {
        if !self.store.remove(id) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.gesture.moving_id() == Some(*id) {
            actions.extend(self.abandon_gesture());
        }
        let was_selected = self.selection.is_selected(id);
        self.selection.on_deleted(id);
        actions.push(Action::AnnotationDeleted { id: *id });
        if was_selected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Import / export ---

    /// Every annotation on every page as `annotations.json` text.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn export(&self) -> Result<String, TransferError> {
        transfer::export_json(self.store.all())
    }

    /// Parse `text` and add its valid rows as new annotations.
    ///
    /// Returns the report with the rows that were added and those rejected.
    ///
    /// # Errors
    ///
    /// Fails without touching the store when `text` is not a JSON array.
    pub fn import(&mut self, text: &str) -> Result<ImportReport, TransferError> {
        let report = transfer::parse_import(text)?;
        let added = transfer::import_into(&mut self.store, report.annotations.clone());
        tracing::info!(added = added.len(), rejected = report.errors.len(), "annotations imported");
        Ok(report)
    }

    // --- Queries ---

    /// Annotations on the current page.
    #[must_use]
    pub fn visible(&self) -> Vec<&Annotation> {
        self.store.list(self.page)
    }

    #[must_use]
    pub fn selected(&self) -> Option<AnnotationId> {
        self.selection.selected()
    }

    /// Box being drawn or awaiting input.
    #[must_use]
    pub fn draft_rect(&self) -> Option<Rect> {
        self.gesture.draft_rect()
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.gesture.drag_state()
    }

    /// Unscaled page size that fitted boxes must stay inside.
    #[must_use]
    pub fn page_bounds(&self) -> Size {
        let zoom = self.zoom.level();
        Size::new(self.frame.size.width / zoom, self.frame.size.height / zoom)
    }

    // --- Internals ---

    fn keep_on_page(&self, origin: Point, size: Size) -> Point {
        let bounds = self.page_bounds();
        if bounds.width > 0.0 && bounds.height > 0.0 {
            clamp_origin(origin, size, bounds)
        } else {
            Point::new(origin.x.max(0.0), origin.y.max(0.0))
        }
    }

    fn to_document(&self, screen: Point) -> Point {
        to_document_coordinates(screen, self.frame.origin, self.frame.size, self.zoom.level())
    }

    fn to_unclamped_document(&self, screen: Point) -> Point {
        let zoom = self.zoom.level();
        Point::new((screen.x - self.frame.origin.x) / zoom, (screen.y - self.frame.origin.y) / zoom)
    }

    /// Drop whatever gesture is live, detaching move listeners if needed.
    fn abandon_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => {}
            GestureState::Moving { .. } => {
                if let Some(pair) = self.listeners.teardown() {
                    actions.push(Action::DetachListeners(pair));
                }
            }
            GestureState::AwaitingInput { .. } => actions.push(Action::EditorClosed),
            GestureState::Drawing { .. } => actions.push(Action::RenderNeeded),
        }
        actions
    }
}
