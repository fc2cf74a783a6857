//! Bridge between Leptos state and the DOM-free `overlay::engine::OverlayCore`.
//!
//! ARCHITECTURE
//! ============
//! The core lives in a thread-local `StoredValue` (it owns observer
//! closures, so it is neither `Send` nor `Clone`). Components feed it
//! events through [`dispatch`], which applies host-side actions (window
//! listeners) and then refreshes the `ViewerState` signal they render from.
//! The annotation list is not copied here: it arrives through a store
//! subscription on the current page, re-registered whenever the page changes.

use leptos::prelude::*;
use overlay::engine::{Action, OverlayCore};
use overlay::store::{Annotation, PageObserver};

use crate::state::viewer::ViewerState;
use crate::util::window_listeners;

/// Page wrapper element the overlay is positioned against, provided by
/// `DocumentContent` for its descendants.
#[derive(Clone, Copy)]
pub struct PageSurface(pub NodeRef<leptos::html::Div>);

/// Shared handle to the overlay core.
pub type CoreHandle = StoredValue<OverlayCore, LocalStorage>;

/// Create the core and provide it as context.
pub fn provide_core() {
    provide_context::<CoreHandle>(StoredValue::new_local(OverlayCore::new()));
}

/// Core provided by [`provide_core`].
pub fn use_core() -> CoreHandle {
    expect_context::<CoreHandle>()
}

/// Run `event` against the core and publish its effects.
pub fn dispatch(
    core: CoreHandle,
    view: RwSignal<ViewerState>,
    event: impl FnOnce(&mut OverlayCore) -> Vec<Action>,
) -> Vec<Action> {
    let mut actions = Vec::new();
    core.update_value(|c| actions = event(c));

    for action in &actions {
        match action {
            Action::AttachListeners(pair) => window_listeners::attach(*pair, core, view),
            Action::DetachListeners(pair) => window_listeners::detach(*pair),
            _ => {}
        }
    }

    view.update(|v| {
        v.apply(&actions);
        core.with_value(|c| v.sync(c));
    });
    watch_page(core, view);
    actions
}

/// Keep `view.annotations` subscribed to the core's current page.
pub fn watch_page(core: CoreHandle, view: RwSignal<ViewerState>) {
    if core.with_value(|c| c.watched_page() == Some(c.page)) {
        return;
    }
    let observer: PageObserver = Box::new(move |_page, list: &[Annotation]| {
        view.update(|v| v.set_annotations(list));
    });
    let mut current = Vec::new();
    core.update_value(|c| current = c.watch_current_page(observer));
    view.update(|v| v.annotations = current);
}

/// Refresh the view after a core mutation that produced no actions.
pub fn sync_view(core: CoreHandle, view: RwSignal<ViewerState>) {
    view.update(|v| core.with_value(|c| v.sync(c)));
}

/// Push the page wrapper's current screen rect into the core.
#[cfg(feature = "hydrate")]
pub fn sync_frame(core: CoreHandle, surface: PageSurface) {
    use overlay::engine::PageFrame;
    use overlay::geometry::{Point, Size};

    let Some(el) = surface.0.get_untracked() else {
        return;
    };
    let rect = el.get_bounding_client_rect();
    let frame = PageFrame {
        origin: Point::new(rect.left(), rect.top()),
        size: Size::new(rect.width(), rect.height()),
    };
    core.update_value(|c| c.set_page_bounds(frame));
}
