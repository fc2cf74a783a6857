//! Window-level pointer listeners for the move gesture.
//!
//! A move keeps following the pointer after it leaves the annotation, so
//! `pointermove`/`pointerup` are attached to `window`. The core decides when
//! a pair is attached or detached; this module only owns the closures.
//!
//! Detach can be requested from inside the `pointerup` closure itself, so
//! detached closures are parked and dropped on the next attach instead of
//! immediately.

use leptos::prelude::*;
use overlay::gesture::ListenerPair;

use crate::state::viewer::ViewerState;
use crate::util::overlay_bridge::CoreHandle;

#[cfg(feature = "hydrate")]
mod imp {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use leptos::prelude::*;
    use overlay::geometry::Point;
    use overlay::gesture::ListenerPair;
    use wasm_bindgen::{JsCast, closure::Closure};

    use crate::state::viewer::ViewerState;
    use crate::util::overlay_bridge::{CoreHandle, dispatch};

    type PointerClosure = Closure<dyn FnMut(web_sys::PointerEvent)>;

    struct Installed {
        on_move: PointerClosure,
        on_up: PointerClosure,
    }

    thread_local! {
        static INSTALLED: RefCell<HashMap<u64, Installed>> = RefCell::new(HashMap::new());
        static RETIRED: RefCell<Vec<Installed>> = const { RefCell::new(Vec::new()) };
    }

    fn client_point(ev: &web_sys::PointerEvent) -> Point {
        Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
    }

    pub fn attach(pair: ListenerPair, core: CoreHandle, view: RwSignal<ViewerState>) {
        RETIRED.with(|r| r.borrow_mut().clear());
        let Some(window) = web_sys::window() else {
            return;
        };

        let on_move = Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            ev.prevent_default();
            let screen = client_point(&ev);
            dispatch(core, view, |c| c.move_to(pair, screen));
        }) as Box<dyn FnMut(web_sys::PointerEvent)>);
        let on_up = Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            ev.prevent_default();
            dispatch(core, view, |c| c.end_move(pair));
        }) as Box<dyn FnMut(web_sys::PointerEvent)>);

        if window
            .add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref())
            .is_err()
            || window
                .add_event_listener_with_callback("pointerup", on_up.as_ref().unchecked_ref())
                .is_err()
        {
            log::warn!("failed to attach move listeners for pair {}", pair.generation());
        }
        INSTALLED.with(|m| m.borrow_mut().insert(pair.generation(), Installed { on_move, on_up }));
    }

    pub fn detach(pair: ListenerPair) {
        let Some(installed) = INSTALLED.with(|m| m.borrow_mut().remove(&pair.generation())) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            for (event, closure) in [("pointermove", &installed.on_move), ("pointerup", &installed.on_up)] {
                if let Err(err) = window.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
                    log::warn!("failed to detach {event} listener for pair {}: {err:?}", pair.generation());
                }
            }
        }
        RETIRED.with(|r| r.borrow_mut().push(installed));
    }
}

/// Attach window move/up listeners that feed `pair` into the core.
pub fn attach(pair: ListenerPair, core: CoreHandle, view: RwSignal<ViewerState>) {
    #[cfg(feature = "hydrate")]
    {
        imp::attach(pair, core, view);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (pair, core, view);
    }
}

/// Remove the listeners installed for `pair`, if any.
pub fn detach(pair: ListenerPair) {
    #[cfg(feature = "hydrate")]
    {
        imp::detach(pair);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = pair;
    }
}
