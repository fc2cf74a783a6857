//! Page surface: the scaled page image, the draw gesture and the overlay.
//!
//! ARCHITECTURE
//! ============
//! Pointer events on the page wrapper drive the draw flow of the overlay
//! core. The wrapper's bounding rect is pushed into the core before each
//! event so screen points convert against the current layout and zoom.

use leptos::prelude::*;

use crate::components::annotation_input::AnnotationInput;
use crate::components::annotations_layer::AnnotationsLayer;
use crate::state::viewer::ViewerState;
use crate::util::layout::{box_style, page_style};
#[cfg(feature = "hydrate")]
use crate::util::overlay_bridge::{dispatch, sync_frame};
use crate::util::overlay_bridge::{PageSurface, use_core};

#[cfg(feature = "hydrate")]
use overlay::engine::OverlayCore;
#[cfg(feature = "hydrate")]
use overlay::geometry::Point;

#[cfg(feature = "hydrate")]
fn client_point(ev: &leptos::ev::MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

#[component]
pub fn DocumentContent(#[prop(into)] image_url: Signal<String>) -> impl IntoView {
    let view = expect_context::<RwSignal<ViewerState>>();
    let core = use_core();
    let page_ref = NodeRef::<leptos::html::Div>::new();
    let surface = PageSurface(page_ref);
    provide_context(surface);

    // Clicks anywhere outside a rendered annotation clear the selection.
    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::click, move |ev| {
            if view.with_untracked(|v| v.selected.is_none()) {
                return;
            }
            sync_frame(core, surface);
            let screen = client_point(&ev);
            dispatch(core, view, |c| c.document_click(screen));
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = core;
    }

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                if ev.button() != 0 || !view.with_untracked(|v| v.annotation_mode) {
                    return;
                }
                ev.prevent_default();
                sync_frame(core, surface);
                let screen = client_point(&ev);
                dispatch(core, view, |c| c.on_pointer_down(screen));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                if !core.with_value(|c| c.gesture.is_drawing()) {
                    return;
                }
                sync_frame(core, surface);
                let screen = client_point(&ev);
                dispatch(core, view, |c| c.on_pointer_move(screen));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            move |_ev: leptos::ev::PointerEvent| {
                if !core.with_value(|c| c.gesture.is_drawing()) {
                    return;
                }
                sync_frame(core, surface);
                dispatch(core, view, OverlayCore::on_pointer_up);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    view! {
        <div class="document-content">
            <div
                class="document-content__page"
                class:document-content__page--drawing=move || view.with(|v| v.annotation_mode)
                style=move || view.with(|v| page_style(v.zoom))
                node_ref=page_ref
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
            >
                <img class="document-content__image" src=move || image_url.get() alt="" draggable="false"/>
                <AnnotationsLayer/>
                {move || {
                    view.with(|v| v.draft)
                        .map(|rect| view! { <div class="document-content__draft" style=box_style(&rect)></div> })
                }}
                <Show when=move || view.with(|v| v.editor_open)>
                    <AnnotationInput/>
                </Show>
            </div>
        </div>
    }
}
