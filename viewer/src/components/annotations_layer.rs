//! Annotation boxes for the current page: selection, move and delete.
//!
//! Each box re-reads its annotation from `ViewerState` by id, so a move
//! updates position in place without rebuilding the list.

use leptos::prelude::*;

use overlay::store::AnnotationId;

use crate::state::viewer::ViewerState;
use crate::util::layout::box_style;
#[cfg(feature = "hydrate")]
use crate::util::overlay_bridge::{PageSurface, sync_frame};
use crate::util::overlay_bridge::{dispatch, use_core};

#[component]
pub fn AnnotationsLayer() -> impl IntoView {
    let view = expect_context::<RwSignal<ViewerState>>();
    let ids = move || view.with(|v| v.annotations.iter().map(|a| a.id).collect::<Vec<_>>());

    view! {
        <div class="annotations-layer">
            <For each=ids key=|id| *id let:id>
                <AnnotationBox id/>
            </For>
        </div>
    }
}

#[component]
fn AnnotationBox(id: AnnotationId) -> impl IntoView {
    let view = expect_context::<RwSignal<ViewerState>>();
    let core = use_core();

    let annotation = move || view.with(|v| v.annotation(&id).cloned());
    let selected = move || view.with(|v| v.is_selected(&id));
    let dragging = move || view.with(|v| v.dragging == Some(id));

    let on_move_start = {
        #[cfg(feature = "hydrate")]
        {
            let surface = use_context::<PageSurface>();
            move |ev: leptos::ev::PointerEvent| {
                if ev.button() != 0 {
                    return;
                }
                ev.prevent_default();
                ev.stop_propagation();
                if let Some(surface) = surface {
                    sync_frame(core, surface);
                }
                let screen = overlay::geometry::Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
                dispatch(core, view, |c| c.begin_move(&id, screen));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_click = move |_| {
        if view.with_untracked(|v| v.annotation_mode) {
            return;
        }
        dispatch(core, view, |c| c.click_annotation(&id));
    };

    let on_delete = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        dispatch(core, view, |c| c.delete(&id));
    };

    move || {
        annotation().map(|a| {
            let image = a.image_url.clone().map(|url| {
                view! { <img class="annotation__image" src=url alt="" draggable="false"/> }
            });
            let text = (!a.text.is_empty()).then(|| view! { <p class="annotation__text">{a.text.clone()}</p> });
            view! {
                <div
                    class="annotation"
                    class:annotation--selected=selected
                    class:annotation--dragging=dragging
                    style=box_style(&a.rect())
                    on:click=on_click
                >
                    <div
                        class="annotation__handle"
                        title="Move"
                        on:pointerdown=on_move_start
                        on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                    ></div>
                    {image}
                    {text}
                    <Show when=selected>
                        <button class="annotation__delete" title="Delete annotation" on:click=on_delete>
                            "×"
                        </button>
                    </Show>
                </div>
            }
        })
    }
}
