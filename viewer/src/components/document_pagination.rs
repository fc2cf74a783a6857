//! Footer pagination: previous/next and the page position.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use overlay::nav::page_path;

use crate::state::document::DocumentState;
use crate::state::viewer::ViewerState;

#[component]
pub fn DocumentPagination() -> impl IntoView {
    let document = expect_context::<RwSignal<DocumentState>>();
    let view = expect_context::<RwSignal<ViewerState>>();
    let navigate = use_navigate();

    let pagination = move || document.with(|d| d.pagination(view.with(|v| v.page)));
    let go_previous = {
        let navigate = navigate.clone();
        move |_| {
            if let Some(n) = pagination().previous() {
                navigate(&page_path(n), NavigateOptions::default());
            }
        }
    };
    let go_next = move |_| {
        if let Some(n) = pagination().next() {
            navigate(&page_path(n), NavigateOptions::default());
        }
    };

    view! {
        <nav class="document-pagination">
            <button class="btn" disabled=move || !pagination().can_go_previous() on:click=go_previous>
                "Previous"
            </button>
            <span class="document-pagination__position">
                {move || {
                    let p = pagination();
                    format!("Page {} of {}", p.current, p.total)
                }}
            </span>
            <button class="btn" disabled=move || !pagination().can_go_next() on:click=go_next>
                "Next"
            </button>
        </nav>
    }
}
