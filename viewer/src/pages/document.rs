//! Document page: the `/page/:pageId` route.
//!
//! ARCHITECTURE
//! ============
//! Owns the manifest load and the route-to-page resolution. A page number
//! the manifest does not know redirects to the first page; a known one is
//! pushed into the overlay core, which clears selection and any gesture.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use overlay::nav::{PageResolution, page_path, parse_page_param};

use crate::components::document_content::DocumentContent;
use crate::components::document_header::DocumentHeader;
use crate::components::document_pagination::DocumentPagination;
use crate::state::document::DocumentState;
use crate::state::viewer::ViewerState;
use crate::util::overlay_bridge::{dispatch, use_core};

#[component]
pub fn DocumentPage() -> impl IntoView {
    let document = expect_context::<RwSignal<DocumentState>>();
    let view = expect_context::<RwSignal<ViewerState>>();
    let core = use_core();
    let params = use_params_map();
    let navigate = use_navigate();

    let requested = Memo::new(move |_| parse_page_param(params.read().get("pageId").as_deref()));

    // Fetch the manifest once; later mounts reuse the cached document.
    Effect::new(move || {
        let start = document.try_update(DocumentState::begin_load).unwrap_or(false);
        if !start {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let loaded = crate::net::manifest::fetch_document().await;
                if let Err(err) = &loaded {
                    log::error!("{err}");
                }
                document.update(|d| d.finish_load(loaded));
            });
        }
    });

    Effect::new(move || {
        let requested = requested.get();
        match document.with(|d| d.resolve(requested)) {
            PageResolution::Pending => {}
            PageResolution::Show(number) => {
                dispatch(core, view, |c| c.set_page(number));
            }
            PageResolution::Redirect(first) => {
                navigate(&page_path(first), NavigateOptions::default());
            }
        }
    });

    let current_page = move || document.with(|d| d.page(view.with(|v| v.page)));

    view! {
        <div class="document-viewer">
            <DocumentHeader/>
            <main class="document-viewer__body">
                <Show
                    when=move || current_page().is_some()
                    fallback=|| view! { <div class="document-viewer__empty"></div> }
                >
                    <DocumentContent image_url=Signal::derive(move || {
                        current_page().map(|p| p.image_url).unwrap_or_default()
                    })/>
                </Show>
            </main>
            <DocumentPagination/>
        </div>
    }
}
