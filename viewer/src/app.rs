//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use overlay::nav::page_path;

use crate::pages::document::DocumentPage;
use crate::state::document::DocumentState;
use crate::state::viewer::ViewerState;
use crate::util::overlay_bridge::provide_core;

/// Root application component.
///
/// Provides the shared document/view state and the overlay core, then
/// routes `/page/:pageId` to the viewer. Every other path lands on page 1.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let document = RwSignal::new(DocumentState::default());
    let view = RwSignal::new(ViewerState::default());
    provide_context(document);
    provide_context(view);
    provide_core();

    let first_page = page_path(1);
    let fallback_path = first_page.clone();

    view! {
        <Title text=move || document.get().title()/>

        <Router>
            <Routes fallback=move || view! { <Redirect path=fallback_path.clone()/> }>
                <Route path=StaticSegment("") view=move || view! { <Redirect path=first_page.clone()/> }/>
                <Route path=(StaticSegment("page"), ParamSegment("pageId")) view=DocumentPage/>
            </Routes>
        </Router>
    }
}
