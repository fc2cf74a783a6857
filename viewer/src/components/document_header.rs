//! Header bar: document title, page jump, zoom, and annotation controls.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use overlay::engine::OverlayCore;
use overlay::nav::{Zoom, page_path};

use crate::state::document::DocumentState;
use crate::state::viewer::{Notice, ViewerState};
use crate::util::overlay_bridge::{dispatch, sync_view, use_core};

#[component]
pub fn DocumentHeader() -> impl IntoView {
    let document = expect_context::<RwSignal<DocumentState>>();
    let view = expect_context::<RwSignal<ViewerState>>();
    let core = use_core();
    let navigate = use_navigate();

    let pagination = move || document.with(|d| d.pagination(view.with(|v| v.page)));

    let go = {
        let navigate = navigate.clone();
        move |target: Option<u32>| {
            if let Some(n) = target {
                navigate(&page_path(n), NavigateOptions::default());
            }
        }
    };
    let go_previous = go.clone();
    let go_next = go.clone();

    let set_zoom = move |step: fn(Zoom) -> Zoom| {
        core.update_value(|c| c.set_zoom(step(c.zoom)));
        sync_view(core, view);
    };

    let on_save = move |_| {
        let exported = core.with_value(OverlayCore::export);
        match exported {
            Ok(json) => {
                #[cfg(feature = "hydrate")]
                {
                    use overlay::consts::{EXPORT_FILE_NAME, EXPORT_MIME};
                    if let Err(err) = crate::util::file_io::download_text(EXPORT_FILE_NAME, EXPORT_MIME, &json) {
                        log::error!("annotation download failed: {err}");
                        view.update(|v| v.notice = Some(Notice::ExportFailed(err)));
                    }
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = json;
                }
            }
            Err(err) => view.update(|v| v.notice = Some(Notice::ExportFailed(err.to_string()))),
        }
    };

    let on_load = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input: web_sys::HtmlInputElement = event_target(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            leptos::task::spawn_local(async move {
                let notice = match crate::util::file_io::read_text(&file).await {
                    Ok(text) => {
                        let mut outcome = None;
                        core.update_value(|c| outcome = Some(c.import(&text)));
                        match outcome {
                            Some(Ok(report)) => {
                                log::info!("annotations loaded: {} added, {} rejected", report.annotations.len(), report.errors.len());
                                Notice::Imported { added: report.annotations.len(), rejected: report.errors.len() }
                            }
                            Some(Err(err)) => Notice::ImportFailed(err.to_string()),
                            None => Notice::ImportFailed("overlay unavailable".to_owned()),
                        }
                    }
                    Err(err) => Notice::ImportFailed(err),
                };
                if notice.is_error() {
                    log::error!("{}", notice.message());
                }
                view.update(|v| v.notice = Some(notice));
                sync_view(core, view);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    view! {
        <header class="document-header">
            <h1 class="document-header__title">{move || document.with(DocumentState::title)}</h1>

            <div class="document-header__pages">
                <button
                    class="btn"
                    disabled=move || !pagination().can_go_previous()
                    on:click=move |_| go_previous(pagination().previous())
                >
                    "‹"
                </button>
                <input
                    class="document-header__page-input"
                    type="number"
                    min="1"
                    prop:value=move || view.with(|v| v.page.to_string())
                    on:change=move |ev| go(pagination().go_to(&event_target_value(&ev)))
                />
                <span class="document-header__total">{move || format!("/ {}", pagination().total)}</span>
                <button
                    class="btn"
                    disabled=move || !pagination().can_go_next()
                    on:click=move |_| go_next(pagination().next())
                >
                    "›"
                </button>
            </div>

            <div class="document-header__zoom">
                <button class="btn" title="Zoom out" on:click=move |_| set_zoom(Zoom::zoom_out)>
                    "−"
                </button>
                <button class="btn" title="Reset zoom" on:click=move |_| set_zoom(Zoom::reset)>
                    {move || view.with(|v| v.zoom.label())}
                </button>
                <button class="btn" title="Zoom in" on:click=move |_| set_zoom(Zoom::zoom_in)>
                    "+"
                </button>
            </div>

            <div class="document-header__annotations">
                <button
                    class="btn"
                    class:btn--active=move || view.with(|v| v.annotation_mode)
                    on:click=move |_| {
                        dispatch(core, view, |c| c.set_annotation_mode(true));
                    }
                >
                    "Create annotation"
                </button>
                <button class="btn" on:click=on_save>
                    "Save annotations"
                </button>
                <label class="btn document-header__load">
                    "Load annotations"
                    <input type="file" accept=".json,application/json" hidden=true on:change=on_load/>
                </label>
            </div>

            {move || {
                view.with(|v| v.notice.clone())
                    .map(|notice| {
                        view! {
                            <span
                                class="document-header__notice"
                                class:document-header__notice--error=notice.is_error()
                            >
                                {notice.message()}
                            </span>
                        }
                    })
            }}
        </header>
    }
}
