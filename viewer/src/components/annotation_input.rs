//! Editor shown under a freshly drawn box: text, optional image, save/cancel.
//!
//! Images come from the file picker or the clipboard and are read as data
//! URLs so they survive export. Each load carries a draft token; a load
//! that finishes after the image was removed, replaced or the editor closed
//! is dropped.

use leptos::prelude::*;

use overlay::editor::AnnotationDraft;
use overlay::engine::OverlayCore;

use crate::state::viewer::ViewerState;
use crate::util::layout::{editor_style, preview_style};
use crate::util::overlay_bridge::{dispatch, use_core};

#[cfg(feature = "hydrate")]
fn start_image_load(draft: RwSignal<AnnotationDraft>, file: web_sys::File) {
    let Some(token) = draft.try_update(AnnotationDraft::begin_image_load) else {
        return;
    };
    leptos::task::spawn_local(async move {
        match crate::util::file_io::load_image(&file).await {
            Ok(image) => {
                if draft.try_update(|d| d.attach_image(token, image)) != Some(true) {
                    log::debug!("discarded image that finished loading after the draft changed");
                }
            }
            Err(err) => log::warn!("image load failed: {err}"),
        }
    });
}

#[component]
pub fn AnnotationInput() -> impl IntoView {
    let view = expect_context::<RwSignal<ViewerState>>();
    let core = use_core();
    let draft = RwSignal::new(AnnotationDraft::new());
    let text_ref = NodeRef::<leptos::html::Input>::new();
    let file_ref = NodeRef::<leptos::html::Input>::new();

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if let Some(input) = text_ref.get() {
            if let Err(err) = input.focus() {
                log::debug!("annotation text focus failed: {err:?}");
            }
        }
    });

    let on_save = move |_| {
        let payload = draft.with_untracked(AnnotationDraft::payload);
        dispatch(core, view, |c| c.submit(payload));
        draft.update(AnnotationDraft::reset);
    };

    let on_cancel = move |_| {
        dispatch(core, view, OverlayCore::cancel);
        draft.update(AnnotationDraft::reset);
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            dispatch(core, view, OverlayCore::cancel);
        }
    };

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input: web_sys::HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                start_image_load(draft, file);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_paste = move |ev: leptos::ev::ClipboardEvent| {
        #[cfg(feature = "hydrate")]
        {
            let Some(files) = ev.clipboard_data().and_then(|data| data.files()) else {
                return;
            };
            let image = (0..files.length())
                .filter_map(|i| files.get(i))
                .find(|file| crate::util::file_io::is_image_type(&file.type_()));
            if let Some(file) = image {
                ev.prevent_default();
                start_image_load(draft, file);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_remove_image = move |_| {
        draft.update(AnnotationDraft::remove_image);
        if let Some(input) = file_ref.get_untracked() {
            input.set_value("");
        }
    };

    let placement = move || view.with(|v| v.draft.map(|rect| editor_style(&rect)).unwrap_or_default());

    view! {
        <div
            class="annotation-input"
            style=placement
            on:pointerdown=|ev: leptos::ev::PointerEvent| ev.stop_propagation()
            on:paste=on_paste
            on:keydown=on_keydown
        >
            <input
                class="annotation-input__text"
                type="text"
                placeholder="Annotation text"
                node_ref=text_ref
                prop:value=move || draft.with(|d| d.text().to_owned())
                on:input=move |ev| draft.update(|d| d.set_text(event_target_value(&ev)))
            />
            <input
                class="annotation-input__file"
                type="file"
                accept="image/*"
                node_ref=file_ref
                on:change=on_file
            />
            {move || {
                draft.with(|d| d.image().map(|image| (image.url.clone(), d.preview())))
                    .map(|(url, size)| {
                        view! {
                            <div class="annotation-input__preview">
                                <img src=url style=preview_style(size) alt=""/>
                                <button class="btn" on:click=on_remove_image>"Remove image"</button>
                            </div>
                        }
                    })
            }}
            <div class="annotation-input__actions">
                <button class="btn btn--primary" on:click=on_save>"Save"</button>
                <button class="btn" on:click=on_cancel>"Cancel"</button>
            </div>
        </div>
    }
}
