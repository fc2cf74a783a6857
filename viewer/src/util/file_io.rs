//! Browser file plumbing: annotation file download/upload and image decode.
//!
//! Client-side (hydrate): Blob/object-URL download, `File::text`, and
//! `FileReader` + `HtmlImageElement` for pasted or picked images.
//! Errors come back as strings for the header notice; nothing here panics.

#[cfg(test)]
#[path = "file_io_test.rs"]
mod file_io_test;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use overlay::editor::ImageAttachment;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
#[cfg(feature = "hydrate")]
use wasm_bindgen_futures::JsFuture;

/// Whether a MIME type names an image (clipboard items and file inputs).
pub fn is_image_type(mime: &str) -> bool {
    mime.contains("image")
}

#[cfg(feature = "hydrate")]
fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Offer `text` to the user as a file download named `file_name`.
///
/// # Errors
///
/// Returns the browser's message if the blob, URL or anchor cannot be made.
#[cfg(feature = "hydrate")]
pub fn download_text(file_name: &str, mime: &str, text: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "created element is not an anchor".to_owned())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_error)
}

/// Read a picked file as UTF-8 text.
///
/// # Errors
///
/// Returns the browser's message if the read fails.
#[cfg(feature = "hydrate")]
pub async fn read_text(file: &web_sys::File) -> Result<String, String> {
    let value = JsFuture::from(file.text()).await.map_err(js_error)?;
    value.as_string().ok_or_else(|| "file content is not text".to_owned())
}

/// Read an image file and decode it to learn its natural size.
///
/// # Errors
///
/// Returns a message if the file cannot be read or is not a decodable image.
#[cfg(feature = "hydrate")]
pub async fn load_image(file: &web_sys::File) -> Result<ImageAttachment, String> {
    let url = read_data_url(file).await?;
    let (original_width, original_height) = decode_image(&url).await?;
    Ok(ImageAttachment { url, original_width, original_height })
}

#[cfg(feature = "hydrate")]
type Reply<T> = Rc<RefCell<Option<futures::channel::oneshot::Sender<Result<T, String>>>>>;

#[cfg(feature = "hydrate")]
fn reply<T>(slot: &Reply<T>, value: Result<T, String>) {
    if let Some(tx) = slot.borrow_mut().take() {
        if tx.send(value).is_err() {
            log::debug!("image load finished after its reader was dropped");
        }
    }
}

#[cfg(feature = "hydrate")]
async fn read_data_url(file: &web_sys::File) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(js_error)?;
    let (tx, rx) = futures::channel::oneshot::channel();
    let slot: Reply<String> = Rc::new(RefCell::new(Some(tx)));

    let reader_done = reader.clone();
    let slot_load = Rc::clone(&slot);
    let on_load = Closure::<dyn FnMut()>::new(move || {
        let result = reader_done
            .result()
            .map_err(js_error)
            .and_then(|v| v.as_string().ok_or_else(|| "file is not readable as a data URL".to_owned()));
        reply(&slot_load, result);
    });
    let slot_error = Rc::clone(&slot);
    let on_error = Closure::<dyn FnMut()>::new(move || reply(&slot_error, Err("file read failed".to_owned())));

    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    reader.read_as_data_url(file).map_err(js_error)?;

    let result = rx.await.map_err(|_| "file read abandoned".to_owned())?;
    reader.set_onload(None);
    reader.set_onerror(None);
    result
}

#[cfg(feature = "hydrate")]
async fn decode_image(url: &str) -> Result<(f64, f64), String> {
    let image = web_sys::HtmlImageElement::new().map_err(js_error)?;
    let (tx, rx) = futures::channel::oneshot::channel();
    let slot: Reply<(f64, f64)> = Rc::new(RefCell::new(Some(tx)));

    let image_done = image.clone();
    let slot_load = Rc::clone(&slot);
    let on_load = Closure::<dyn FnMut()>::new(move || {
        let size = (f64::from(image_done.natural_width()), f64::from(image_done.natural_height()));
        reply(&slot_load, Ok(size));
    });
    let slot_error = Rc::clone(&slot);
    let on_error = Closure::<dyn FnMut()>::new(move || reply(&slot_error, Err("image could not be decoded".to_owned())));

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(url);

    let result = rx.await.map_err(|_| "image decode abandoned".to_owned())?;
    image.set_onload(None);
    image.set_onerror(None);
    result
}
