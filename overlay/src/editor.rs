//! Draft collected by the annotation editor before the annotation exists.
//!
//! The editor gathers text and an optional image. Reading the image file and
//! decoding it to learn its pixel size are asynchronous in the browser, so a
//! load is started with [`AnnotationDraft::begin_image_load`] and finished
//! with [`AnnotationDraft::attach_image`]. A completion that arrives after
//! the draft was reset, or after a newer load started, is dropped.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use crate::consts::MAX_PREVIEW_SIZE;
use crate::geometry::{Rect, Size, preview_scale};
use crate::store::NewAnnotation;

/// A decoded image ready to attach.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    /// Image source, usually a `data:` URL.
    pub url: String,
    pub original_width: f64,
    pub original_height: f64,
}

impl ImageAttachment {
    /// `original_width / original_height`, or `None` for a degenerate image.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        let ratio = self.original_width / self.original_height;
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }
}

/// What the editor hands back on save.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationPayload {
    pub text: String,
    pub image_url: Option<String>,
    pub aspect_ratio: Option<f64>,
    pub original_width: Option<f64>,
    pub original_height: Option<f64>,
}

impl AnnotationPayload {
    /// Combine with the fitted box on `page` into an annotation to store.
    #[must_use]
    pub fn into_annotation(self, page: u32, rect: Rect) -> NewAnnotation {
        NewAnnotation {
            page,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            text: self.text,
            image_url: self.image_url,
            aspect_ratio: self.aspect_ratio,
            original_width: self.original_width,
            original_height: self.original_height,
        }
    }
}

/// Identifies one image load; stale tokens are rejected by `attach_image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftToken(u64);

/// Editor contents for one annotation.
#[derive(Debug, Clone)]
pub struct AnnotationDraft {
    text: String,
    image: Option<ImageAttachment>,
    preview: Size,
    generation: u64,
}

impl Default for AnnotationDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            image: None,
            preview: Size::new(MAX_PREVIEW_SIZE, MAX_PREVIEW_SIZE),
            generation: 0,
        }
    }
}

impl AnnotationDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Size at which the attached image is previewed.
    #[must_use]
    pub fn preview(&self) -> Size {
        self.preview
    }

    /// Start loading an image. Any load already in flight becomes stale.
    pub fn begin_image_load(&mut self) -> DraftToken {
        self.generation += 1;
        DraftToken(self.generation)
    }

    /// Finish the load identified by `token`.
    ///
    /// Returns `false` and changes nothing when the token is stale.
    pub fn attach_image(&mut self, token: DraftToken, image: ImageAttachment) -> bool {
        if token.0 != self.generation {
            tracing::debug!("stale image load ignored");
            return false;
        }
        self.preview = preview_scale(image.original_width, image.original_height, MAX_PREVIEW_SIZE);
        self.image = Some(image);
        true
    }

    /// Detach the image and cancel any pending load.
    pub fn remove_image(&mut self) {
        self.generation += 1;
        self.image = None;
        self.preview = Size::new(MAX_PREVIEW_SIZE, MAX_PREVIEW_SIZE);
    }

    /// Clear text and image, invalidating pending loads.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self { generation, ..Self::default() };
    }

    /// Payload to submit.
    ///
    /// With an image attached the ratio falls back to `1` when it cannot be
    /// computed. Non-positive dimensions are left out, matching how an
    /// imported file treats `0`.
    #[must_use]
    pub fn payload(&self) -> AnnotationPayload {
        let mut payload = AnnotationPayload { text: self.text.clone(), ..AnnotationPayload::default() };
        if let Some(image) = &self.image {
            payload.image_url = Some(image.url.clone());
            payload.aspect_ratio = Some(image.aspect_ratio().unwrap_or(1.0));
            payload.original_width = positive(image.original_width);
            payload.original_height = positive(image.original_height);
        }
        payload
    }
}

fn positive(n: f64) -> Option<f64> {
    (n > 0.0).then_some(n)
}
