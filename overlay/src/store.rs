//! Annotation model and the in-memory annotation store.
//!
//! DESIGN
//! ======
//! `AnnotationStore` is the single owner of every annotation. Queries borrow
//! through `list`/`all`; views that render a page register an observer with
//! `subscribe` and receive the page's fresh list after each mutation.
//! Observers live in an explicit page registry: an entry appears with the
//! first subscriber of a page and is dropped with the last one.
//!
//! Mutations never fail loudly. `update` and `remove` on an unknown id report
//! `false` so stale callbacks (a move event arriving after a delete) can be
//! ignored by the caller.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rect;

/// Unique identifier for an annotation, assigned by the store.
pub type AnnotationId = Uuid;

/// A positioned text/image note bound to one document page.
///
/// Coordinates are document space (unscaled by zoom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    /// One-based page number.
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    /// Attached image, usually a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// `original_width / original_height` of the attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_height: Option<f64>,
}

impl Annotation {
    /// Attach `id` to an annotation that does not have one yet.
    #[must_use]
    pub fn from_new(id: AnnotationId, new: NewAnnotation) -> Self {
        Self {
            id,
            page: new.page,
            x: new.x,
            y: new.y,
            width: new.width,
            height: new.height,
            text: new.text,
            image_url: new.image_url,
            aspect_ratio: new.aspect_ratio,
            original_width: new.original_width,
            original_height: new.original_height,
        }
    }

    /// The annotation's box in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Every field except the id.
    #[must_use]
    pub fn to_new(&self) -> NewAnnotation {
        NewAnnotation {
            page: self.page,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            text: self.text.clone(),
            image_url: self.image_url.clone(),
            aspect_ratio: self.aspect_ratio,
            original_width: self.original_width,
            original_height: self.original_height,
        }
    }
}

/// An annotation before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnotation {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_height: Option<f64>,
}

/// Handle returned by [`AnnotationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    page: u32,
    id: u64,
}

impl Subscription {
    /// Page this subscription observes.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Observer callback: receives the page number and that page's annotations.
pub type PageObserver = Box<dyn FnMut(u32, &[Annotation])>;

/// In-memory store of annotations keyed by id.
#[derive(Default)]
pub struct AnnotationStore {
    annotations: HashMap<AnnotationId, Annotation>,
    order: Vec<AnnotationId>,
    observers: HashMap<u32, Vec<(u64, PageObserver)>>,
    next_subscription: u64,
}

impl fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationStore")
            .field("len", &self.annotations.len())
            .field("observed_pages", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl AnnotationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    /// Annotations on `page`, in insertion order.
    #[must_use]
    pub fn list(&self, page: u32) -> Vec<&Annotation> {
        self.iter().filter(|a| a.page == page).collect()
    }

    /// Every annotation on every page, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<&Annotation> {
        self.iter().collect()
    }

    /// Look up an annotation by id.
    #[must_use]
    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    /// Number of annotations currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if the store contains no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.order.iter().filter_map(|id| self.annotations.get(id))
    }

    // --- Mutations ---

    /// Insert `new` under a freshly generated id and return the stored value.
    pub fn add(&mut self, new: NewAnnotation) -> Annotation {
        let mut id = Uuid::new_v4();
        while self.annotations.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let annotation = Annotation::from_new(id, new);
        tracing::debug!(%id, page = annotation.page, "annotation added");

        let page = annotation.page;
        self.order.push(id);
        self.annotations.insert(id, annotation.clone());
        self.notify(&[page]);
        annotation
    }

    /// Replace the stored annotation with the same id.
    ///
    /// Returns `false` and leaves the store untouched when the id is unknown.
    pub fn update(&mut self, annotation: Annotation) -> bool {
        let Some(slot) = self.annotations.get_mut(&annotation.id) else {
            tracing::warn!(id = %annotation.id, "update ignored: annotation not found");
            return false;
        };
        let old_page = slot.page;
        let new_page = annotation.page;
        *slot = annotation;
        if old_page == new_page {
            self.notify(&[new_page]);
        } else {
            self.notify(&[old_page, new_page]);
        }
        true
    }

    /// Delete the annotation with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &AnnotationId) -> bool {
        let Some(removed) = self.annotations.remove(id) else {
            return false;
        };
        self.order.retain(|other| other != id);
        tracing::debug!(%id, page = removed.page, "annotation removed");
        self.notify(&[removed.page]);
        true
    }

    // --- Observers ---

    /// Register `observer` for changes to `page`.
    ///
    /// The observer is not called on registration; read the current state
    /// with [`list`](Self::list).
    pub fn subscribe(&mut self, page: u32, observer: PageObserver) -> Subscription {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.observers.entry(page).or_default().push((id, observer));
        Subscription { page, id }
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let Some(list) = self.observers.get_mut(&subscription.page) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription.id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.observers.remove(&subscription.page);
        }
        removed
    }

    /// Number of pages with at least one observer.
    #[must_use]
    pub fn observed_pages(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, pages: &[u32]) {
        for &page in pages {
            if !self.observers.contains_key(&page) {
                continue;
            }
            let snapshot: Vec<Annotation> = self
                .order
                .iter()
                .filter_map(|id| self.annotations.get(id))
                .filter(|a| a.page == page)
                .cloned()
                .collect();
            if let Some(list) = self.observers.get_mut(&page) {
                for (_, observer) in list.iter_mut() {
                    observer(page, &snapshot);
                }
            }
        }
    }
}
