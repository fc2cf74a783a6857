//! Manifest load lifecycle for the document being viewed.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use overlay::manifest::{DocumentData, ManifestCache, ManifestError, Page};
use overlay::nav::{PageResolution, Pagination, resolve_page};

/// Loaded (or failed) document plus the cache behind it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentState {
    /// True while a manifest request is in flight.
    pub loading: bool,
    /// Document to display; `None` until the first load finishes.
    pub document: Option<DocumentData>,
    cache: ManifestCache,
}

impl DocumentState {
    /// Whether a manifest fetch should start now.
    ///
    /// A cached document is shown immediately and no fetch is needed. Only
    /// one fetch runs at a time.
    pub fn begin_load(&mut self) -> bool {
        if let Some(cached) = self.cache.get() {
            self.document = Some(cached.clone());
            return false;
        }
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Record the outcome of a fetch started by [`begin_load`](Self::begin_load).
    pub fn finish_load(&mut self, loaded: Result<DocumentData, ManifestError>) {
        self.loading = false;
        self.document = Some(self.cache.resolve(loaded));
    }

    /// Document title, empty until loaded.
    pub fn title(&self) -> String {
        self.document.as_ref().map(|d| d.name.clone()).unwrap_or_default()
    }

    pub fn resolve(&self, requested: u32) -> PageResolution {
        match &self.document {
            Some(document) => resolve_page(requested, document),
            None => PageResolution::Pending,
        }
    }

    pub fn page(&self, number: u32) -> Option<Page> {
        self.document.as_ref().and_then(|d| d.page(number)).cloned()
    }

    pub fn pagination(&self, current: u32) -> Pagination {
        match &self.document {
            Some(document) => Pagination::new(current, document),
            None => Pagination { current, total: 0 },
        }
    }
}
