//! Page manifest: the document name and its page images.
//!
//! The manifest is read-only input fetched once from
//! [`MANIFEST_URL`](crate::consts::MANIFEST_URL). Any failure to fetch or
//! parse it degrades to [`DocumentData::error_placeholder`], which has no
//! pages, so the viewer shows nothing rather than crashing.

#[cfg(test)]
#[path = "manifest_test.rs"]
mod manifest_test;

use serde::{Deserialize, Serialize};

use crate::consts::ERROR_DOCUMENT_NAME;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest fetch failed: {0}")]
    Fetch(String),
    #[error("manifest is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One page image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// One-based page number used in routes and annotations.
    pub number: u32,
    pub image_url: String,
}

/// Document name and its pages, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentData {
    pub name: String,
    pub pages: Vec<Page>,
}

impl DocumentData {
    /// Stand-in document used after a failed load.
    #[must_use]
    pub fn error_placeholder() -> Self {
        Self { name: ERROR_DOCUMENT_NAME.to_owned(), pages: Vec::new() }
    }

    /// Page with the given number.
    #[must_use]
    pub fn page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// First page in manifest order.
    #[must_use]
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }
}

/// Parse a manifest body.
///
/// # Errors
///
/// Returns `Parse` if the body is not a valid manifest.
pub fn parse_manifest(body: &str) -> Result<DocumentData, ManifestError> {
    Ok(serde_json::from_str(body)?)
}

/// Keeps the first successfully loaded manifest.
///
/// Failed loads are not cached, so the next request tries again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestCache {
    document: Option<DocumentData>,
}

impl ManifestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached document, if a load has succeeded.
    #[must_use]
    pub fn get(&self) -> Option<&DocumentData> {
        self.document.as_ref()
    }

    /// Record a load outcome and return the document to display.
    ///
    /// Success is cached; failure is logged and yields the placeholder.
    pub fn resolve(&mut self, loaded: Result<DocumentData, ManifestError>) -> DocumentData {
        match loaded {
            Ok(document) => {
                tracing::debug!(pages = document.total_pages(), "manifest loaded");
                self.document = Some(document.clone());
                document
            }
            Err(err) => {
                tracing::error!(%err, "manifest load failed");
                DocumentData::error_placeholder()
            }
        }
    }
}
