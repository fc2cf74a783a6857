//! Shared host state.
//!
//! DESIGN
//! ======
//! `HostState` is injected into Axum handlers via the `State` extractor.
//! It holds the resolved configuration and the manifest read at startup.
//! The manifest is only used for startup checks and `/healthz`; the viewer
//! always fetches `/pages/data.json` itself, so a missing or broken manifest
//! never stops the host from serving.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::path::Path;
use std::sync::Arc;

use overlay::manifest::{DocumentData, parse_manifest};

use crate::config::HostConfig;
use crate::error::HostError;

// =============================================================================
// MANIFEST
// =============================================================================

/// Read and parse the manifest at `path`.
///
/// # Errors
///
/// `ManifestRead` when the file cannot be read, `ManifestInvalid` when it
/// does not parse as a page manifest.
pub async fn load_manifest(path: &Path) -> Result<DocumentData, HostError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| HostError::ManifestRead { path: path.to_path_buf(), source })?;
    parse_manifest(&body).map_err(|source| HostError::ManifestInvalid { path: path.to_path_buf(), source })
}

/// Page image URLs under `/pages/` whose file is absent from `pages_dir`.
///
/// URLs pointing anywhere else are assumed to be hosted elsewhere.
pub async fn missing_images(document: &DocumentData, pages_dir: &Path) -> Vec<String> {
    let mut missing = Vec::new();
    for page in &document.pages {
        let Some(relative) = page.image_url.strip_prefix("/pages/") else {
            continue;
        };
        let exists = tokio::fs::try_exists(pages_dir.join(relative)).await.unwrap_or(false);
        if !exists {
            missing.push(page.image_url.clone());
        }
    }
    missing
}

// =============================================================================
// HOST STATE
// =============================================================================

#[derive(Clone)]
pub struct HostState {
    pub config: Arc<HostConfig>,
    /// Manifest read at startup, `None` when it was unavailable.
    pub document: Option<Arc<DocumentData>>,
}

impl HostState {
    #[must_use]
    pub fn new(config: HostConfig, document: Option<DocumentData>) -> Self {
        Self { config: Arc::new(config), document: document.map(Arc::new) }
    }
}
