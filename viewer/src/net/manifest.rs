//! Manifest fetch via `gloo-net`.
//!
//! Client-side (hydrate): a real `GET` of [`MANIFEST_URL`].
//! Native builds: an error, since there is no host to talk to. Either way
//! the caller hands the result to `DocumentState::finish_load`, which
//! degrades failures to the placeholder document.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "manifest_test.rs"]
mod manifest_test;

#[cfg(feature = "hydrate")]
use overlay::consts::MANIFEST_URL;
use overlay::manifest::{DocumentData, ManifestError};

#[cfg(any(test, feature = "hydrate"))]
fn status_failed_message(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status} {status_text}")
    }
}

/// Fetch and parse the page manifest.
///
/// # Errors
///
/// `Fetch` for network failures and non-2xx responses, `Parse` for a body
/// that is not a manifest.
pub async fn fetch_document() -> Result<DocumentData, ManifestError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(MANIFEST_URL)
            .send()
            .await
            .map_err(|e| ManifestError::Fetch(e.to_string()))?;
        if !resp.ok() {
            return Err(ManifestError::Fetch(status_failed_message(resp.status(), &resp.status_text())));
        }
        let body = resp.text().await.map_err(|e| ManifestError::Fetch(e.to_string()))?;
        overlay::manifest::parse_manifest(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ManifestError::Fetch("no browser host".to_owned()))
    }
}
