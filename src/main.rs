//! Static host for the page viewer.
//!
//! Serves the compiled viewer bundle, the page manifest and the page images.
//! All annotation work happens in the browser.

mod config;
mod error;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;
use crate::error::HostError;
use crate::state::HostState;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = HostConfig::from_env()?;
    let document = match state::load_manifest(&config.manifest_path()).await {
        Ok(document) => {
            tracing::info!(name = %document.name, pages = document.total_pages(), "manifest loaded");
            for url in state::missing_images(&document, &config.pages_dir).await {
                tracing::warn!(%url, "page image not found");
            }
            Some(document)
        }
        Err(e) => {
            tracing::warn!(error = %e, "manifest unavailable; the viewer will show an empty document");
            None
        }
    };

    let addr = config.bind_addr();
    let app = routes::app(HostState::new(config, document));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| HostError::Bind { addr, source })?;

    tracing::info!(%addr, "pageview listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
