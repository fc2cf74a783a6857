//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host only serves files. `/pages/*` maps onto `PAGES_DIR` (manifest and
//! page images), everything else onto the compiled viewer in `SITE_DIR`.
//! Paths with no matching file fall back to `index.html` so deep links such
//! as `/page/3` boot the viewer, which then does its own routing.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::HostState;

/// Build the application router.
pub fn app(state: HostState) -> Router {
    let pages = ServeDir::new(&state.config.pages_dir);
    let site = ServeDir::new(&state.config.site_dir).fallback(ServeFile::new(state.config.index_path()));

    Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/pages", pages)
        .fallback_service(site)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    document: Option<String>,
    pages: usize,
}

async fn healthz(State(state): State<HostState>) -> Json<Health> {
    let document = state.document.as_deref();
    Json(Health {
        status: "ok",
        document: document.map(|d| d.name.clone()),
        pages: document.map_or(0, |d| d.total_pages()),
    })
}
