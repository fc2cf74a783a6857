//! Shared numeric and naming constants for the overlay crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the viewer allows.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor the viewer allows.
pub const ZOOM_MAX: f64 = 3.0;

/// Increment applied by one zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom factor restored by "reset zoom".
pub const ZOOM_DEFAULT: f64 = 1.0;

// ── Editor ──────────────────────────────────────────────────────

/// Longest side, in CSS pixels, of the image preview in the annotation editor.
pub const MAX_PREVIEW_SIZE: f64 = 200.0;

// ── Files and URLs ──────────────────────────────────────────────

/// Path of the page manifest served next to the page images.
pub const MANIFEST_URL: &str = "/pages/data.json";

/// File name offered when annotations are exported.
pub const EXPORT_FILE_NAME: &str = "annotations.json";

/// MIME type of the exported annotation file.
pub const EXPORT_MIME: &str = "application/json";

/// Document name shown when the manifest could not be loaded.
pub const ERROR_DOCUMENT_NAME: &str = "Error loading document";
