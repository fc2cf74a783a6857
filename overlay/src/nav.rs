//! Page routing, pagination and zoom steps.
//!
//! Pages are addressed as `/page/{n}`. A missing or unusable `n` means page
//! 1; a number the manifest does not know redirects to the first known page.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::consts::{ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::manifest::DocumentData;

/// Route path for page `number`.
#[must_use]
pub fn page_path(number: u32) -> String {
    format!("/page/{number}")
}

/// Page number from the `:pageId` route parameter, defaulting to 1.
#[must_use]
pub fn parse_page_param(raw: Option<&str>) -> u32 {
    match raw.map(|s| s.trim().parse::<u32>()) {
        Some(Ok(n)) if n > 0 => n,
        _ => 1,
    }
}

/// What to do with a requested page once the manifest is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResolution {
    /// Manifest has no pages (not loaded yet, or failed); render nothing.
    Pending,
    /// The page exists.
    Show(u32),
    /// The page does not exist; navigate to this one instead.
    Redirect(u32),
}

#[must_use]
pub fn resolve_page(requested: u32, document: &DocumentData) -> PageResolution {
    let Some(first) = document.first_page() else {
        return PageResolution::Pending;
    };
    if document.page(requested).is_some() {
        PageResolution::Show(requested)
    } else {
        PageResolution::Redirect(first.number)
    }
}

/// Previous/next bounds for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
}

impl Pagination {
    #[must_use]
    pub fn new(current: u32, document: &DocumentData) -> Self {
        let total = u32::try_from(document.total_pages()).unwrap_or(u32::MAX);
        Self { current, total }
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current < self.total
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    #[must_use]
    pub fn next(&self) -> Option<u32> {
        self.can_go_next().then(|| self.current + 1)
    }

    #[must_use]
    pub fn previous(&self) -> Option<u32> {
        self.can_go_previous().then(|| self.current - 1)
    }

    /// Page typed into the page field, if it is within `1..=total`.
    #[must_use]
    pub fn go_to(&self, input: &str) -> Option<u32> {
        match input.trim().parse::<u32>() {
            Ok(n) if (1..=self.total).contains(&n) => Some(n),
            _ => None,
        }
    }
}

/// Zoom factor stepped in tenths between [`ZOOM_MIN`] and [`ZOOM_MAX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Self(ZOOM_DEFAULT)
    }
}

impl Zoom {
    #[must_use]
    pub fn new(level: f64) -> Self {
        Self(round_tenth(level.clamp(ZOOM_MIN, ZOOM_MAX)))
    }

    #[must_use]
    pub fn level(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self(round_tenth((self.0 + ZOOM_STEP).min(ZOOM_MAX)))
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self(round_tenth((self.0 - ZOOM_STEP).max(ZOOM_MIN)))
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Percentage label, e.g. `"120%"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{:.0}%", self.0 * 100.0)
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
