//! Shared reactive state, provided as `RwSignal`s from [`crate::app::App`].
//!
//! DESIGN
//! ======
//! `document` tracks the manifest load; `viewer` is the render-side copy of
//! the overlay core that components read. Neither holds DOM handles, so
//! both are unit-tested natively.

pub mod document;
pub mod viewer;
