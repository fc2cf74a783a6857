//! Annotation overlay engine for the document page viewer.
//!
//! This crate holds everything about annotations that does not need a
//! browser: pointer-to-document geometry, the in-memory annotation store,
//! the draw/move gesture state machine, selection, the editor draft, and
//! JSON import/export. The `viewer` crate wires DOM events into
//! [`engine::OverlayCore`] and applies the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `OverlayCore` facade and the actions it emits |
//! | [`store`] | Annotation types, the store, and per-page subscriptions |
//! | [`geometry`] | Coordinate conversion, drag boxes, aspect-ratio fitting |
//! | [`gesture`] | Draw/move gesture state machine and listener bookkeeping |
//! | [`selection`] | Single-annotation selection rules |
//! | [`editor`] | Text/image draft collected before an annotation is created |
//! | [`transfer`] | `annotations.json` export and validated import |
//! | [`manifest`] | Page manifest model and load cache |
//! | [`nav`] | Page routing, pagination and zoom steps |
//! | [`consts`] | Shared numeric and naming constants |

pub mod consts;
pub mod editor;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod manifest;
pub mod nav;
pub mod selection;
pub mod store;
pub mod transfer;
