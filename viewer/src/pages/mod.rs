//! Route-level screens.

pub mod document;
