//! HTTP access to the static host.

pub mod manifest;
