//! Browser helpers and the bridge into the overlay core.

pub mod file_io;
pub mod layout;
pub mod overlay_bridge;
pub mod window_listeners;
