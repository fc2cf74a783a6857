//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read `DocumentState`/`ViewerState` from context and send
//! pointer and button events to the overlay core via the bridge.

pub mod annotation_input;
pub mod annotations_layer;
pub mod document_content;
pub mod document_header;
pub mod document_pagination;
