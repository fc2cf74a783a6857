//! Gesture state machine for drawing and moving annotations.
//!
//! Two flows share one state value, so only one gesture can be live:
//!
//! ```text
//! draw:  Idle -> Drawing -> AwaitingInput -> Idle
//! move:  Idle -> Moving -> Idle
//! ```
//!
//! The transitions themselves are driven by [`crate::engine::OverlayCore`];
//! this module holds the states and the bookkeeping for the window-level
//! pointer listeners a move gesture needs.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::geometry::{DragState, Point, Rect};
use crate::store::{Annotation, AnnotationId};

/// Active gesture, carrying everything needed to compute the next update.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A new region is being dragged out in annotation mode.
    Drawing {
        /// Document-space point where the pointer went down.
        start: Point,
        /// Current normalized box.
        rect: Rect,
    },
    /// The region is frozen and the editor is open.
    AwaitingInput {
        /// Box drawn by the user, before aspect-ratio fitting.
        rect: Rect,
        /// Set while a submit is being finalized; further submits are dropped.
        saving: bool,
    },
    /// An existing annotation follows the pointer.
    Moving {
        /// Annotation being moved.
        id: AnnotationId,
        /// Pointer and origin captured at pointer-down.
        drag: DragState,
        /// Annotation as it was at pointer-down; moves rewrite only `x`/`y`.
        snapshot: Box<Annotation>,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    #[must_use]
    pub fn is_awaiting_input(&self) -> bool {
        matches!(self, Self::AwaitingInput { .. })
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving { .. })
    }

    /// Box being drawn or awaiting input, if any.
    #[must_use]
    pub fn draft_rect(&self) -> Option<Rect> {
        match self {
            Self::Drawing { rect, .. } | Self::AwaitingInput { rect, .. } => Some(*rect),
            Self::Idle | Self::Moving { .. } => None,
        }
    }

    /// Id of the annotation being moved, if any.
    #[must_use]
    pub fn moving_id(&self) -> Option<AnnotationId> {
        match self {
            Self::Moving { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The drag bookkeeping of a move gesture, or the neutral state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        match self {
            Self::Moving { drag, .. } => *drag,
            _ => DragState::default(),
        }
    }
}

/// Opaque token naming one installed pair of window move/up listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerPair(u64);

impl ListenerPair {
    /// Raw generation number, for hosts that key their closures by it.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Holds at most one active listener pair.
///
/// Installing a pair hands back the previous one so the host can detach it
/// before attaching the new closures. Events delivered to a pair that is no
/// longer current are to be ignored (see [`is_current`](Self::is_current)).
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: Option<ListenerPair>,
    next: u64,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pair, returning it and whichever pair it displaced.
    pub fn install(&mut self) -> (ListenerPair, Option<ListenerPair>) {
        let previous = self.active.take();
        self.next += 1;
        let pair = ListenerPair(self.next);
        self.active = Some(pair);
        (pair, previous)
    }

    /// Remove the active pair, returning it for detachment.
    pub fn teardown(&mut self) -> Option<ListenerPair> {
        self.active.take()
    }

    /// Whether `pair` is the one currently installed.
    #[must_use]
    pub fn is_current(&self, pair: ListenerPair) -> bool {
        self.active == Some(pair)
    }

    /// The installed pair, if any.
    #[must_use]
    pub fn active(&self) -> Option<ListenerPair> {
        self.active
    }

    /// Number of installed pairs: always 0 or 1.
    #[must_use]
    pub fn active_count(&self) -> usize {
        usize::from(self.active.is_some())
    }
}
