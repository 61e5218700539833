//! Input model: keys, view-facing UI state, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context captured at gesture start that is needed
//! to compute per-move deltas and emit the final document mutation on
//! release. It is owned by a single [`crate::engine::EngineCore`], which is
//! the one source of truth for "is a gesture active" — individual objects do
//! not subscribe to events themselves.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ObjectId;
use crate::geom::Point;
use crate::hit::ResizeAnchor;

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g.
/// `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected object, if any. Selection drives the
    /// handle affordances; it is not part of any committed transform.
    pub selected_id: Option<ObjectId>,
    /// Whether the host's inline text editor is open. Gates keyboard
    /// deletion so typing never destroys the object being edited.
    pub editing_text: bool,
    /// Last cursor name sent to the host, to suppress repeat actions.
    pub cursor: Option<String>,
}

/// Internal state of the gesture state machine.
///
/// Each active variant carries the gesture-start context needed to compute
/// deltas against the current pointer position.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an object across the page.
    Dragging {
        /// Id of the object being dragged.
        id: ObjectId,
        /// Pointer position at pointer-down.
        start: Point,
        /// Object x at the start of the drag.
        orig_x: f64,
        /// Object y at the start of the drag.
        orig_y: f64,
    },
    /// The user is resizing an object by one of its eight handles.
    Resizing {
        /// Id of the object being resized.
        id: ObjectId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Pointer position at pointer-down.
        start: Point,
        /// Object x at the start of the resize.
        orig_x: f64,
        /// Object y at the start of the resize.
        orig_y: f64,
        /// Object width at the start of the resize.
        orig_w: f64,
        /// Object height at the start of the resize.
        orig_h: f64,
    },
    /// The user is rotating an object by its rotate handle.
    Rotating {
        /// Id of the object being rotated.
        id: ObjectId,
        /// Center of the bounding box at gesture start; the rotation pivot.
        center: Point,
        /// Angle in degrees of the pointer's vector from the pivot at
        /// gesture start.
        start_angle: f64,
        /// Rotation in degrees at the start of the gesture.
        orig_rotation: f64,
    },
}

impl InputState {
    /// The id of the object owning the active gesture, if any.
    #[must_use]
    pub fn gesture_target(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id, .. } => {
                Some(*id)
            }
        }
    }
}
