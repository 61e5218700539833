//! Hit-testing against page objects and their manipulation handles.
//!
//! A selected object presents nine handles: eight directional resize handles
//! on the corners and edge midpoints, plus a rotate handle floating above the
//! top edge. Handle positions are computed in the object's unrotated local
//! frame — rotation is visual-only, so the handles an object answers to do
//! not move when it rotates.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{DocStore, ObjectId, PageObject};
use crate::geom::Point;

/// Which part of an object was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The object body; starts a drag.
    Body,
    /// One of the eight directional resize handles.
    ResizeHandle(ResizeAnchor),
    /// The rotate handle above the top edge.
    RotateHandle,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// All eight anchors in clockwise order from north.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// Whether this anchor sits on the left edge and therefore moves the
    /// object's x origin while resizing.
    #[must_use]
    pub fn on_west(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether this anchor sits on the right edge.
    #[must_use]
    pub fn on_east(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Whether this anchor sits on the top edge and therefore moves the
    /// object's y origin while resizing.
    #[must_use]
    pub fn on_north(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Whether this anchor sits on the bottom edge.
    #[must_use]
    pub fn on_south(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// CSS cursor name for hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Se | Self::Nw => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

/// Position of a resize handle in the object's unrotated local frame.
#[must_use]
pub fn handle_position(obj: &PageObject, anchor: ResizeAnchor) -> Point {
    let cx = obj.x + obj.width * 0.5;
    let cy = obj.y + obj.height * 0.5;
    let (x, y) = match anchor {
        ResizeAnchor::N => (cx, obj.y),
        ResizeAnchor::Ne => (obj.x + obj.width, obj.y),
        ResizeAnchor::E => (obj.x + obj.width, cy),
        ResizeAnchor::Se => (obj.x + obj.width, obj.y + obj.height),
        ResizeAnchor::S => (cx, obj.y + obj.height),
        ResizeAnchor::Sw => (obj.x, obj.y + obj.height),
        ResizeAnchor::W => (obj.x, cy),
        ResizeAnchor::Nw => (obj.x, obj.y),
    };
    Point::new(x, y)
}

/// Position of the rotate handle, centered above the top edge.
#[must_use]
pub fn rotate_handle_position(obj: &PageObject) -> Point {
    Point::new(obj.x + obj.width * 0.5, obj.y - ROTATE_HANDLE_OFFSET_PX)
}

fn within_handle(pt: Point, handle: Point) -> bool {
    pt.distance_to(handle) <= HANDLE_RADIUS_PX
}

/// Test which object part (if any) is under `pt`.
///
/// The selected object's handles are checked first so a handle grab wins even
/// when another object's body overlaps it; bodies are then checked
/// topmost-first in paint order.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore, selected: Option<ObjectId>) -> Option<Hit> {
    if let Some(obj) = selected.and_then(|id| doc.get(&id)) {
        if within_handle(pt, rotate_handle_position(obj)) {
            return Some(Hit { object_id: obj.id, part: HitPart::RotateHandle });
        }
        for anchor in ResizeAnchor::ALL {
            if within_handle(pt, handle_position(obj, anchor)) {
                return Some(Hit { object_id: obj.id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    doc.sorted_objects()
        .into_iter()
        .rev()
        .find(|obj| obj.rect().contains(pt))
        .map(|obj| Hit { object_id: obj.id, part: HitPart::Body })
}
