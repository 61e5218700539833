//! Drop-target resolution for grid-cell drags.
//!
//! While a cell is being dragged, the host measures the dragged card's
//! rectangle and those of every droppable cell and asks which cell the drop
//! would land on. Overlap wins: among droppables whose rectangle intersects
//! the dragged rectangle, the largest overlap is chosen. When a fast drag
//! samples a frame with no overlap at all, the resolver degrades to the
//! droppable whose center is nearest the dragged rectangle's center, so a
//! drop always resolves to exactly one deterministic target.

#[cfg(test)]
#[path = "collide_test.rs"]
mod collide_test;

use crate::geom::Rect;

/// A droppable cell's measured geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    /// Cell id, `grid-<n>`.
    pub id: String,
    /// The cell's rectangle in container coordinates.
    pub rect: Rect,
}

impl Droppable {
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self { id: id.into(), rect }
    }
}

/// Choose the drop target for `dragged` among `droppables`.
///
/// Ties on overlap area or center distance resolve to the earlier entry, so
/// the result is deterministic for a host that supplies cells in slot order.
/// The dragged cell itself must not be included in `droppables`.
#[must_use]
pub fn drop_target<'a>(dragged: Rect, droppables: &'a [Droppable]) -> Option<&'a str> {
    let mut best_overlap: Option<(&'a str, f64)> = None;
    for d in droppables {
        let area = dragged.intersection_area(&d.rect);
        if area > 0.0 && best_overlap.is_none_or(|(_, best)| area > best) {
            best_overlap = Some((&d.id, area));
        }
    }
    if let Some((id, _)) = best_overlap {
        return Some(id);
    }

    let mut nearest: Option<(&'a str, f64)> = None;
    for d in droppables {
        let dist = dragged.center_distance(&d.rect);
        if nearest.is_none_or(|(_, best)| dist < best) {
            nearest = Some((&d.id, dist));
        }
    }
    nearest.map(|(id, _)| id)
}
