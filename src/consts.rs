//! Shared numeric constants for the playpage engine.

// ── Objects ─────────────────────────────────────────────────────

/// Minimum committed width and height of a page object, in pixels.
pub const MIN_OBJECT_SIZE: f64 = 20.0;

/// Fallback edge length for catalog items that carry no default size.
pub const DEFAULT_OBJECT_SIZE: f64 = 100.0;

/// Fraction of a bubble sticker's bounding box occupied by its text region.
pub const BUBBLE_TEXT_RATIO: f64 = 0.6;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop in pixels around resize and rotate handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge of the bounding box to the rotate handle, in pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

// ── Grid ────────────────────────────────────────────────────────

/// Maximum number of grid cells in the report layout.
pub const MAX_SUBJECT_COUNT: usize = 4;

/// Cell count at which the large/small card layout applies.
pub const EXPANDED_LAYOUT_COUNT: usize = 3;

/// Upper bound on the per-cell image capacity.
pub const MAX_CELL_IMAGES: usize = 9;
