//! Top-level engine: gesture orchestration and the browser boundary.
//!
//! [`EngineCore`] owns all interaction state — the object store, the grid
//! store, selection, and the active gesture — and contains no browser
//! dependencies, so every behavior is testable natively. [`Engine`] is the
//! thin WASM-facing wrapper that owns the page container element, measures
//! it before each gesture, and exchanges snapshots with the host as JSON.
//!
//! Input handlers return [`Action`]s describing what the host should do:
//! persist a mutation, repaint, or update the cursor. Handlers never fail —
//! unknown ids and out-of-range values degrade to "no visual change".

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::bounds;
use crate::collide::{self, Droppable};
use crate::consts::DEFAULT_OBJECT_SIZE;
use crate::doc::{CatalogItem, DocStore, ObjectId, PageObject, PartialPageObject, Payload};
use crate::geom::{Point, Rect, Size};
use crate::grid::{GridCell, GridStore};
use crate::hit::{self, HitPart};
use crate::input::{InputState, Key, UiState};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A new object exists; persist it.
    ObjectCreated(PageObject),
    /// An object changed; persist the listed fields.
    ObjectUpdated { id: ObjectId, fields: PartialPageObject },
    /// An object is gone; persist the deletion.
    ObjectDeleted { id: ObjectId },
    /// Two grid cells exchanged content; persist both.
    CellsSwapped { a: String, b: String },
    /// A grid cell's content changed; persist it.
    CellUpdated { id: String },
    /// The grid layout was reconfigured; persist all cells.
    GridReset,
    /// Set the pointer cursor over the page container.
    SetCursor(String),
    /// State changed in a way that needs a repaint.
    RenderNeeded,
}

/// A full editor snapshot, as exchanged with the persistence host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Overlay objects in paint order.
    pub objects: Vec<PageObject>,
    /// Grid cells in slot order.
    pub cells: Vec<GridCell>,
}

/// Errors produced while exchanging snapshots with the host.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The object list could not be deserialized.
    #[error("invalid object snapshot: {0}")]
    Objects(serde_json::Error),
    /// The grid cell list could not be deserialized.
    #[error("invalid grid snapshot: {0}")]
    Cells(serde_json::Error),
    /// The current state could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Serialize(serde_json::Error),
}

/// Core engine state — all logic that doesn't depend on the browser.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies, and so several editors can coexist in one process: the core
/// is an owned value, not a global.
pub struct EngineCore {
    pub doc: DocStore,
    pub grid: GridStore,
    pub ui: UiState,
    pub input: InputState,
    /// Content-box size of the page container, measured by the host.
    /// Gestures are refused while this is unknown.
    pub container: Option<Size>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            grid: GridStore::new(),
            ui: UiState::default(),
            input: InputState::Idle,
            container: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Geometry ---

    /// Record the container's measured size. Non-positive dimensions count
    /// as unmeasured and keep gestures refused.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container = if width > 0.0 && height > 0.0 {
            Some(Size::new(width, height))
        } else {
            None
        };
    }

    // --- Data inputs ---

    /// Hydrate both stores from a persisted snapshot.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.doc.load_snapshot(snapshot.objects);
        self.grid.load_snapshot(snapshot.cells);
        self.ui.selected_id = None;
        self.input = InputState::Idle;
    }

    /// Clone the full editor state for the persistence host.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { objects: self.doc.snapshot(), cells: self.grid.snapshot() }
    }

    // --- Object lifecycle ---

    /// Add an object from a catalog entry, select it, and stack it on top.
    ///
    /// The object is centered in the container when its geometry is known,
    /// placed at the origin otherwise (adding is not a gesture, so it is not
    /// refused without geometry).
    pub fn add_object(&mut self, item: CatalogItem) -> (ObjectId, Vec<Action>) {
        let width = item.default_width.unwrap_or(DEFAULT_OBJECT_SIZE);
        let height = item.default_height.unwrap_or(DEFAULT_OBJECT_SIZE);
        let (x, y) = match self.container {
            Some(c) => ((c.width - width) * 0.5, (c.height - height) * 0.5),
            None => (0.0, 0.0),
        };
        let obj = PageObject {
            id: ObjectId::new_v4(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            z_index: self.doc.max_z().map_or(1, |z| z + 1),
            payload: item.payload,
        };
        let id = obj.id;
        log::debug!("object {id} added at z {}", obj.z_index);
        self.doc.insert(obj.clone());
        self.ui.selected_id = Some(id);
        (id, vec![Action::ObjectCreated(obj), Action::RenderNeeded])
    }

    /// Apply a host-supplied partial update. No-op on unknown ids.
    pub fn update_object(&mut self, id: &ObjectId, fields: PartialPageObject) -> Vec<Action> {
        if !self.doc.apply_partial(id, &fields) {
            return Vec::new();
        }
        vec![Action::ObjectUpdated { id: *id, fields }, Action::RenderNeeded]
    }

    /// Remove an object permanently. No-op on unknown ids.
    pub fn remove_object(&mut self, id: &ObjectId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        log::debug!("object {id} deleted");
        vec![Action::ObjectDeleted { id: *id }, Action::RenderNeeded]
    }

    /// Raise an object above all others. No-op when already on top.
    pub fn bring_to_front(&mut self, id: &ObjectId) -> Vec<Action> {
        let Some(z_index) = self.doc.bring_to_front(id) else {
            return Vec::new();
        };
        let fields = PartialPageObject { z_index: Some(z_index), ..Default::default() };
        vec![Action::ObjectUpdated { id: *id, fields }, Action::RenderNeeded]
    }

    /// Commit text from the host's inline editor into a text sticker.
    /// No-op for unknown ids and image stickers.
    pub fn set_text(&mut self, id: &ObjectId, text: String) -> Vec<Action> {
        let Some(obj) = self.doc.get(id) else {
            return Vec::new();
        };
        let mut payload = obj.payload.clone();
        if !payload.set_text(text) {
            return Vec::new();
        }
        let fields = PartialPageObject { payload: Some(payload), ..Default::default() };
        self.doc.apply_partial(id, &fields);
        vec![Action::ObjectUpdated { id: *id, fields }, Action::RenderNeeded]
    }

    /// Toggle the "inline text editor open" flag that gates keyboard deletion.
    pub fn set_editing_text(&mut self, editing: bool) {
        self.ui.editing_text = editing;
    }

    // --- Pointer events ---

    /// Pointer-down over the page.
    ///
    /// Over a handle of the selected object this starts a resize or rotate;
    /// over a body it selects, raises, and starts a drag; over empty space
    /// it clears the selection. Gesture starts are refused while the
    /// container is unmeasured — the object still selects and raises, it is
    /// just non-interactive for this gesture attempt.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        let Some(hit) = hit::hit_test(pt, &self.doc, self.ui.selected_id) else {
            if self.ui.selected_id.take().is_some() {
                return vec![Action::RenderNeeded];
            }
            return Vec::new();
        };

        let mut actions = self.select_and_raise(hit.object_id);
        if self.container.is_none() {
            log::debug!("gesture refused: container not measured");
            actions.push(Action::RenderNeeded);
            return actions;
        }
        let Some(obj) = self.doc.get(&hit.object_id) else {
            return actions;
        };

        self.input = match hit.part {
            HitPart::Body => InputState::Dragging {
                id: obj.id,
                start: pt,
                orig_x: obj.x,
                orig_y: obj.y,
            },
            HitPart::ResizeHandle(anchor) => InputState::Resizing {
                id: obj.id,
                anchor,
                start: pt,
                orig_x: obj.x,
                orig_y: obj.y,
                orig_w: obj.width,
                orig_h: obj.height,
            },
            HitPart::RotateHandle => {
                let center = obj.center();
                InputState::Rotating {
                    id: obj.id,
                    center,
                    start_angle: angle_deg(center, pt),
                    orig_rotation: obj.rotation,
                }
            }
        };
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer-move over the page.
    ///
    /// Advances the active gesture, mutating the store in place; the final
    /// `ObjectUpdated` is emitted on release. In `Idle` this only refreshes
    /// the hover cursor.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => self.hover(pt),
            InputState::Dragging { id, start, orig_x, orig_y } => {
                let Some(container) = self.container else {
                    return Vec::new();
                };
                let Some(obj) = self.doc.get(&id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                let (x, y) = bounds::clamp_position(
                    orig_x + (pt.x - start.x),
                    orig_y + (pt.y - start.y),
                    obj.width,
                    obj.height,
                    container,
                );
                let fields = PartialPageObject { x: Some(x), y: Some(y), ..Default::default() };
                self.doc.apply_partial(&id, &fields);
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { id, anchor, start, orig_x, orig_y, orig_w, orig_h } => {
                if self.doc.get(&id).is_none() {
                    self.input = InputState::Idle;
                    return Vec::new();
                }
                let dx = pt.x - start.x;
                let dy = pt.y - start.y;
                let grow_x = if anchor.on_east() {
                    dx
                } else if anchor.on_west() {
                    -dx
                } else {
                    0.0
                };
                let grow_y = if anchor.on_south() {
                    dy
                } else if anchor.on_north() {
                    -dy
                } else {
                    0.0
                };
                let horiz = bounds::resize_axis(orig_w, grow_x, anchor.on_west());
                let vert = bounds::resize_axis(orig_h, grow_y, anchor.on_north());
                let mut x = orig_x + horiz.shift;
                let mut y = orig_y + vert.shift;
                // Text stickers keep their origin reachable; image stickers
                // may be sized past the container edge.
                if let Some(container) = self.container {
                    if self.is_text_object(&id) {
                        (x, y) = bounds::clamp_position(x, y, horiz.size, vert.size, container);
                    }
                }
                let fields = PartialPageObject {
                    x: Some(x),
                    y: Some(y),
                    width: Some(horiz.size),
                    height: Some(vert.size),
                    ..Default::default()
                };
                self.doc.apply_partial(&id, &fields);
                vec![Action::RenderNeeded]
            }
            InputState::Rotating { id, center, start_angle, orig_rotation } => {
                if self.doc.get(&id).is_none() {
                    self.input = InputState::Idle;
                    return Vec::new();
                }
                let rotation = bounds::normalize_deg(orig_rotation + angle_deg(center, pt) - start_angle);
                let fields = PartialPageObject { rotation: Some(rotation), ..Default::default() };
                self.doc.apply_partial(&id, &fields);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Pointer-up anywhere: commit the active gesture and return to `Idle`.
    ///
    /// There is no cancel gesture — releasing always commits the transform
    /// as of the last move.
    pub fn on_pointer_up(&mut self, _pt: Point) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let Some(id) = state.gesture_target() else {
            return Vec::new();
        };
        let Some(obj) = self.doc.get(&id) else {
            return vec![Action::RenderNeeded];
        };
        log::debug!("gesture on {id} committed");
        let fields = PartialPageObject {
            x: Some(obj.x),
            y: Some(obj.y),
            width: Some(obj.width),
            height: Some(obj.height),
            rotation: Some(obj.rotation),
            ..Default::default()
        };
        vec![Action::ObjectUpdated { id, fields }, Action::RenderNeeded]
    }

    /// Key-down over the page. Delete removes the selected object unless an
    /// inline text editor is open.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.0 == "Delete" && !self.ui.editing_text {
            if let Some(id) = self.ui.selected_id {
                return self.remove_object(&id);
            }
        }
        Vec::new()
    }

    // --- Grid ---

    /// Reconfigure the number of grid cells (1..=4), preserving cells by
    /// index.
    pub fn set_subject_count(&mut self, count: usize) -> Vec<Action> {
        self.grid.set_subject_count(count);
        vec![Action::GridReset, Action::RenderNeeded]
    }

    /// Reconfigure the per-cell image capacity (1..=9).
    pub fn set_image_count(&mut self, count: usize) -> Vec<Action> {
        self.grid.set_image_count(count);
        vec![Action::GridReset, Action::RenderNeeded]
    }

    /// Swap the content of two cells. No-op when either id is unknown or
    /// the ids are equal.
    pub fn swap_cells(&mut self, a: &str, b: &str) -> Vec<Action> {
        if !self.grid.swap_content(a, b) {
            return Vec::new();
        }
        log::debug!("grid cells {a} and {b} swapped");
        vec![
            Action::CellsSwapped { a: a.to_owned(), b: b.to_owned() },
            Action::RenderNeeded,
        ]
    }

    /// Choose the drop target for a dragged cell, excluding the cell itself.
    #[must_use]
    pub fn resolve_drop(
        &self,
        active_id: &str,
        dragged: Rect,
        droppables: &[Droppable],
    ) -> Option<String> {
        let candidates: Vec<Droppable> = droppables
            .iter()
            .filter(|d| d.id != active_id)
            .cloned()
            .collect();
        collide::drop_target(dragged, &candidates).map(str::to_owned)
    }

    /// Finish a cell drag: resolve the drop target and swap content with it.
    pub fn drop_cell(
        &mut self,
        active_id: &str,
        dragged: Rect,
        droppables: &[Droppable],
    ) -> Vec<Action> {
        match self.resolve_drop(active_id, dragged, droppables) {
            Some(over_id) => self.swap_cells(active_id, &over_id),
            None => Vec::new(),
        }
    }

    /// Set a cell's category label.
    pub fn set_cell_category(&mut self, id: &str, category: String) -> Vec<Action> {
        if !self.grid.set_category(id, category) {
            return Vec::new();
        }
        cell_updated(id)
    }

    /// Set a cell's free-text caption.
    pub fn set_cell_input_value(&mut self, id: &str, value: String) -> Vec<Action> {
        if !self.grid.set_input_value(id, value) {
            return Vec::new();
        }
        cell_updated(id)
    }

    /// Set a cell's checked flag.
    pub fn set_cell_checked(&mut self, id: &str, checked: bool) -> Vec<Action> {
        if !self.grid.set_checked(id, checked) {
            return Vec::new();
        }
        cell_updated(id)
    }

    /// Store an uploaded image reference in the next free slot of a cell.
    pub fn push_cell_image(&mut self, id: &str, url: String) -> Vec<Action> {
        if !self.grid.push_image(id, url) {
            return Vec::new();
        }
        cell_updated(id)
    }

    /// Remove the image at `slot` from a cell.
    pub fn remove_cell_image(&mut self, id: &str, slot: usize) -> Vec<Action> {
        if !self.grid.remove_image(id, slot) {
            return Vec::new();
        }
        cell_updated(id)
    }

    /// Empty a cell after its external data source is removed.
    pub fn clear_cell(&mut self, id: &str) -> Vec<Action> {
        if !self.grid.clear_content(id) {
            return Vec::new();
        }
        cell_updated(id)
    }

    // --- Queries ---

    /// The currently selected object, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected_id
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PageObject> {
        self.doc.get(id)
    }

    // --- Internals ---

    fn select_and_raise(&mut self, id: ObjectId) -> Vec<Action> {
        self.ui.selected_id = Some(id);
        self.bring_to_front(&id)
    }

    fn hover(&mut self, pt: Point) -> Vec<Action> {
        let cursor = match hit::hit_test(pt, &self.doc, self.ui.selected_id) {
            Some(hit) => match hit.part {
                HitPart::Body => "move",
                HitPart::ResizeHandle(anchor) => anchor.cursor(),
                HitPart::RotateHandle => "grab",
            },
            None => "default",
        };
        if self.ui.cursor.as_deref() == Some(cursor) {
            return Vec::new();
        }
        self.ui.cursor = Some(cursor.to_owned());
        vec![Action::SetCursor(cursor.to_owned())]
    }

    fn is_text_object(&self, id: &ObjectId) -> bool {
        self.doc
            .get(id)
            .is_some_and(|obj| matches!(obj.payload, Payload::Text { .. }))
    }
}

fn cell_updated(id: &str) -> Vec<Action> {
    vec![Action::CellUpdated { id: id.to_owned() }, Action::RenderNeeded]
}

fn angle_deg(center: Point, pt: Point) -> f64 {
    (pt.y - center.y).atan2(pt.x - center.x).to_degrees()
}

/// The full page engine. Wraps `EngineCore` and owns the browser container
/// element.
pub struct Engine {
    container: HtmlElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the page container element.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        Self { container, core: EngineCore::new() }
    }

    /// Re-measure the container and record its size on the core.
    pub fn measure(&mut self) {
        let width = f64::from(self.container.offset_width());
        let height = f64::from(self.container.offset_height());
        self.core.set_container_size(width, height);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> Vec<Action> {
        self.measure();
        self.core.on_pointer_down(Point::new(x, y))
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Vec<Action> {
        self.core.on_pointer_move(Point::new(x, y))
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> Vec<Action> {
        self.core.on_pointer_up(Point::new(x, y))
    }

    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        self.core.on_key_down(&Key(key.to_owned()))
    }

    // --- Delegated mutations ---

    pub fn add_object(&mut self, item: CatalogItem) -> (ObjectId, Vec<Action>) {
        self.measure();
        self.core.add_object(item)
    }

    pub fn set_text(&mut self, id: &ObjectId, text: String) -> Vec<Action> {
        self.core.set_text(id, text)
    }

    pub fn set_editing_text(&mut self, editing: bool) {
        self.core.set_editing_text(editing);
    }

    pub fn set_subject_count(&mut self, count: usize) -> Vec<Action> {
        self.core.set_subject_count(count)
    }

    pub fn swap_cells(&mut self, a: &str, b: &str) -> Vec<Action> {
        self.core.swap_cells(a, b)
    }

    pub fn drop_cell(&mut self, active_id: &str, dragged: Rect, droppables: &[Droppable]) -> Vec<Action> {
        self.core.drop_cell(active_id, dragged, droppables)
    }

    // --- Cursor ---

    /// Apply a [`Action::SetCursor`] value to the container element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the style property cannot be set on the element.
    pub fn apply_cursor(&self, cursor: &str) -> Result<(), JsValue> {
        self.container.style().set_property("cursor", cursor)
    }

    // --- Snapshots ---

    /// Hydrate both stores from JSON snapshots supplied by the host.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when either list fails to deserialize; on
    /// error no state is replaced.
    pub fn load_snapshot_json(&mut self, objects: &str, cells: &str) -> Result<(), SnapshotError> {
        let objects: Vec<PageObject> =
            serde_json::from_str(objects).map_err(SnapshotError::Objects)?;
        let cells: Vec<GridCell> = serde_json::from_str(cells).map_err(SnapshotError::Cells)?;
        self.core.load_snapshot(Snapshot { objects, cells });
        Ok(())
    }

    /// Serialize the full editor state for the persistence host.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when serialization fails.
    pub fn snapshot_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(&self.core.snapshot()).map_err(SnapshotError::Serialize)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.core.selection()
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&PageObject> {
        self.core.object(id)
    }
}
