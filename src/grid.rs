//! Photo-grid cells and the content-swap layout engine.
//!
//! The grid is a fixed-cardinality set of addressable cells. Each cell's
//! identity and shape (`id`, `index`, `card_type`) are pinned to its slot for
//! the lifetime of a layout; only its content (`category`, `images`,
//! `input_value`) and content-attached flags (`checked`, `expanded`) move
//! when the user drags cells around. Swapping content instead of cells is
//! what keeps the large/small visual template stable: rearranging must feel
//! like shuffling photos, not like moving frames.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::consts::{EXPANDED_LAYOUT_COUNT, MAX_CELL_IMAGES, MAX_SUBJECT_COUNT};

/// Shape tag of a grid cell, used only in the three-cell layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// The enlarged hero slot.
    Large,
    /// A regular slot.
    Small,
}

/// One grid cell: immutable slot identity plus swappable content.
///
/// Content, the per-cell selection flag, and the expansion flag live in one
/// record so a reorder is a single atomic exchange rather than three
/// parallel map mutations that could drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Stable slot identifier, `grid-<index>`.
    pub id: String,
    /// 1-based slot number, fixed for the lifetime of a layout.
    pub index: u32,
    /// Short category label.
    pub category: String,
    /// Ordered image references, at most the configured per-cell capacity.
    pub images: Vec<String>,
    /// Free-text caption.
    pub input_value: String,
    /// Shape tag; `Some` only in the three-cell layout.
    pub card_type: Option<CardType>,
    /// Whether the cell is checked in the host's selection UI.
    pub checked: bool,
    /// Whether this cell's content currently occupies the hero slot.
    pub expanded: bool,
}

impl GridCell {
    /// An empty cell for the given 1-based slot index.
    #[must_use]
    pub fn empty(index: u32) -> Self {
        Self {
            id: format!("grid-{index}"),
            index,
            category: String::new(),
            images: Vec::new(),
            input_value: String::new(),
            card_type: None,
            checked: false,
            expanded: false,
        }
    }

    fn clear_content(&mut self) {
        self.category.clear();
        self.images.clear();
        self.input_value.clear();
        self.checked = false;
    }
}

/// In-memory store of grid cells.
pub struct GridStore {
    cells: Vec<GridCell>,
    image_count: usize,
}

impl GridStore {
    /// Create an empty store with a per-cell image capacity of one.
    #[must_use]
    pub fn new() -> Self {
        Self { cells: Vec::new(), image_count: 1 }
    }

    /// The cells in slot order.
    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Return a reference to a cell by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// The configured per-cell image capacity.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    /// Number of cells in the current layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no layout has been configured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reconfigure the per-cell image capacity, clamped to `1..=9`.
    ///
    /// Cells holding more images than the new capacity are truncated.
    pub fn set_image_count(&mut self, count: usize) {
        self.image_count = count.clamp(1, MAX_CELL_IMAGES);
        for cell in &mut self.cells {
            cell.images.truncate(self.image_count);
        }
    }

    /// Resize the layout to `count` cells, clamped to `1..=4`.
    ///
    /// Existing cells are preserved by index; new indices start empty. The
    /// three-cell layout tags index 1 `Large` and the rest `Small`, with the
    /// expansion flag reset to index 1; every other count clears both.
    pub fn set_subject_count(&mut self, count: usize) {
        let count = count.clamp(1, MAX_SUBJECT_COUNT);
        log::debug!("grid layout set to {count} cells (was {})", self.cells.len());
        self.cells.truncate(count);
        for index in self.cells.len()..count {
            let slot = u32::try_from(index + 1).unwrap_or(u32::MAX);
            self.cells.push(GridCell::empty(slot));
        }
        if count == EXPANDED_LAYOUT_COUNT {
            for cell in &mut self.cells {
                cell.card_type = Some(if cell.index == 1 { CardType::Large } else { CardType::Small });
                cell.expanded = cell.index == 1;
            }
        } else {
            for cell in &mut self.cells {
                cell.card_type = None;
                cell.expanded = false;
            }
        }
    }

    /// Swap the content of two cells, leaving their identity and shape in
    /// place. Returns false (touching nothing) when either id is unknown or
    /// the ids are equal.
    pub fn swap_content(&mut self, a: &str, b: &str) -> bool {
        let Some(ia) = self.cells.iter().position(|c| c.id == a) else {
            return false;
        };
        let Some(ib) = self.cells.iter().position(|c| c.id == b) else {
            return false;
        };
        if ia == ib {
            return false;
        }
        let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
        let (head, tail) = self.cells.split_at_mut(hi);
        let first = &mut head[lo];
        let second = &mut tail[0];
        std::mem::swap(&mut first.category, &mut second.category);
        std::mem::swap(&mut first.images, &mut second.images);
        std::mem::swap(&mut first.input_value, &mut second.input_value);
        std::mem::swap(&mut first.checked, &mut second.checked);
        std::mem::swap(&mut first.expanded, &mut second.expanded);
        true
    }

    /// Set a cell's category label. Returns false if the id is unknown.
    pub fn set_category(&mut self, id: &str, category: String) -> bool {
        self.with_cell(id, |cell| cell.category = category)
    }

    /// Set a cell's free-text caption. Returns false if the id is unknown.
    pub fn set_input_value(&mut self, id: &str, value: String) -> bool {
        self.with_cell(id, |cell| cell.input_value = value)
    }

    /// Set a cell's checked flag. Returns false if the id is unknown.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        self.with_cell(id, |cell| cell.checked = checked)
    }

    /// Append an image reference to a cell. Returns false if the id is
    /// unknown or the cell is already at capacity.
    pub fn push_image(&mut self, id: &str, url: String) -> bool {
        let capacity = self.image_count;
        let Some(cell) = self.cells.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if cell.images.len() >= capacity {
            return false;
        }
        cell.images.push(url);
        true
    }

    /// Remove the image at `slot` from a cell, shifting later images down.
    /// Returns false if the id is unknown or the slot is out of range.
    pub fn remove_image(&mut self, id: &str, slot: usize) -> bool {
        let Some(cell) = self.cells.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if slot >= cell.images.len() {
            return false;
        }
        cell.images.remove(slot);
        true
    }

    /// Empty a cell's content after its external data source is removed.
    /// Identity, shape, and the expansion flag stay. Returns false if the id
    /// is unknown.
    pub fn clear_content(&mut self, id: &str) -> bool {
        self.with_cell(id, GridCell::clear_content)
    }

    /// Replace all cells with a full snapshot.
    pub fn load_snapshot(&mut self, cells: Vec<GridCell>) {
        log::debug!("loading grid snapshot ({} cells)", cells.len());
        self.cells = cells;
    }

    /// Clone all cells in slot order for the persistence host.
    #[must_use]
    pub fn snapshot(&self) -> Vec<GridCell> {
        self.cells.clone()
    }

    fn with_cell(&mut self, id: &str, f: impl FnOnce(&mut GridCell)) -> bool {
        match self.cells.iter_mut().find(|c| c.id == id) {
            Some(cell) => {
                f(cell);
                true
            }
            None => false,
        }
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}
