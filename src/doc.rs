//! Document model: page objects, their payloads, and the in-memory store.
//!
//! This module defines the core data types that describe what floats above
//! the report page (`PageObject`, `Payload`), a sparse-update type for
//! incremental edits (`PartialPageObject`), the catalog boundary used by the
//! "add object" action (`CatalogItem`), and the runtime store that owns all
//! live objects (`DocStore`).
//!
//! Data flows into this layer from the persistence host (snapshot
//! deserialization) and from the input engine (mutations). The host renderer
//! reads from `DocStore` via `sorted_objects` to determine paint order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::BUBBLE_TEXT_RATIO;
use crate::geom::{Point, Rect};

/// Unique identifier for a page object.
pub type ObjectId = Uuid;

/// The sub-kind of a basic text sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Title,
    Subtitle,
    Body,
}

/// Visual style of a text sticker, supplied by the catalog's style defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    #[serde(default = "TextStyle::default_font_size")]
    pub font_size: f64,
    /// Text color as a CSS color string.
    #[serde(default = "TextStyle::default_color")]
    pub color: String,
}

impl TextStyle {
    fn default_font_size() -> f64 {
        16.0
    }

    fn default_color() -> String {
        "#333333".to_owned()
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: Self::default_font_size(),
            color: Self::default_color(),
        }
    }
}

/// The text content of a text sticker.
///
/// `Basic` is free-form text with a role-dependent default look; `Bubble`
/// draws the text over a background image, inset to the central region of
/// the bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TextContent {
    Basic { role: TextRole, text: String },
    Bubble { background_url: String, text: String },
}

/// The variant-specific payload of a page object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Payload {
    /// An image sticker.
    Sticker { image_url: String },
    /// A text sticker.
    Text {
        content: TextContent,
        #[serde(default)]
        style: TextStyle,
    },
}

impl Payload {
    /// The editable text of this payload, if it has one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Sticker { .. } => None,
            Self::Text { content, .. } => match content {
                TextContent::Basic { text, .. } | TextContent::Bubble { text, .. } => Some(text),
            },
        }
    }

    /// Replace the editable text. Returns false for payloads without text.
    pub fn set_text(&mut self, new_text: String) -> bool {
        match self {
            Self::Sticker { .. } => false,
            Self::Text { content, .. } => {
                match content {
                    TextContent::Basic { text, .. } | TextContent::Bubble { text, .. } => {
                        *text = new_text;
                    }
                }
                true
            }
        }
    }
}

/// A page object as stored in the document and in persisted snapshots.
///
/// `rotation` is visual-only: the stored bounding box, hit-testing, and
/// resize math all operate in the object's unrotated local frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Left edge of the bounding box, relative to the page container.
    pub x: f64,
    /// Top edge of the bounding box, relative to the page container.
    pub y: f64,
    /// Width of the bounding box in pixels.
    pub width: f64,
    /// Height of the bounding box in pixels.
    pub height: f64,
    /// Clockwise rotation in degrees around the bounding-box center.
    pub rotation: f64,
    /// Stacking order; lower values paint beneath higher values.
    pub z_index: i64,
    /// Variant-specific payload.
    pub payload: Payload,
}

impl PageObject {
    /// The object's bounding box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// The center of the bounding box; the rotation pivot.
    #[must_use]
    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// The inset text region of a bubble sticker, centered and covering
    /// [`BUBBLE_TEXT_RATIO`] of the bounding box per axis. `None` for every
    /// other payload.
    #[must_use]
    pub fn bubble_text_rect(&self) -> Option<Rect> {
        match &self.payload {
            Payload::Text { content: TextContent::Bubble { .. }, .. } => {
                Some(self.rect().inset_by_ratio(BUBBLE_TEXT_RATIO))
            }
            Payload::Sticker { .. } | Payload::Text { .. } => None,
        }
    }
}

/// Sparse update for a page object. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialPageObject {
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New rotation in degrees, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// New z-index, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    /// Replacement payload, if being updated. Payloads are replaced whole so
    /// a partial can never produce a half-edited variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

/// An entry from the sticker/text catalog, as handed over by the host.
///
/// The catalog itself (fetching, caching, preview thumbnails) lives outside
/// this crate; `add_object` only needs the payload seed and optional default
/// dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Payload the new object starts with.
    pub payload: Payload,
    /// Default width in pixels, if the catalog specifies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_width: Option<f64>,
    /// Default height in pixels, if the catalog specifies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_height: Option<f64>,
}

/// In-memory store of page objects.
pub struct DocStore {
    objects: HashMap<ObjectId, PageObject>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new() }
    }

    /// Insert or replace an object. If an object with the same `id` already
    /// exists it is overwritten.
    pub fn insert(&mut self, obj: PageObject) {
        self.objects.insert(obj.id, obj);
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<PageObject> {
        self.objects.remove(id)
    }

    /// Return a reference to an object by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PageObject> {
        self.objects.get(id)
    }

    /// Apply a partial update to an existing object. Returns false if the
    /// object doesn't exist.
    pub fn apply_partial(&mut self, id: &ObjectId, partial: &PartialPageObject) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            obj.x = x;
        }
        if let Some(y) = partial.y {
            obj.y = y;
        }
        if let Some(w) = partial.width {
            obj.width = w;
        }
        if let Some(h) = partial.height {
            obj.height = h;
        }
        if let Some(r) = partial.rotation {
            obj.rotation = r;
        }
        if let Some(z) = partial.z_index {
            obj.z_index = z;
        }
        if let Some(ref payload) = partial.payload {
            obj.payload = payload.clone();
        }
        true
    }

    /// Raise an object above every other object, returning its new z-index.
    ///
    /// Returns `None` without mutating when the id is unknown or the object
    /// is already strictly on top, so repeated calls are idempotent.
    pub fn bring_to_front(&mut self, id: &ObjectId) -> Option<i64> {
        let top = self
            .objects
            .values()
            .filter(|o| o.id != *id)
            .map(|o| o.z_index)
            .max()?;
        let obj = self.objects.get_mut(id)?;
        if obj.z_index > top {
            return None;
        }
        obj.z_index = top + 1;
        Some(obj.z_index)
    }

    /// The highest z-index currently in the store, if any objects exist.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.objects.values().map(|o| o.z_index).max()
    }

    /// Replace all objects with a full snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<PageObject>) {
        log::debug!("loading object snapshot ({} objects)", objects.len());
        self.objects.clear();
        for obj in objects {
            self.objects.insert(obj.id, obj);
        }
    }

    /// Clone all objects in paint order for the persistence host.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PageObject> {
        self.sorted_objects().into_iter().cloned().collect()
    }

    /// Return all objects sorted by `(z_index, id)` for paint order.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&PageObject> {
        let mut objs: Vec<&PageObject> = self.objects.values().collect();
        objs.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        objs
    }

    /// Number of objects currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the store contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
