//! Document model: placed objects and the in-memory store that owns them.
//!
//! `PlacedObject` is the single entity on the canvas. Rectangles and image
//! frames share the same geometry (origin, unscaled extents, scale factors,
//! stroke); images additionally carry an [`ImageFrame`]. The store hands out
//! mutable references so the snap handlers can correct geometry in place.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fit::ImageFrame;
use crate::snap::Transformable;

/// Unique identifier for a placed object.
pub type ObjectId = Uuid;

/// The kind of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Filled rectangle.
    Rect,
    /// Picture fitted into a rectangular frame.
    Image,
}

/// An object placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Rectangle or image.
    pub kind: ObjectKind,
    /// Left edge of the origin corner in world coordinates.
    pub left: f64,
    /// Top edge of the origin corner in world coordinates.
    pub top: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Stroke width, added to both extents before scaling.
    pub stroke_width: f64,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
    /// CSS fill color.
    pub fill: String,
    /// Picture state for [`ObjectKind::Image`] objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageFrame>,
}

impl PlacedObject {
    /// An unscaled, stroke-less rectangle.
    #[must_use]
    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ObjectKind::Rect,
            left,
            top,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            stroke_width: 0.0,
            z_index: 0,
            fill: crate::consts::DEFAULT_RECT_FILL.to_owned(),
            image: None,
        }
    }

    /// An unscaled image frame around `image`.
    #[must_use]
    pub fn image(left: f64, top: f64, width: f64, height: f64, image: ImageFrame) -> Self {
        Self { kind: ObjectKind::Image, image: Some(image), ..Self::rect(left, top, width, height) }
    }

    /// Copy of this object under a fresh id.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self { id: Uuid::new_v4(), ..self.clone() }
    }

    /// Rendered box including stroke.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            left: self.left,
            top: self.top,
            right: self.left + self.width * self.scale_x + self.stroke_width,
            bottom: self.top + self.height * self.scale_y + self.stroke_width,
        }
    }
}

impl Transformable for PlacedObject {
    fn left(&self) -> f64 {
        self.left
    }

    fn top(&self) -> f64 {
        self.top
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn scale_x(&self) -> f64 {
        self.scale_x
    }

    fn scale_y(&self) -> f64 {
        self.scale_y
    }

    fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    fn set_left(&mut self, left: f64) {
        self.left = left;
    }

    fn set_top(&mut self, top: f64) {
        self.top = top;
    }

    fn set_scale_x(&mut self, scale_x: f64) {
        self.scale_x = scale_x;
    }

    fn set_scale_y(&mut self, scale_y: f64) {
        self.scale_y = scale_y;
    }
}

/// Axis-aligned box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// In-memory store of placed objects.
pub struct DocStore {
    objects: HashMap<ObjectId, PlacedObject>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new() }
    }

    /// Insert or replace an object. If an object with the same `id` already
    /// exists it is overwritten.
    pub fn insert(&mut self, obj: PlacedObject) {
        self.objects.insert(obj.id, obj);
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<PlacedObject> {
        self.objects.remove(id)
    }

    /// Return a reference to an object by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    /// Return a mutable reference to an object by id.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut PlacedObject> {
        self.objects.get_mut(id)
    }

    /// Return all objects sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&PlacedObject> {
        let mut objs: Vec<&PlacedObject> = self.objects.values().collect();
        objs.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        objs
    }

    /// A z-index above every stored object.
    #[must_use]
    pub fn next_z(&self) -> i64 {
        self.objects.values().map(|o| o.z_index).max().map_or(0, |z| z + 1)
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
