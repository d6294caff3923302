//! Placement of duplicated objects relative to their source.
//!
//! A duplicate lands one grid cell away from its source in the configured
//! [`PasteDirection`]. Two input shapes are supported:
//!
//! - [`PasteMode::Single`]: the source is one object with absolute
//!   coordinates; the offset is its effective (scaled) size plus the gap.
//! - [`PasteMode::Selection`]: the source is the bounding box of a
//!   multi-object selection and the duplicated object's own coordinates are
//!   relative to the center of that box, the way a cloned selection group
//!   reports them. The box origin and half-extents are added back before
//!   offsetting, so every member of the group moves by the same amount.
//!
//! Source positions are grid-aligned and the gap is one cell, so the results
//! land on grid lines once passed through [`crate::grid::snap_grid`].

#[cfg(test)]
#[path = "paste_test.rs"]
mod paste_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::BoundingBox;
use crate::grid::round_half_up;
use crate::snap::Transformable;

/// Where a duplicate is placed relative to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteDirection {
    #[default]
    Right,
    Left,
    Above,
    Below,
}

impl PasteDirection {
    /// The direction that undoes this one.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

impl fmt::Display for PasteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a direction name is not `right`, `left`, `above` or `below`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown paste direction `{0}` (expected right, left, above or below)")]
pub struct ParseDirectionError(pub String);

impl FromStr for PasteDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            other => Err(ParseDirectionError(other.to_owned())),
        }
    }
}

/// How to interpret the inputs of [`compute_paste_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteMode {
    /// Absolute source geometry; the object origin is ignored.
    Single,
    /// Bounding-box source; the object origin is relative to the box center.
    Selection,
}

/// Read-only snapshot of the thing being duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionShim {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl SelectionShim {
    /// Snapshot a single object, keeping its own scale factors.
    #[must_use]
    pub fn of<T: Transformable + ?Sized>(obj: &T) -> Self {
        Self {
            top: obj.top(),
            left: obj.left(),
            width: obj.width(),
            height: obj.height(),
            scale_x: obj.scale_x(),
            scale_y: obj.scale_y(),
        }
    }

    /// Snapshot the union of several rendered boxes with unit scale.
    ///
    /// Returns `None` for an empty iterator.
    #[must_use]
    pub fn bounding<I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = BoundingBox>,
    {
        let union = boxes.into_iter().reduce(BoundingBox::union)?;
        Some(Self {
            top: union.top,
            left: union.left,
            width: union.width(),
            height: union.height(),
            scale_x: 1.0,
            scale_y: 1.0,
        })
    }

    fn effective_width(&self) -> f64 {
        self.width * self.scale_x
    }

    fn effective_height(&self) -> f64 {
        self.height * self.scale_y
    }
}

/// Compute the `(left, top)` of a duplicate, returned as `Point { x: left, y: top }`.
///
/// `origin` is the duplicate's own position before placement. It is only
/// read in [`PasteMode::Selection`], where it is relative to the center of
/// `shim`.
#[must_use]
pub fn compute_paste_position(
    direction: PasteDirection,
    shim: &SelectionShim,
    origin: Point,
    granularity: f64,
    mode: PasteMode,
) -> Point {
    let gap = granularity;
    match mode {
        PasteMode::Single => {
            let tw = shim.effective_width();
            let th = shim.effective_height();
            match direction {
                PasteDirection::Right => Point::new(shim.left + tw + gap, shim.top),
                PasteDirection::Left => Point::new(shim.left - tw - gap, shim.top),
                PasteDirection::Above => Point::new(shim.left, shim.top - th - gap),
                PasteDirection::Below => Point::new(shim.left, shim.top + th + gap),
            }
        }
        PasteMode::Selection => {
            let half_w = round_half_up(shim.width / 2.0);
            let half_h = round_half_up(shim.height / 2.0);
            let left = origin.x + shim.left + half_w;
            let top = origin.y + shim.top + half_h;
            match direction {
                PasteDirection::Right => Point::new(left + shim.width + gap, top),
                PasteDirection::Left => Point::new(left - shim.width - gap, top),
                PasteDirection::Above => Point::new(left, top - shim.height - gap),
                PasteDirection::Below => Point::new(left, top + shim.height + gap),
            }
        }
    }
}

/// Express an absolute position relative to the center of `shim`, as a
/// cloned selection group reports its members.
#[must_use]
pub fn group_relative(absolute: Point, shim: &SelectionShim) -> Point {
    Point::new(
        absolute.x - shim.left - round_half_up(shim.width / 2.0),
        absolute.y - shim.top - round_half_up(shim.height / 2.0),
    )
}
