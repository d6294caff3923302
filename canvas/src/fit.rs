//! Fitting an image into its container frame.
//!
//! An image object is a frame (the object's own box) plus the natural size of
//! the picture drawn inside it. [`ObjectFit::Contain`] shows the whole picture,
//! [`ObjectFit::Cover`] fills the whole frame. Where the picture sits inside
//! the frame is controlled per axis by a [`FitAnchor`], then nudged by a
//! free pixel offset.

#[cfg(test)]
#[path = "fit_test.rs"]
mod fit_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// How a picture is scaled into its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    /// Largest scale at which the whole picture is visible.
    #[default]
    Contain,
    /// Smallest scale at which the picture covers the whole frame.
    Cover,
}

/// Horizontal placement of the picture inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorX {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of the picture inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorY {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Per-axis anchor. Defaults to centered on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitAnchor {
    pub x: AnchorX,
    pub y: AnchorY,
}

/// Which frame side [`aspect_corrected`] recomputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectAdjust {
    /// Keep the height, derive the width.
    Width,
    /// Keep the width, derive the height.
    Height,
}

/// Image-specific state carried by an image object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    pub natural_width: f64,
    pub natural_height: f64,
    pub fit: ObjectFit,
    pub anchor: FitAnchor,
    /// Extra shift applied after anchoring, in frame units.
    pub offset: Point,
}

impl ImageFrame {
    #[must_use]
    pub fn new(natural_width: f64, natural_height: f64, fit: ObjectFit) -> Self {
        Self { natural_width, natural_height, fit, anchor: FitAnchor::default(), offset: Point::default() }
    }

    /// Where the picture is drawn inside a frame of the given size.
    #[must_use]
    pub fn layout(&self, frame_width: f64, frame_height: f64) -> FitRect {
        fit_image(
            frame_width,
            frame_height,
            self.natural_width,
            self.natural_height,
            self.fit,
            self.anchor,
            self.offset,
        )
    }
}

/// Drawn picture rectangle, relative to the frame's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay out a `natural_w × natural_h` picture inside a `frame_w × frame_h` frame.
///
/// A picture with a non-positive natural size cannot be scaled and yields an
/// empty rect at the frame origin.
#[must_use]
pub fn fit_image(
    frame_w: f64,
    frame_h: f64,
    natural_w: f64,
    natural_h: f64,
    fit: ObjectFit,
    anchor: FitAnchor,
    offset: Point,
) -> FitRect {
    if natural_w <= 0.0 || natural_h <= 0.0 {
        return FitRect::default();
    }
    let ratio_x = frame_w / natural_w;
    let ratio_y = frame_h / natural_h;
    let scale = match fit {
        ObjectFit::Contain => ratio_x.min(ratio_y),
        ObjectFit::Cover => ratio_x.max(ratio_y),
    };
    let width = natural_w * scale;
    let height = natural_h * scale;

    let x = match anchor.x {
        AnchorX::Left => 0.0,
        AnchorX::Center => (frame_w - width) / 2.0,
        AnchorX::Right => frame_w - width,
    };
    let y = match anchor.y {
        AnchorY::Top => 0.0,
        AnchorY::Center => (frame_h - height) / 2.0,
        AnchorY::Bottom => frame_h - height,
    };

    FitRect { x: x + offset.x, y: y + offset.y, width, height }
}

/// Recompute one side of a frame so it matches the picture's aspect ratio.
///
/// Returns the new `(width, height)`. A degenerate natural size leaves the
/// frame unchanged.
#[must_use]
pub fn aspect_corrected(width: f64, height: f64, natural_w: f64, natural_h: f64, adjust: AspectAdjust) -> (f64, f64) {
    if natural_w <= 0.0 || natural_h <= 0.0 {
        return (width, height);
    }
    match adjust {
        AspectAdjust::Width => (natural_w * (height / natural_h), height),
        AspectAdjust::Height => (width, natural_h * (width / natural_w)),
    }
}
