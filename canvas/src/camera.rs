//! Viewport camera over the infinite canvas.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A canvas or screen position. Also used as a `(left, top)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Where the canvas origin sits on screen.
///
/// The canvas only pans, so the mapping is a pure translation. The grid
/// itself never moves in canvas space and snapping ignores the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Screen position of the canvas origin.
    pub offset: Point,
}

impl Camera {
    /// Canvas position under a screen (pointer) position.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen.translated(-self.offset.x, -self.offset.y)
    }

    /// Drag the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset = self.offset.translated(dx, dy);
    }

    /// Bring the canvas origin back to the top-left of the screen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
