//! Grid-snapping handlers for interactive move and resize gestures.
//!
//! The handlers never own the object they correct. Anything exposing the
//! [`Transformable`] accessors can be snapped, which keeps the arithmetic
//! testable without a scene store. Each handler takes the current
//! [`SnapSettings`] by reference for that single call and reports whether it
//! changed the object, so the caller knows when to re-render.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::config::SnapSettings;
use crate::grid::snap_grid;
use crate::handle::{Corner, EdgeRole};

/// Geometry accessors the snapping handlers operate on.
///
/// `width`/`height` are unscaled extents; the rendered box spans
/// `scaled_width()` by `scaled_height()` from `(left, top)`.
pub trait Transformable {
    fn left(&self) -> f64;
    fn top(&self) -> f64;
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn scale_x(&self) -> f64;
    fn scale_y(&self) -> f64;
    fn stroke_width(&self) -> f64;

    fn set_left(&mut self, left: f64);
    fn set_top(&mut self, top: f64);
    fn set_scale_x(&mut self, scale_x: f64);
    fn set_scale_y(&mut self, scale_y: f64);

    /// `(width + stroke_width) * scale_x`.
    fn scaled_width(&self) -> f64 {
        (self.width() + self.stroke_width()) * self.scale_x()
    }

    /// `(height + stroke_width) * scale_y`.
    fn scaled_height(&self) -> f64 {
        (self.height() + self.stroke_width()) * self.scale_y()
    }
}

/// The four values a snap handler may rewrite.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    left: f64,
    top: f64,
    scale_x: f64,
    scale_y: f64,
}

impl Placement {
    fn capture<T: Transformable + ?Sized>(obj: &T) -> Self {
        Self { left: obj.left(), top: obj.top(), scale_x: obj.scale_x(), scale_y: obj.scale_y() }
    }
}

/// Result of correcting one axis: the new origin and scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisCorrection {
    start: f64,
    scale: f64,
}

/// Snap one axis of a resize.
///
/// `start` is the origin on this axis, `scaled_extent` the current rendered
/// size and `base_extent` the unscaled size including stroke.
fn correct_axis(role: EdgeRole, start: f64, scaled_extent: f64, base_extent: f64, granularity: f64) -> Option<AxisCorrection> {
    match role {
        EdgeRole::None => None,
        EdgeRole::Start => {
            let snapped = snap_grid(start, granularity);
            Some(AxisCorrection { start: snapped, scale: (scaled_extent + start - snapped) / base_extent })
        }
        EdgeRole::End => {
            let snapped_end = snap_grid(start + scaled_extent, granularity);
            Some(AxisCorrection { start, scale: (snapped_end - start) / base_extent })
        }
    }
}

/// Clamp a scale factor's magnitude to at least `min_scale`, keeping its sign.
///
/// A NaN scale (from a `0 / 0` extent) becomes `+min_scale`.
#[must_use]
pub fn clamp_scale(scale: f64, min_scale: f64) -> f64 {
    if scale.is_nan() {
        return min_scale;
    }
    scale.signum() * scale.abs().max(min_scale)
}

/// Re-derive scale factors during a resize so the dragged edges land on the grid.
///
/// For a start-edge handle the origin is snapped and the scale grows or
/// shrinks to keep the far edge where it was. For an end-edge handle the far
/// edge is snapped and the origin is left alone. Middle handles leave the
/// other axis's scale untouched. Both scales are then clamped to
/// `settings.min_scale`.
pub fn correct_scaling<T: Transformable + ?Sized>(obj: &mut T, corner: Corner, settings: &SnapSettings) -> bool {
    if !settings.snap_on_resize {
        return false;
    }
    let before = Placement::capture(obj);
    let granularity = settings.granularity;
    let stroke = obj.stroke_width();

    let base_x = obj.width() + stroke;
    let base_y = obj.height() + stroke;
    if base_x == 0.0 || base_y == 0.0 {
        tracing::warn!(base_x, base_y, %corner, "resizing an object with a zero base extent");
    }

    if let Some(x) = correct_axis(corner.x_role(), obj.left(), obj.scaled_width(), base_x, granularity) {
        obj.set_scale_x(x.scale);
        obj.set_left(x.start);
    }
    if let Some(y) = correct_axis(corner.y_role(), obj.top(), obj.scaled_height(), base_y, granularity) {
        obj.set_scale_y(y.scale);
        obj.set_top(y.start);
    }

    obj.set_scale_x(clamp_scale(obj.scale_x(), settings.min_scale));
    obj.set_scale_y(clamp_scale(obj.scale_y(), settings.min_scale));

    let after = Placement::capture(obj);
    if after != before {
        tracing::debug!(%corner, ?before, ?after, "resize snapped to grid");
    }
    after != before
}

/// Snap `left`/`top` to the nearest grid intersection.
pub fn snap_position<T: Transformable + ?Sized>(obj: &mut T, granularity: f64) -> bool {
    let left = snap_grid(obj.left(), granularity);
    let top = snap_grid(obj.top(), granularity);
    #[allow(clippy::float_cmp)]
    let changed = left != obj.left() || top != obj.top();
    obj.set_left(left);
    obj.set_top(top);
    changed
}

/// Handle a move-delta event: snap immediately unless snapping is deferred.
pub fn on_moving<T: Transformable + ?Sized>(obj: &mut T, settings: &SnapSettings) -> bool {
    if settings.snap_on_move && !settings.smooth_snapping {
        return snap_position(obj, settings.granularity);
    }
    false
}

/// Handle gesture completion: apply the snap deferred by smooth snapping.
pub fn on_modified<T: Transformable + ?Sized>(obj: &mut T, settings: &SnapSettings) -> bool {
    if settings.snap_on_move && settings.smooth_snapping {
        return snap_position(obj, settings.granularity);
    }
    false
}
