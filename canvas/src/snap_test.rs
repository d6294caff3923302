#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::PlacedObject;

const G: f64 = 32.0;
const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn settings() -> SnapSettings {
    SnapSettings::default().with_granularity(G)
}

/// A rect whose rendered size is `scaled_w × scaled_h`.
fn rect_scaled_to(left: f64, top: f64, width: f64, height: f64, scaled_w: f64, scaled_h: f64) -> PlacedObject {
    PlacedObject {
        scale_x: scaled_w / width,
        scale_y: scaled_h / height,
        ..PlacedObject::rect(left, top, width, height)
    }
}

/// Minimal stand-in for an externally owned scene object.
#[derive(Debug, Default)]
struct ForeignShape {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
    stroke_width: f64,
}

impl Transformable for ForeignShape {
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

// =============================================================
// correct_scaling: end-edge handles
// =============================================================

#[test]
fn br_drag_snaps_back_to_original_footprint() {
    let mut obj = rect_scaled_to(0.0, 0.0, 96.0, 64.0, 100.0, 70.0);
    assert!(correct_scaling(&mut obj, Corner::Br, &settings()));
    assert!(approx_eq(obj.scale_x, 1.0));
    assert!(approx_eq(obj.scale_y, 1.0));
    assert_eq!((obj.left, obj.top), (0.0, 0.0));
}

#[test]
fn br_drag_grows_to_next_cell() {
    let mut obj = rect_scaled_to(32.0, 32.0, 96.0, 64.0, 120.0, 90.0);
    correct_scaling(&mut obj, Corner::Br, &settings());
    // right edge 152 -> 160, bottom edge 122 -> 128
    assert!(approx_eq(obj.scaled_width(), 128.0));
    assert!(approx_eq(obj.scaled_height(), 96.0));
    assert_eq!((obj.left, obj.top), (32.0, 32.0));
}

#[test]
fn end_handle_keeps_origin_and_aligns_far_edge() {
    for corner in [Corner::Br, Corner::Tr, Corner::Bl, Corner::Mr, Corner::Mb] {
        let mut obj = rect_scaled_to(64.0, 64.0, 96.0, 64.0, 107.0, 77.0);
        correct_scaling(&mut obj, corner, &settings());
        if corner.x_role() == EdgeRole::End {
            assert_eq!(obj.left, 64.0, "{corner}");
            let right = obj.left + obj.scaled_width();
            assert!(approx_eq(right, snap_grid(right, G)), "{corner} right={right}");
        }
        if corner.y_role() == EdgeRole::End {
            assert_eq!(obj.top, 64.0, "{corner}");
            let bottom = obj.top + obj.scaled_height();
            assert!(approx_eq(bottom, snap_grid(bottom, G)), "{corner} bottom={bottom}");
        }
    }
}

// =============================================================
// correct_scaling: start-edge handles
// =============================================================

#[test]
fn tl_drag_snaps_origin_and_keeps_far_edge() {
    // Dragged the top-left handle to (40, 20); far edges at (136, 84).
    let mut obj = rect_scaled_to(40.0, 20.0, 96.0, 64.0, 96.0, 64.0);
    correct_scaling(&mut obj, Corner::Tl, &settings());
    assert_eq!((obj.left, obj.top), (32.0, 32.0));
    assert!(approx_eq(obj.left + obj.scaled_width(), 136.0));
    assert!(approx_eq(obj.top + obj.scaled_height(), 84.0));
}

#[test]
fn start_handles_leave_origin_on_grid() {
    for corner in [Corner::Tl, Corner::Ml, Corner::Bl, Corner::Mt, Corner::Tr] {
        let mut obj = rect_scaled_to(45.0, 77.0, 96.0, 64.0, 100.0, 70.0);
        correct_scaling(&mut obj, corner, &settings());
        if corner.x_role() == EdgeRole::Start {
            assert_eq!(obj.left, snap_grid(45.0, G), "{corner}");
        }
        if corner.y_role() == EdgeRole::Start {
            assert_eq!(obj.top, snap_grid(77.0, G), "{corner}");
        }
    }
}

// =============================================================
// correct_scaling: middle handles
// =============================================================

#[test]
fn middle_handles_touch_only_their_axis() {
    let mut obj = rect_scaled_to(0.0, 0.0, 96.0, 64.0, 100.0, 70.0);
    let scale_y = obj.scale_y;
    correct_scaling(&mut obj, Corner::Mr, &settings());
    assert!(approx_eq(obj.scale_x, 1.0));
    assert_eq!(obj.scale_y, scale_y);

    let mut obj = rect_scaled_to(0.0, 0.0, 96.0, 64.0, 100.0, 70.0);
    let scale_x = obj.scale_x;
    correct_scaling(&mut obj, Corner::Mb, &settings());
    assert_eq!(obj.scale_x, scale_x);
    assert!(approx_eq(obj.scale_y, 1.0));
}

// =============================================================
// correct_scaling: stroke and settings
// =============================================================

#[test]
fn stroke_counts_toward_base_extent() {
    let mut obj = PlacedObject { stroke_width: 4.0, ..PlacedObject::rect(0.0, 0.0, 60.0, 60.0) };
    // scaled extent = 64 x 64 at scale 1; drag br to 70 rendered
    obj.scale_x = 70.0 / 64.0;
    obj.scale_y = 70.0 / 64.0;
    correct_scaling(&mut obj, Corner::Br, &settings());
    assert!(approx_eq(obj.scale_x, 1.0));
    assert!(approx_eq(obj.scaled_width(), 64.0));
}

#[test]
fn disabled_resize_snapping_is_noop() {
    let mut obj = rect_scaled_to(5.0, 5.0, 96.0, 64.0, 100.0, 70.0);
    let before = obj.clone();
    let off = SnapSettings { snap_on_resize: false, ..settings() };
    assert!(!correct_scaling(&mut obj, Corner::Tl, &off));
    assert_eq!(obj, before);
}

#[test]
fn aligned_geometry_reports_no_change() {
    let mut obj = PlacedObject::rect(32.0, 64.0, 96.0, 64.0);
    for corner in Corner::ALL {
        assert!(!correct_scaling(&mut obj, corner, &settings()), "{corner}");
    }
}

#[test]
fn works_through_trait_seam() {
    let mut shape = ForeignShape { width: 96.0, height: 64.0, scale_x: 100.0 / 96.0, scale_y: 70.0 / 64.0, ..ForeignShape::default() };
    correct_scaling(&mut shape, Corner::Br, &settings());
    assert!(approx_eq(shape.scale_x, 1.0));
    assert!(approx_eq(shape.scale_y, 1.0));
}

// =============================================================
// Scale clamp
// =============================================================

#[test]
fn clamp_floor_preserves_sign() {
    assert_eq!(clamp_scale(0.0, 0.001), 0.001);
    assert_eq!(clamp_scale(0.0005, 0.001), 0.001);
    assert_eq!(clamp_scale(-0.0005, 0.001), -0.001);
    assert_eq!(clamp_scale(-2.0, 0.001), -2.0);
    assert_eq!(clamp_scale(1.5, 0.001), 1.5);
    assert_eq!(clamp_scale(f64::NAN, 0.001), 0.001);
}

#[test]
fn tl_start_edge_on_negative_tie_snaps_up() {
    let mut obj = PlacedObject::rect(-16.0, 0.0, 64.0, 64.0);
    correct_scaling(&mut obj, Corner::Tl, &settings());
    assert_eq!(obj.left, 0.0);
    assert!(approx_eq(obj.scale_x, 0.75));
    assert!(approx_eq(obj.scale_y, 1.0));
}

#[test]
fn drag_through_zero_clamps_to_epsilon() {
    // far edge dragged onto the origin: snapped width collapses to zero
    let mut obj = rect_scaled_to(64.0, 64.0, 96.0, 64.0, 3.0, 2.0);
    correct_scaling(&mut obj, Corner::Br, &settings());
    assert_eq!(obj.scale_x, 0.001);
    assert_eq!(obj.scale_y, 0.001);
}

#[test]
fn negative_scale_keeps_own_sign() {
    // flipped on X; a bottom-edge drag must not borrow Y's sign for X
    let mut obj = rect_scaled_to(64.0, 64.0, 96.0, 64.0, -48.0, 70.0);
    correct_scaling(&mut obj, Corner::Mb, &settings());
    assert_eq!(obj.scale_x, -0.5);
    assert!(approx_eq(obj.scale_y, 1.0));
}

#[test]
fn configurable_min_scale() {
    let coarse = SnapSettings { min_scale: 0.25, ..settings() };
    let mut obj = rect_scaled_to(64.0, 64.0, 96.0, 64.0, 3.0, 2.0);
    correct_scaling(&mut obj, Corner::Br, &coarse);
    assert_eq!(obj.scale_x, 0.25);
    assert_eq!(obj.scale_y, 0.25);
}

#[test]
fn zero_base_extent_is_clamped_not_nan() {
    let mut obj = PlacedObject { scale_x: 1.0, scale_y: 1.0, ..PlacedObject::rect(0.0, 0.0, 0.0, 0.0) };
    correct_scaling(&mut obj, Corner::Br, &settings());
    assert!(!obj.scale_x.is_nan());
    assert!(!obj.scale_y.is_nan());
    assert_eq!(obj.scale_x, 0.001);
}

// =============================================================
// Corner symmetry
// =============================================================

#[test]
fn tl_then_br_equals_br_then_tl() {
    let raw = rect_scaled_to(5.0, 7.0, 96.0, 64.0, 101.0, 70.0);

    let mut a = raw.clone();
    correct_scaling(&mut a, Corner::Tl, &settings());
    correct_scaling(&mut a, Corner::Br, &settings());

    let mut b = raw;
    correct_scaling(&mut b, Corner::Br, &settings());
    correct_scaling(&mut b, Corner::Tl, &settings());

    assert_eq!((a.left, a.top), (b.left, b.top));
    assert!(approx_eq(a.scaled_width(), b.scaled_width()));
    assert!(approx_eq(a.scaled_height(), b.scaled_height()));
}

// =============================================================
// Move / modify
// =============================================================

#[test]
fn eager_mode_snaps_on_every_move() {
    let mut obj = PlacedObject::rect(45.0, -20.0, 96.0, 64.0);
    assert!(on_moving(&mut obj, &settings()));
    assert_eq!((obj.left, obj.top), (32.0, -32.0));
    assert!(!on_modified(&mut obj, &settings()));
}

#[test]
fn smooth_mode_defers_to_release() {
    let smooth = SnapSettings { smooth_snapping: true, ..settings() };
    let mut obj = PlacedObject::rect(45.0, -20.0, 96.0, 64.0);
    assert!(!on_moving(&mut obj, &smooth));
    assert_eq!((obj.left, obj.top), (45.0, -20.0));
    assert!(on_modified(&mut obj, &smooth));
    assert_eq!((obj.left, obj.top), (32.0, -32.0));
}

#[test]
fn master_toggle_disables_both_policies() {
    for smooth in [false, true] {
        let off = SnapSettings { snap_on_move: false, smooth_snapping: smooth, ..settings() };
        let mut obj = PlacedObject::rect(45.0, -20.0, 96.0, 64.0);
        assert!(!on_moving(&mut obj, &off));
        assert!(!on_modified(&mut obj, &off));
        assert_eq!((obj.left, obj.top), (45.0, -20.0));
    }
}

#[test]
fn snap_position_is_idempotent() {
    let mut obj = PlacedObject::rect(17.0, 49.0, 10.0, 10.0);
    assert!(snap_position(&mut obj, G));
    let once = (obj.left, obj.top);
    assert!(!snap_position(&mut obj, G));
    assert_eq!((obj.left, obj.top), once);
}
