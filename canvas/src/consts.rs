//! Shared numeric constants for the canvas crate.

// ── Grid ────────────────────────────────────────────────────────

/// Default grid cell size in world units.
pub const DEFAULT_GRANULARITY: f64 = 32.0;

/// Smallest scale magnitude a resize correction may leave on an object.
///
/// Guards against zero-area and sign-flip singularities when a handle is
/// dragged through the opposite edge. Overridable via `SnapSettings::min_scale`.
pub const DEFAULT_MIN_SCALE: f64 = 0.001;

// ── Spawning ────────────────────────────────────────────────────

/// Width of a freshly added rectangle, in grid cells.
pub const NEW_RECT_CELLS_WIDE: f64 = 3.0;

/// Height of a freshly added rectangle, in grid cells.
pub const NEW_RECT_CELLS_HIGH: f64 = 2.0;

/// Fill color for freshly added rectangles.
pub const DEFAULT_RECT_FILL: &str = "#529d8a";
