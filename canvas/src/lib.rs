//! Grid placement engine for a freeform design canvas.
//!
//! Objects live on an infinite canvas divided into square cells. The engine
//! keeps them aligned to that grid while the host scene graph moves, resizes
//! and duplicates them: drag deltas snap positions, handle drags correct scale
//! factors so the dragged edge lands on a grid line, and duplicates are placed
//! one cell away from their source. The host forwards transform events and
//! key presses, then applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event entry points and the testable [`engine::EngineCore`] |
//! | [`grid`] | The grid snap function and validated [`grid::Grid`] size |
//! | [`handle`] | Resize handle identifiers and their per-axis edge roles |
//! | [`snap`] | Scaling correction and move/modify snapping over [`snap::Transformable`] |
//! | [`paste`] | Duplicate placement for single objects and selections |
//! | [`fit`] | Image object-fit layout inside a frame |
//! | [`doc`] | In-memory scene store and placed object types |
//! | [`config`] | Snap settings and environment loading |
//! | [`camera`] | Pan camera and coordinate conversions |
//! | [`input`] | Transform events, modifiers and the gesture session |
//! | [`consts`] | Shared defaults (grid size, minimum scale, spawn size) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod fit;
pub mod grid;
pub mod handle;
pub mod input;
pub mod paste;
pub mod snap;

pub use config::{ConfigError, SnapSettings};
pub use engine::{Action, EngineCore};
pub use grid::{Grid, GridError, snap_grid};
pub use handle::Corner;
pub use paste::{PasteDirection, PasteMode, SelectionShim, compute_paste_position};
pub use snap::Transformable;
