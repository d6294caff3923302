//! Input model: modifier keys, transform events, and the gesture session.
//!
//! The host scene graph reports pointer gestures as transform events.
//! `InputState` remembers which object and handle the current gesture is
//! acting on between the first move/scale event and the final commit.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ObjectId;
use crate::handle::Corner;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"d"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// A resize notification: which handle is being dragged on which object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformEvent {
    pub corner: Corner,
    pub target: ObjectId,
}

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An object is being dragged.
    Moving {
        /// Id of the object being dragged.
        id: ObjectId,
    },
    /// An object is being resized by one of its handles.
    Scaling {
        /// Id of the object being resized.
        id: ObjectId,
        /// Which handle is being dragged.
        corner: Corner,
    },
}

impl InputState {
    /// The object the current gesture acts on, if any.
    #[must_use]
    pub fn target(self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::Moving { id } | Self::Scaling { id, .. } => Some(id),
        }
    }

    /// The handle being dragged, if the gesture is a resize.
    #[must_use]
    pub fn active_corner(self) -> Option<Corner> {
        match self {
            Self::Scaling { corner, .. } => Some(corner),
            Self::Idle | Self::Moving { .. } => None,
        }
    }
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently selected objects, in selection order.
    pub selection: Vec<ObjectId>,
}
