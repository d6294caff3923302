//! Snapping configuration.
//!
//! [`SnapSettings`] is a plain value handed to every snap handler for the
//! duration of a single call. The owner swaps it wholesale when a toggle
//! changes instead of mutating fields behind the handlers' backs.
//!
//! Settings can be deserialized (every field optional) or read from the
//! environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GRIDBOARD_GRANULARITY` | `32` |
//! | `GRIDBOARD_SNAP_ON_MOVE` | `true` |
//! | `GRIDBOARD_SNAP_ON_RESIZE` | `true` |
//! | `GRIDBOARD_SMOOTH_SNAPPING` | `false` |
//! | `GRIDBOARD_PASTE_DIRECTION` | `right` |
//! | `GRIDBOARD_MIN_SCALE` | `0.001` |

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GRANULARITY, DEFAULT_MIN_SCALE};
use crate::grid::{Grid, GridError};
use crate::paste::PasteDirection;

/// Errors produced while loading or validating [`SnapSettings`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: `{value}`")]
    Parse { var: &'static str, value: String },

    /// The grid granularity is unusable.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The minimum scale epsilon is zero, negative or non-finite.
    #[error("min_scale must be a positive finite number, got {0}")]
    MinScale(f64),
}

/// Toggles and constants consumed by the snap handlers.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Grid cell size in world units.
    pub granularity: f64,
    /// Master toggle for position snapping.
    pub snap_on_move: bool,
    /// Toggle for scale correction during resize.
    pub snap_on_resize: bool,
    /// Defer position snapping until the gesture is released.
    pub smooth_snapping: bool,
    /// Placement of duplicates relative to their source.
    pub paste_direction: PasteDirection,
    /// Smallest scale magnitude a resize may leave behind.
    pub min_scale: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
            snap_on_move: true,
            snap_on_resize: true,
            smooth_snapping: false,
            paste_direction: PasteDirection::Right,
            min_scale: DEFAULT_MIN_SCALE,
        }
    }
}

impl SnapSettings {
    /// Build settings from `GRIDBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        })
    }

    /// Build settings from an arbitrary key lookup, falling back to defaults
    /// for missing keys. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let settings = Self {
            granularity: parse_var(&lookup, "GRIDBOARD_GRANULARITY", defaults.granularity)?,
            snap_on_move: parse_var(&lookup, "GRIDBOARD_SNAP_ON_MOVE", defaults.snap_on_move)?,
            snap_on_resize: parse_var(&lookup, "GRIDBOARD_SNAP_ON_RESIZE", defaults.snap_on_resize)?,
            smooth_snapping: parse_var(&lookup, "GRIDBOARD_SMOOTH_SNAPPING", defaults.smooth_snapping)?,
            paste_direction: parse_var(&lookup, "GRIDBOARD_PASTE_DIRECTION", defaults.paste_direction)?,
            min_scale: parse_var(&lookup, "GRIDBOARD_MIN_SCALE", defaults.min_scale)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that granularity and `min_scale` are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(ConfigError::MinScale(self.min_scale));
        }
        Ok(())
    }

    /// The granularity as a validated [`Grid`].
    pub fn grid(&self) -> Result<Grid, GridError> {
        Grid::new(self.granularity)
    }

    /// Copy with a different granularity.
    #[must_use]
    pub fn with_granularity(self, granularity: f64) -> Self {
        Self { granularity, ..self }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => {
            let trimmed = raw.trim();
            trimmed.parse::<T>().map_err(|_| ConfigError::Parse { var, value: raw.clone() })
        }
    }
}
