//! Resize handles and their decomposition into per-axis edge roles.
//!
//! Every selectable object exposes eight handles. The scaling correction is
//! axis-independent, so each handle is reduced to an [`EdgeRole`] on X and one
//! on Y and the two axes are corrected separately.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight drag affordances on a selected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    /// Top-left corner.
    Tl,
    /// Top-right corner.
    Tr,
    /// Bottom-left corner.
    Bl,
    /// Bottom-right corner.
    Br,
    /// Middle of the left edge.
    Ml,
    /// Middle of the right edge.
    Mr,
    /// Middle of the top edge.
    Mt,
    /// Middle of the bottom edge.
    Mb,
}

/// Which edge of an axis a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRole {
    /// The handle does not resize along this axis.
    None,
    /// The handle moves the near edge (left or top); the origin moves with it.
    Start,
    /// The handle moves the far edge (right or bottom); the origin stays put.
    End,
}

impl Corner {
    /// Every handle, corners first, then edge midpoints.
    pub const ALL: [Self; 8] = [Self::Tl, Self::Tr, Self::Bl, Self::Br, Self::Ml, Self::Mr, Self::Mt, Self::Mb];

    /// Role of this handle on the horizontal axis.
    #[must_use]
    pub fn x_role(self) -> EdgeRole {
        match self {
            Self::Tl | Self::Ml | Self::Bl => EdgeRole::Start,
            Self::Tr | Self::Mr | Self::Br => EdgeRole::End,
            Self::Mt | Self::Mb => EdgeRole::None,
        }
    }

    /// Role of this handle on the vertical axis.
    #[must_use]
    pub fn y_role(self) -> EdgeRole {
        match self {
            Self::Tl | Self::Mt | Self::Tr => EdgeRole::Start,
            Self::Bl | Self::Mb | Self::Br => EdgeRole::End,
            Self::Ml | Self::Mr => EdgeRole::None,
        }
    }

    /// The short id used on the wire (`"tl"`, `"mb"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tl => "tl",
            Self::Tr => "tr",
            Self::Bl => "bl",
            Self::Br => "br",
            Self::Ml => "ml",
            Self::Mr => "mr",
            Self::Mt => "mt",
            Self::Mb => "mb",
        }
    }

    /// The handle diagonally (or directly) across the object.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Tl => Self::Br,
            Self::Tr => Self::Bl,
            Self::Bl => Self::Tr,
            Self::Br => Self::Tl,
            Self::Ml => Self::Mr,
            Self::Mr => Self::Ml,
            Self::Mt => Self::Mb,
            Self::Mb => Self::Mt,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a handle id is not one of the eight known ids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown handle id `{0}` (expected one of tl, tr, bl, br, ml, mr, mt, mb)")]
pub struct ParseCornerError(pub String);

impl FromStr for Corner {
    type Err = ParseCornerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|corner| corner.as_str() == s)
            .ok_or_else(|| ParseCornerError(s.to_owned()))
    }
}
