//! Follow decision markers.
//!
//! A pair evaluation `(a, b)` yields two markers. The first says whether `a`
//! gained `b` as a follower, the second whether `a` follows `b`. When both
//! happen in the same evaluation they collapse into [`FollowMarker::Mutual`].
//! Markers serialize as the bare integers the social graph sheet stores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer marker written into a decision cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FollowMarker {
    /// No follow in this direction
    #[default]
    None,
    /// Second pass fired: the first persona follows the second
    Outbound,
    /// Both passes fired
    Mutual,
    /// First pass fired: the first persona is followed by the second
    Inbound,
}

impl FollowMarker {
    /// Integer stored in the sheet.
    pub fn value(self) -> u8 {
        match self {
            FollowMarker::None => 0,
            FollowMarker::Outbound => 1,
            FollowMarker::Mutual => 2,
            FollowMarker::Inbound => 3,
        }
    }

    /// Whether this marker records an edge.
    pub fn fires(self) -> bool {
        self.value() > 0
    }
}

impl From<FollowMarker> for u8 {
    fn from(marker: FollowMarker) -> Self {
        marker.value()
    }
}

/// A cell value outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid follow marker value: {0}")]
pub struct InvalidMarker(pub u8);

impl TryFrom<u8> for FollowMarker {
    type Error = InvalidMarker;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FollowMarker::None),
            1 => Ok(FollowMarker::Outbound),
            2 => Ok(FollowMarker::Mutual),
            3 => Ok(FollowMarker::Inbound),
            other => Err(InvalidMarker(other)),
        }
    }
}
