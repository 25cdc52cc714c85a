//! Millisecond value types for playhead position and media duration.

use serde::{Deserialize, Serialize};

/// A point on the media timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoPosition(u64);

impl VideoPosition {
    pub const ZERO: VideoPosition = VideoPosition(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn in_millis(self) -> u64 {
        self.0
    }
}

/// Total length of the loaded media. Engines report 0 while it is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoDuration(u64);

impl VideoDuration {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn in_millis(self) -> u64 {
        self.0
    }

    pub const fn is_unknown(self) -> bool {
        self.0 == 0
    }
}
