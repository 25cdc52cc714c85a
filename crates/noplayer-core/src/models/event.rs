//! Engine playback states and the high-level events the forwarder emits.

use serde::{Deserialize, Serialize};

use crate::error::EngineErrorKind;

/// Raw engine state reported through `EngineEventListener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Buffering,
    Ready,
    Ended,
}

/// Event published to `EventForwarder` subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlayerEvent {
    Prepared,
    BufferingStarted,
    BufferingEnded,
    StateChanged { playing: bool },
    Completed,
    PositionDiscontinuity,
    VideoSizeChanged {
        width: u32,
        height: u32,
        rotation_degrees: u32,
        pixel_ratio: f32,
    },
    DroppedFrames { count: u32, elapsed_ms: u64 },
    SourceLoadStarted { locator: String },
    SourceLoadCompleted { locator: String, bytes_loaded: u64 },
    Error { kind: EngineErrorKind, message: String },
}
