//! Callback contracts between the engine and the application.
//!
//! The engine calls these from its own callback context, so every listener is
//! `Send + Sync` and shared as an `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::EngineState;

/// Playback state and error callbacks from an engine session.
pub trait EngineEventListener: Send + Sync {
    fn on_player_state_changed(&self, play_when_ready: bool, state: EngineState);
    fn on_player_error(&self, error: &EngineError);
    fn on_position_discontinuity(&self) {}
}

/// Video renderer diagnostics.
pub trait VideoDebugListener: Send + Sync {
    fn on_video_size_changed(&self, width: u32, height: u32, rotation_degrees: u32, pixel_ratio: f32);
    fn on_dropped_frames(&self, _count: u32, _elapsed_ms: u64) {}
}

/// Fatal load failures of a media source.
pub trait SourceLoadListener: Send + Sync {
    fn on_load_error(&self, error: &EngineError);
}

/// Progress of a media source's loads.
pub trait SourceEventListener: Send + Sync {
    fn on_load_started(&self, locator: &str);
    fn on_load_completed(&self, locator: &str, bytes_loaded: u64);
}

/// A timed subtitle cue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Sink for decoded subtitle cues.
pub trait TextOutput: Send + Sync {
    fn on_cues(&self, cues: &[Cue]);
}

/// The four listener bridges supplied on every load.
#[derive(Clone)]
pub struct ListenerBridges {
    pub engine_events: Arc<dyn EngineEventListener>,
    pub video_debug: Arc<dyn VideoDebugListener>,
    pub source_load: Arc<dyn SourceLoadListener>,
    pub source_events: Arc<dyn SourceEventListener>,
}

impl ListenerBridges {
    /// Use one object for all four bridges.
    pub fn from_shared<L>(listener: Arc<L>) -> Self
    where
        L: EngineEventListener + VideoDebugListener + SourceLoadListener + SourceEventListener + 'static,
    {
        Self {
            engine_events: listener.clone(),
            video_debug: listener.clone(),
            source_load: listener.clone(),
            source_events: listener,
        }
    }

    /// Bridges that drop every callback.
    pub fn silent() -> Self {
        Self::from_shared(Arc::new(SilentListener))
    }
}

/// Listener that ignores everything.
pub struct SilentListener;

impl EngineEventListener for SilentListener {
    fn on_player_state_changed(&self, _: bool, _: EngineState) {}
    fn on_player_error(&self, _: &EngineError) {}
}

impl VideoDebugListener for SilentListener {
    fn on_video_size_changed(&self, _: u32, _: u32, _: u32, _: f32) {}
}

impl SourceLoadListener for SilentListener {
    fn on_load_error(&self, _: &EngineError) {}
}

impl SourceEventListener for SilentListener {
    fn on_load_started(&self, _: &str) {}
    fn on_load_completed(&self, _: &str, _: u64) {}
}
