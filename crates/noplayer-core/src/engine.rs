//! Engine session contract.
//!
//! The facade drives one `EngineSession` at a time and only through this
//! trait. Implementations manage their own decoding, buffering and threads.

use std::sync::Arc;

use crate::listeners::{EngineEventListener, TextOutput, VideoDebugListener};
use crate::models::{RendererType, SurfaceHandle};
use crate::source::SourceDescription;

/// One instance of the underlying media engine.
pub trait EngineSession: Send {
    fn play_when_ready(&self) -> bool;
    fn set_play_when_ready(&mut self, play_when_ready: bool);

    fn current_position_ms(&self) -> u64;
    /// 0 while the duration is unknown.
    fn duration_ms(&self) -> u64;
    fn buffered_percentage(&self) -> u8;

    /// Detach `surface` if it is the one currently attached.
    fn clear_video_surface(&mut self, surface: &SurfaceHandle);
    fn set_video_surface(&mut self, surface: SurfaceHandle);
    fn set_text_output(&mut self, output: Option<Arc<dyn TextOutput>>);

    fn add_listener(&mut self, listener: Arc<dyn EngineEventListener>);
    fn set_video_debug_listener(&mut self, listener: Arc<dyn VideoDebugListener>);

    fn prepare(&mut self, source: SourceDescription, reset_position: bool, reset_state: bool);
    fn seek_to(&mut self, position_ms: u64);
    fn stop(&mut self);
    fn release(&mut self);

    /// Media type of the renderer at `index`; `Unknown` when out of range.
    fn renderer_type(&self, index: usize) -> RendererType;
}

/// Produces fresh, ready-to-prepare sessions.
pub trait EngineSessionFactory: Send + Sync {
    fn create(&self) -> Box<dyn EngineSession>;
}
