//! noplayer data models.
//!
//! Value types and descriptors only. Nothing here talks to an engine.

pub mod event;
pub mod media;
pub mod time;
pub mod track;

pub use event::{EngineState, PlayerEvent};
pub use media::{ContentType, RendererType, SurfaceHandle};
pub use time::{VideoDuration, VideoPosition};
pub use track::{PlayerAudioTrack, PlayerSubtitleTrack};
