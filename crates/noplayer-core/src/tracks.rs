//! Track selection contracts.
//!
//! Selectors discover renderer topology only through a
//! `RendererTypeRequester`, which fails with `NotLoaded` when no session is
//! active.

use crate::error::PlayerResult;
use crate::models::{PlayerAudioTrack, PlayerSubtitleTrack, RendererType};

/// Looks up the media type of a renderer in the active session.
pub trait RendererTypeRequester {
    fn renderer_type_for(&self, index: usize) -> PlayerResult<RendererType>;
}

pub trait AudioTrackSelector: Send + Sync {
    fn select_audio_track(&self, track: &PlayerAudioTrack, requester: &dyn RendererTypeRequester) -> PlayerResult<()>;
    fn audio_tracks(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<Vec<PlayerAudioTrack>>;
}

pub trait SubtitleTrackSelector: Send + Sync {
    fn select_text_track(&self, track: &PlayerSubtitleTrack, requester: &dyn RendererTypeRequester) -> PlayerResult<()>;
    fn subtitle_tracks(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<Vec<PlayerSubtitleTrack>>;
    fn clear_subtitle_track(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<()>;
    /// Returns whether a track was found and selected.
    fn select_first_text_track(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<bool>;
}
