//! Playback facade — the control surface applications talk to.
//!
//! Owns at most one engine session. Every operation except `load`,
//! `release`, `has_played_content`, `is_playing` and
//! `set_subtitle_renderer_output` goes through `session()` /
//! `session_mut()` and fails with `NotLoaded` before touching the engine
//! when nothing is loaded.
//!
//! The subtitle output outlives sessions: it is reapplied on every load
//! until replaced.

use std::sync::Arc;

use crate::config::{PlayerConfig, ReloadPolicy};
use crate::engine::{EngineSession, EngineSessionFactory};
use crate::error::{PlayerError, PlayerResult};
use crate::listeners::{ListenerBridges, TextOutput};
use crate::models::{
    ContentType, PlayerAudioTrack, PlayerSubtitleTrack, RendererType, SurfaceHandle, VideoDuration,
    VideoPosition,
};
use crate::source::MediaSourceResolver;
use crate::tracks::{AudioTrackSelector, RendererTypeRequester, SubtitleTrackSelector};

const RESET_POSITION: bool = true;
const DO_NOT_RESET_STATE: bool = false;

pub struct PlaybackFacade {
    factory: Arc<dyn EngineSessionFactory>,
    resolver: Arc<dyn MediaSourceResolver>,
    audio_selector: Arc<dyn AudioTrackSelector>,
    subtitle_selector: Arc<dyn SubtitleTrackSelector>,
    config: PlayerConfig,
    session: Option<Box<dyn EngineSession>>,
    subtitle_output: Option<Arc<dyn TextOutput>>,
}

impl PlaybackFacade {
    pub fn new(
        factory: Arc<dyn EngineSessionFactory>,
        resolver: Arc<dyn MediaSourceResolver>,
        audio_selector: Arc<dyn AudioTrackSelector>,
        subtitle_selector: Arc<dyn SubtitleTrackSelector>,
    ) -> Self {
        Self::with_config(factory, resolver, audio_selector, subtitle_selector, PlayerConfig::default())
    }

    pub fn with_config(
        factory: Arc<dyn EngineSessionFactory>,
        resolver: Arc<dyn MediaSourceResolver>,
        audio_selector: Arc<dyn AudioTrackSelector>,
        subtitle_selector: Arc<dyn SubtitleTrackSelector>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            factory,
            resolver,
            audio_selector,
            subtitle_selector,
            config,
            session: None,
            subtitle_output: None,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Create a session, wire the bridges and prepare `locator`.
    ///
    /// Playback does not start. The position is reset, selected track state
    /// is kept.
    pub fn load(&mut self, locator: &str, content_type: ContentType, bridges: &ListenerBridges) -> PlayerResult<()> {
        if self.session.is_some() {
            match self.config.reload {
                ReloadPolicy::Reject => return Err(PlayerError::AlreadyLoaded),
                ReloadPolicy::ReleasePrevious => {
                    log::warn!("noplayer: load while a session is active, releasing it first");
                    self.release();
                }
            }
        }

        log::info!("noplayer: loading {} ({})", locator, content_type);
        let mut session = self.factory.create();
        session.add_listener(bridges.engine_events.clone());
        session.set_video_debug_listener(bridges.video_debug.clone());
        let source = self.resolver.resolve(
            content_type,
            locator,
            bridges.source_load.clone(),
            bridges.source_events.clone(),
        );
        session.prepare(source, RESET_POSITION, DO_NOT_RESET_STATE);
        if let Some(output) = &self.subtitle_output {
            session.set_text_output(Some(Arc::clone(output)));
        }
        self.session = Some(session);
        Ok(())
    }

    /// Release the active session, if any.
    pub fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            log::info!("noplayer: releasing session");
            session.release();
        }
    }

    pub fn has_played_content(&self) -> bool {
        self.session.is_some()
    }

    // -----------------------------------------------------------------------
    // Playback commands
    // -----------------------------------------------------------------------

    /// Rebind `surface` and start playing.
    pub fn play(&mut self, surface: &SurfaceHandle) -> PlayerResult<()> {
        let session = self.session_mut()?;
        session.clear_video_surface(surface);
        session.set_video_surface(surface.clone());
        session.set_play_when_ready(true);
        Ok(())
    }

    pub fn play_from(&mut self, surface: &SurfaceHandle, position: VideoPosition) -> PlayerResult<()> {
        self.seek_to(position)?;
        self.play(surface)
    }

    pub fn pause(&mut self) -> PlayerResult<()> {
        self.session_mut()?.set_play_when_ready(false);
        Ok(())
    }

    pub fn seek_to(&mut self, position: VideoPosition) -> PlayerResult<()> {
        log::debug!("noplayer: seek to {}ms", position.in_millis());
        self.session_mut()?.seek_to(position.in_millis());
        Ok(())
    }

    /// Stop playback. The session stays loaded.
    pub fn stop(&mut self) -> PlayerResult<()> {
        self.session_mut()?.stop();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// False when nothing is loaded.
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.play_when_ready())
    }

    pub fn playhead_position(&self) -> PlayerResult<VideoPosition> {
        Ok(VideoPosition::from_millis(self.session()?.current_position_ms()))
    }

    pub fn media_duration(&self) -> PlayerResult<VideoDuration> {
        Ok(VideoDuration::from_millis(self.session()?.duration_ms()))
    }

    pub fn buffer_percentage(&self) -> PlayerResult<u8> {
        Ok(self.session()?.buffered_percentage().min(100))
    }

    // -----------------------------------------------------------------------
    // Tracks
    // -----------------------------------------------------------------------

    pub fn select_audio_track(&self, track: &PlayerAudioTrack) -> PlayerResult<()> {
        self.audio_selector.select_audio_track(track, &self.renderer_types())
    }

    pub fn audio_tracks(&self) -> PlayerResult<Vec<PlayerAudioTrack>> {
        self.audio_selector.audio_tracks(&self.renderer_types())
    }

    pub fn select_subtitle_track(&self, track: &PlayerSubtitleTrack) -> PlayerResult<()> {
        self.subtitle_selector.select_text_track(track, &self.renderer_types())
    }

    pub fn subtitle_tracks(&self) -> PlayerResult<Vec<PlayerSubtitleTrack>> {
        self.subtitle_selector.subtitle_tracks(&self.renderer_types())
    }

    pub fn clear_subtitle_track(&self) -> PlayerResult<()> {
        self.subtitle_selector.clear_subtitle_track(&self.renderer_types())
    }

    pub fn select_first_available_subtitles_track(&self) -> PlayerResult<bool> {
        self.subtitle_selector.select_first_text_track(&self.renderer_types())
    }

    /// Remember `output` for every future session and bind it to the active
    /// one, if any.
    pub fn set_subtitle_renderer_output(&mut self, output: Arc<dyn TextOutput>) {
        self.subtitle_output = Some(Arc::clone(&output));
        if let Some(session) = self.session.as_mut() {
            session.set_text_output(Some(output));
        }
    }

    /// Requester bound to whatever session is active when it is called.
    pub fn renderer_types(&self) -> SessionRendererTypes<'_> {
        SessionRendererTypes { session: &self.session }
    }

    // -----------------------------------------------------------------------
    // Session access
    // -----------------------------------------------------------------------

    fn session(&self) -> PlayerResult<&(dyn EngineSession + 'static)> {
        self.session.as_deref().ok_or(PlayerError::NotLoaded)
    }

    fn session_mut(&mut self) -> PlayerResult<&mut (dyn EngineSession + 'static)> {
        self.session.as_deref_mut().ok_or(PlayerError::NotLoaded)
    }
}

impl Drop for PlaybackFacade {
    fn drop(&mut self) {
        self.release();
    }
}

/// `RendererTypeRequester` that reads the facade's session slot on every
/// call.
pub struct SessionRendererTypes<'a> {
    session: &'a Option<Box<dyn EngineSession>>,
}

impl RendererTypeRequester for SessionRendererTypes<'_> {
    fn renderer_type_for(&self, index: usize) -> PlayerResult<RendererType> {
        let session = self.session.as_deref().ok_or(PlayerError::NotLoaded)?;
        Ok(session.renderer_type(index))
    }
}
