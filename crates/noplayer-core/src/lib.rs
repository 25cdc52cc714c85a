//! noplayer-core — playback-control facade over an adaptive-streaming engine.
//!
//! Application code talks to `PlaybackFacade`. The facade owns at most one
//! engine session and hides its construction, listener wiring and renderer
//! discovery.
//!
//! # Architecture
//!
//! ```text
//! Layer 0: Collaborator traits (EngineSession, MediaSourceResolver, selectors)
//! Layer 1: PlaybackFacade (lifecycle, loaded/unloaded guard, sticky subtitle output)
//! Layer 2: EventForwarder (engine callbacks -> PlayerEvent)
//! Layer 3: Hosts (CLI, apps) supplying surfaces, sinks and subscribers
//! ```

#[cfg(feature = "headless")]
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod forwarder;
pub mod listeners;
pub mod models;
pub mod source;
pub mod tracks;

pub use config::{PlayerConfig, ReloadPolicy};
pub use engine::{EngineSession, EngineSessionFactory};
pub use error::{EngineError, EngineErrorKind, PlayerError, PlayerResult};
pub use facade::PlaybackFacade;
pub use forwarder::EventForwarder;
pub use listeners::{Cue, ListenerBridges, TextOutput};
pub use models::*;
pub use source::{DefaultSourceResolver, MediaSourceResolver, SourceDescription};
pub use tracks::{AudioTrackSelector, RendererTypeRequester, SubtitleTrackSelector};

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use crate::backend::{CatalogTrackSelector, HeadlessEngine, RendererTracks, SessionOp, TrackFormat};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Harness {
        engine: Arc<HeadlessEngine>,
        selector: Arc<CatalogTrackSelector>,
        facade: PlaybackFacade,
    }

    fn harness_with(engine: HeadlessEngine, config: PlayerConfig) -> Harness {
        let engine = Arc::new(engine);
        let selector = Arc::new(CatalogTrackSelector::new(vec![
            RendererTracks {
                renderer_index: 1,
                formats: vec![TrackFormat::new("audio-en", Some("en"), "audio/mp4a-latm").with_audio(2, 44_100)],
            },
            RendererTracks {
                renderer_index: 2,
                formats: vec![TrackFormat::new("subs-en", Some("en"), "text/vtt")],
            },
        ]));
        let facade = PlaybackFacade::with_config(
            engine.clone(),
            Arc::new(DefaultSourceResolver),
            selector.clone(),
            selector.clone(),
            config,
        );
        Harness { engine, selector, facade }
    }

    fn harness() -> Harness {
        harness_with(
            HeadlessEngine::new()
                .with_duration(VideoDuration::from_millis(120_000))
                .with_buffered_percentage(35),
            PlayerConfig::default(),
        )
    }

    fn load(facade: &mut PlaybackFacade) {
        facade
            .load("a.mp4", ContentType::Progressive, &ListenerBridges::silent())
            .expect("load");
    }

    /// Text output that remembers every cue it was handed.
    #[derive(Default)]
    struct RecordingOutput {
        cues: Mutex<Vec<Cue>>,
    }

    impl TextOutput for RecordingOutput {
        fn on_cues(&self, cues: &[Cue]) {
            self.cues.lock().extend_from_slice(cues);
        }
    }

    fn cue(text: &str) -> Cue {
        Cue {
            text: text.into(),
            start_ms: 0,
            end_ms: 1_000,
        }
    }

    fn assert_gated_operations_fail(h: &mut Harness) {
        let surface = SurfaceHandle(1);
        let audio = PlayerAudioTrack {
            group_index: 1,
            format_index: 0,
            track_id: "audio-en".into(),
            language: Some("en".into()),
            mime_type: "audio/mp4a-latm".into(),
            channels: Some(2),
            sample_rate: Some(44_100),
        };
        let subtitle = PlayerSubtitleTrack {
            group_index: 2,
            format_index: 0,
            track_id: "subs-en".into(),
            language: Some("en".into()),
            mime_type: "text/vtt".into(),
        };
        let f = &mut h.facade;

        assert!(f.play(&surface).unwrap_err().is_not_loaded());
        assert!(f.play_from(&surface, VideoPosition::from_millis(5_000)).unwrap_err().is_not_loaded());
        assert!(f.pause().unwrap_err().is_not_loaded());
        assert!(f.seek_to(VideoPosition::from_millis(1)).unwrap_err().is_not_loaded());
        assert!(f.stop().unwrap_err().is_not_loaded());
        assert!(f.playhead_position().unwrap_err().is_not_loaded());
        assert!(f.media_duration().unwrap_err().is_not_loaded());
        assert!(f.buffer_percentage().unwrap_err().is_not_loaded());
        assert!(f.audio_tracks().unwrap_err().is_not_loaded());
        assert!(f.select_audio_track(&audio).unwrap_err().is_not_loaded());
        assert!(f.subtitle_tracks().unwrap_err().is_not_loaded());
        assert!(f.select_subtitle_track(&subtitle).unwrap_err().is_not_loaded());
        assert!(f.clear_subtitle_track().unwrap_err().is_not_loaded());
        assert!(f.select_first_available_subtitles_track().unwrap_err().is_not_loaded());
        assert!(f.renderer_types().renderer_type_for(0).unwrap_err().is_not_loaded());

        assert!(!f.is_playing());
        assert!(!f.has_played_content());
    }

    #[test]
    fn everything_but_queries_fails_before_load() {
        let mut h = harness();
        assert_gated_operations_fail(&mut h);
        assert!(h.engine.probes().is_empty(), "no engine work before load");
    }

    #[test]
    fn loaded_until_released() {
        let mut h = harness();
        load(&mut h.facade);
        assert!(h.facade.has_played_content());

        h.facade.pause().unwrap();
        h.facade.stop().unwrap();
        assert!(h.facade.has_played_content(), "stop keeps the session");

        h.facade.release();
        assert!(!h.facade.has_played_content());
        assert!(h.engine.last_probe().unwrap().is_released());
    }

    #[test]
    fn release_restores_unloaded_behavior() {
        let mut h = harness();
        load(&mut h.facade);
        h.facade.release();
        h.facade.release();
        assert_gated_operations_fail(&mut h);
    }

    #[test]
    fn load_prepares_with_reset_position_and_kept_state() {
        let mut h = harness();
        load(&mut h.facade);

        let probe = h.engine.last_probe().unwrap();
        assert_eq!(
            probe.ops(),
            vec![SessionOp::Prepare {
                locator: "a.mp4".into(),
                reset_position: true,
                reset_state: false,
            }]
        );
        assert!(!h.facade.is_playing(), "load does not start playback");
    }

    #[test]
    fn fresh_load_reports_zero_position() {
        let mut h = harness();
        load(&mut h.facade);
        assert_eq!(h.facade.playhead_position().unwrap(), VideoPosition::from_millis(0));
        assert_eq!(h.facade.media_duration().unwrap(), VideoDuration::from_millis(120_000));
        assert_eq!(h.facade.buffer_percentage().unwrap(), 35);
    }

    #[test]
    fn buffer_percentage_is_capped() {
        let mut h = harness_with(HeadlessEngine::new().with_buffered_percentage(140), PlayerConfig::default());
        load(&mut h.facade);
        assert_eq!(h.facade.buffer_percentage().unwrap(), 100);
    }

    #[test]
    fn pause_after_load_is_not_playing() {
        let mut h = harness();
        load(&mut h.facade);
        h.facade.play(&SurfaceHandle(7)).unwrap();
        assert!(h.facade.is_playing());
        h.facade.pause().unwrap();
        assert!(!h.facade.is_playing());
    }

    #[test]
    fn subtitle_output_set_before_load_is_bound_on_load() {
        let mut h = harness();
        let output = Arc::new(RecordingOutput::default());
        h.facade.set_subtitle_renderer_output(output.clone());

        load(&mut h.facade);

        let probe = h.engine.last_probe().unwrap();
        assert!(probe.has_text_output());
        assert!(probe.emit_cues(&[cue("hello")]));
        assert_eq!(output.cues.lock().len(), 1);
    }

    #[test]
    fn latest_subtitle_output_survives_reload() {
        let mut h = harness();
        let first = Arc::new(RecordingOutput::default());
        let second = Arc::new(RecordingOutput::default());

        h.facade.set_subtitle_renderer_output(first.clone());
        load(&mut h.facade);
        h.facade.set_subtitle_renderer_output(second.clone());
        h.facade.release();
        load(&mut h.facade);

        let probes = h.engine.probes();
        assert_eq!(probes.len(), 2);
        assert!(probes[1].emit_cues(&[cue("again")]));
        assert!(first.cues.lock().is_empty());
        assert_eq!(second.cues.lock().as_slice(), &[cue("again")]);
    }

    #[test]
    fn subtitle_output_applies_to_active_session_immediately() {
        let mut h = harness();
        load(&mut h.facade);
        let probe = h.engine.last_probe().unwrap();
        assert!(!probe.has_text_output());

        h.facade.set_subtitle_renderer_output(Arc::new(RecordingOutput::default()));
        assert!(probe.has_text_output());
    }

    #[test]
    fn play_from_is_seek_then_play() {
        let surface = SurfaceHandle(3);
        let mut composite = harness();
        load(&mut composite.facade);
        composite
            .facade
            .play_from(&surface, VideoPosition::from_millis(5_000))
            .unwrap();

        let mut manual = harness();
        load(&mut manual.facade);
        manual.facade.seek_to(VideoPosition::from_millis(5_000)).unwrap();
        manual.facade.play(&surface).unwrap();

        let composite_probe = composite.engine.last_probe().unwrap();
        let manual_probe = manual.engine.last_probe().unwrap();
        assert_eq!(composite_probe.ops(), manual_probe.ops());
        assert_eq!(composite.facade.playhead_position().unwrap(), VideoPosition::from_millis(5_000));
        assert!(composite.facade.is_playing());
    }

    #[test]
    fn play_twice_rebinds_without_accumulating() {
        let mut h = harness();
        load(&mut h.facade);
        let surface = SurfaceHandle(9);

        h.facade.play(&surface).unwrap();
        h.facade.play(&surface).unwrap();

        let probe = h.engine.last_probe().unwrap();
        assert_eq!(probe.surface(), Some(surface.clone()));
        assert_eq!(probe.surface_binds(), 2);
        let clears = probe
            .ops()
            .iter()
            .filter(|op| matches!(op, SessionOp::ClearSurface { .. }))
            .count();
        assert_eq!(clears, 2);
        assert!(probe.play_when_ready());
    }

    #[test]
    fn seek_keeps_play_intent() {
        let mut h = harness();
        load(&mut h.facade);
        h.facade.play(&SurfaceHandle(1)).unwrap();
        h.facade.seek_to(VideoPosition::from_millis(30_000)).unwrap();
        assert!(h.facade.is_playing());
        assert_eq!(h.facade.playhead_position().unwrap().in_millis(), 30_000);
    }

    #[test]
    fn reload_releases_previous_session_by_default() {
        let mut h = harness();
        load(&mut h.facade);
        load(&mut h.facade);

        let probes = h.engine.probes();
        assert_eq!(probes.len(), 2);
        assert!(probes[0].is_released());
        assert!(!probes[1].is_released());
    }

    #[test]
    fn reload_is_rejected_under_reject_policy() {
        let mut h = harness_with(
            HeadlessEngine::new(),
            PlayerConfig {
                reload: ReloadPolicy::Reject,
            },
        );
        assert_eq!(h.facade.config().reload, ReloadPolicy::Reject);
        load(&mut h.facade);
        let err = h
            .facade
            .load("b.mp4", ContentType::Progressive, &ListenerBridges::silent())
            .unwrap_err();

        assert!(matches!(err, PlayerError::AlreadyLoaded));
        assert_eq!(h.engine.probes().len(), 1);
        assert!(!h.engine.last_probe().unwrap().is_released());

        h.facade.release();
        h.facade
            .load("b.mp4", ContentType::Progressive, &ListenerBridges::silent())
            .unwrap();
        assert_eq!(h.engine.last_probe().unwrap().locator().as_deref(), Some("b.mp4"));
    }

    #[test]
    fn track_selection_goes_through_selector() {
        let mut h = harness();
        load(&mut h.facade);

        let audio = h.facade.audio_tracks().unwrap();
        assert_eq!(audio.len(), 1);
        h.facade.select_audio_track(&audio[0]).unwrap();
        assert_eq!(h.selector.selected_audio_track().as_deref(), Some("audio-en"));

        assert!(h.facade.select_first_available_subtitles_track().unwrap());
        assert_eq!(h.selector.selected_subtitle_track().as_deref(), Some("subs-en"));
        h.facade.clear_subtitle_track().unwrap();
        assert!(h.selector.subtitles_disabled());

        let subs = h.facade.subtitle_tracks().unwrap();
        h.facade.select_subtitle_track(&subs[0]).unwrap();
        assert!(!h.selector.subtitles_disabled());
    }

    #[test]
    fn requester_follows_the_current_session() {
        let mut h = harness();
        load(&mut h.facade);
        assert_eq!(h.facade.renderer_types().renderer_type_for(1).unwrap(), RendererType::Audio);
        h.facade.release();
        assert!(h.facade.renderer_types().renderer_type_for(1).is_err());
    }

    fn collecting_forwarder() -> (Arc<EventForwarder>, Arc<Mutex<Vec<PlayerEvent>>>) {
        let forwarder = EventForwarder::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        forwarder.subscribe(move |event| sink.lock().push(event.clone()));
        (forwarder, seen)
    }

    #[test]
    fn engine_events_reach_forwarder_subscribers() {
        let mut h = harness_with(
            HeadlessEngine::new()
                .with_duration(VideoDuration::from_millis(120_000))
                .with_video_size(640, 360),
            PlayerConfig::default(),
        );
        let (forwarder, seen) = collecting_forwarder();

        h.facade
            .load("a.mp4", ContentType::Progressive, &forwarder.bridges())
            .unwrap();
        h.facade.play(&SurfaceHandle(1)).unwrap();
        h.engine.last_probe().unwrap().complete();

        let seen = seen.lock();
        assert_eq!(seen.first(), Some(&PlayerEvent::SourceLoadStarted { locator: "a.mp4".into() }));
        assert!(seen.contains(&PlayerEvent::SourceLoadCompleted {
            locator: "a.mp4".into(),
            bytes_loaded: 0,
        }));
        assert!(seen.contains(&PlayerEvent::Prepared));
        assert!(seen.contains(&PlayerEvent::VideoSizeChanged {
            width: 640,
            height: 360,
            rotation_degrees: 0,
            pixel_ratio: 1.0,
        }));
        assert!(seen.contains(&PlayerEvent::StateChanged { playing: true }));
        assert_eq!(seen.last(), Some(&PlayerEvent::Completed));
    }

    #[test]
    fn empty_locator_reaches_load_error_bridge() {
        let mut h = harness();
        let (forwarder, seen) = collecting_forwarder();

        h.facade.load("  ", ContentType::Progressive, &forwarder.bridges()).unwrap();

        let errors = seen
            .lock()
            .iter()
            .filter(|e| matches!(e, PlayerEvent::Error { kind: EngineErrorKind::Source, .. }))
            .count();
        assert_eq!(errors, 2, "source load bridge and engine bridge");
        assert!(h.facade.has_played_content(), "load failures arrive as events only");
    }

    #[test]
    fn shared_bridges_report_prepared_for_every_load() {
        let mut h = harness();
        let (forwarder, seen) = collecting_forwarder();
        let bridges = forwarder.bridges();

        h.facade.load("a.mp4", ContentType::Progressive, &bridges).unwrap();
        h.facade.release();
        h.facade.load("b.mp4", ContentType::Progressive, &bridges).unwrap();
        h.facade.load("c.mp4", ContentType::Progressive, &bridges).unwrap();

        let prepared = seen.lock().iter().filter(|e| **e == PlayerEvent::Prepared).count();
        assert_eq!(prepared, 3);
        let ids: Vec<usize> = h.engine.probes().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn dropping_facade_releases_session() {
        let mut h = harness();
        load(&mut h.facade);
        let probe = h.engine.last_probe().unwrap();
        drop(h.facade);
        assert!(probe.is_released());
    }
}
