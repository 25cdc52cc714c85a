//! Headless engine — in-memory sessions with no decoding or output.
//!
//! Each session keeps its state behind a shared mutex so a `SessionProbe`
//! can observe it after the facade has taken ownership of the session.
//! Listener callbacks are dispatched after the state lock is dropped.
//!
//! Useful for headless hosts, demos and tests.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;

use crate::engine::{EngineSession, EngineSessionFactory};
use crate::error::EngineError;
use crate::listeners::{Cue, EngineEventListener, TextOutput, VideoDebugListener};
use crate::models::{EngineState, RendererType, SurfaceHandle, VideoDuration};
use crate::source::SourceDescription;

/// A command a headless session received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionOp {
    Prepare { locator: String, reset_position: bool, reset_state: bool },
    SetPlayWhenReady { play_when_ready: bool },
    Seek { position_ms: u64 },
    ClearSurface { surface: SurfaceHandle },
    SetSurface { surface: SurfaceHandle },
    SetTextOutput { bound: bool },
    Stop,
    Release,
}

struct SessionState {
    id: usize,
    state: EngineState,
    play_when_ready: bool,
    position_ms: u64,
    duration_ms: u64,
    buffered_percentage: u8,
    video_size: Option<(u32, u32)>,
    renderers: Vec<RendererType>,
    surface: Option<SurfaceHandle>,
    surface_binds: u32,
    text_output: Option<Arc<dyn TextOutput>>,
    locator: Option<String>,
    listeners: Vec<Arc<dyn EngineEventListener>>,
    debug_listener: Option<Arc<dyn VideoDebugListener>>,
    ops: Vec<SessionOp>,
    released: bool,
}

// ---------------------------------------------------------------------------
// Engine (factory)
// ---------------------------------------------------------------------------

/// Factory for headless sessions.
///
/// Defaults: video, audio and text renderers; unknown duration; nothing
/// buffered.
pub struct HeadlessEngine {
    renderers: Vec<RendererType>,
    duration: VideoDuration,
    buffered_percentage: u8,
    video_size: Option<(u32, u32)>,
    sessions: Mutex<Vec<SessionProbe>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            renderers: vec![RendererType::Video, RendererType::Audio, RendererType::Text],
            duration: VideoDuration::default(),
            buffered_percentage: 0,
            video_size: None,
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_renderers(mut self, renderers: Vec<RendererType>) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn with_duration(mut self, duration: VideoDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_buffered_percentage(mut self, percentage: u8) -> Self {
        self.buffered_percentage = percentage;
        self
    }

    /// Report this size to the video debug listener once prepared.
    pub fn with_video_size(mut self, width: u32, height: u32) -> Self {
        self.video_size = Some((width, height));
        self
    }

    /// Probes for every session created so far, oldest first.
    pub fn probes(&self) -> Vec<SessionProbe> {
        self.sessions.lock().clone()
    }

    pub fn last_probe(&self) -> Option<SessionProbe> {
        self.sessions.lock().last().cloned()
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineSessionFactory for HeadlessEngine {
    fn create(&self) -> Box<dyn EngineSession> {
        let mut sessions = self.sessions.lock();
        let state = Arc::new(Mutex::new(SessionState {
            id: sessions.len(),
            state: EngineState::Idle,
            play_when_ready: false,
            position_ms: 0,
            duration_ms: self.duration.in_millis(),
            buffered_percentage: self.buffered_percentage,
            video_size: self.video_size,
            renderers: self.renderers.clone(),
            surface: None,
            surface_binds: 0,
            text_output: None,
            locator: None,
            listeners: Vec::new(),
            debug_listener: None,
            ops: Vec::new(),
            released: false,
        }));
        log::debug!("noplayer: headless session {} created", sessions.len());
        sessions.push(SessionProbe {
            state: Arc::clone(&state),
        });
        Box::new(HeadlessSession { state })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct HeadlessSession {
    state: Arc<Mutex<SessionState>>,
}

impl HeadlessSession {
    /// Lock and log `op`, or `None` once the session is released.
    fn record(&self, op: SessionOp) -> Option<MutexGuard<'_, SessionState>> {
        let mut guard = self.state.lock();
        if guard.released {
            log::warn!("noplayer: headless session {} used after release: {:?}", guard.id, op);
            return None;
        }
        guard.ops.push(op);
        Some(guard)
    }
}

fn notify_state(listeners: &[Arc<dyn EngineEventListener>], play_when_ready: bool, state: EngineState) {
    for listener in listeners {
        listener.on_player_state_changed(play_when_ready, state);
    }
}

impl EngineSession for HeadlessSession {
    fn play_when_ready(&self) -> bool {
        self.state.lock().play_when_ready
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        let Some(mut s) = self.record(SessionOp::SetPlayWhenReady { play_when_ready }) else {
            return;
        };
        if s.play_when_ready == play_when_ready {
            return;
        }
        s.play_when_ready = play_when_ready;
        let (listeners, state) = (s.listeners.clone(), s.state);
        drop(s);
        notify_state(&listeners, play_when_ready, state);
    }

    fn current_position_ms(&self) -> u64 {
        self.state.lock().position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.state.lock().duration_ms
    }

    fn buffered_percentage(&self) -> u8 {
        self.state.lock().buffered_percentage
    }

    fn clear_video_surface(&mut self, surface: &SurfaceHandle) {
        if let Some(mut s) = self.record(SessionOp::ClearSurface { surface: surface.clone() }) {
            if s.surface.as_ref() == Some(surface) {
                s.surface = None;
            }
        }
    }

    fn set_video_surface(&mut self, surface: SurfaceHandle) {
        if let Some(mut s) = self.record(SessionOp::SetSurface { surface: surface.clone() }) {
            s.surface = Some(surface);
            s.surface_binds += 1;
        }
    }

    fn set_text_output(&mut self, output: Option<Arc<dyn TextOutput>>) {
        if let Some(mut s) = self.record(SessionOp::SetTextOutput { bound: output.is_some() }) {
            s.text_output = output;
        }
    }

    fn add_listener(&mut self, listener: Arc<dyn EngineEventListener>) {
        self.state.lock().listeners.push(listener);
    }

    fn set_video_debug_listener(&mut self, listener: Arc<dyn VideoDebugListener>) {
        self.state.lock().debug_listener = Some(listener);
    }

    fn prepare(&mut self, source: SourceDescription, reset_position: bool, reset_state: bool) {
        let op = SessionOp::Prepare {
            locator: source.locator.clone(),
            reset_position,
            reset_state,
        };
        let Some(mut s) = self.record(op) else {
            return;
        };
        if reset_position {
            s.position_ms = 0;
        }
        s.locator = Some(source.locator.clone());
        let listeners = s.listeners.clone();
        let debug_listener = s.debug_listener.clone();
        let play_when_ready = s.play_when_ready;
        let video_size = s.video_size.filter(|_| s.renderers.contains(&RendererType::Video));
        let loadable = !source.locator.is_empty();
        s.state = if loadable { EngineState::Ready } else { EngineState::Idle };
        drop(s);

        source.event_listener.on_load_started(&source.locator);

        if !loadable {
            let error = EngineError::load_failure("nothing to load: empty locator");
            source.load_listener.on_load_error(&error);
            for listener in &listeners {
                listener.on_player_error(&error);
            }
            return;
        }

        notify_state(&listeners, play_when_ready, EngineState::Buffering);
        source.event_listener.on_load_completed(&source.locator, 0);
        notify_state(&listeners, play_when_ready, EngineState::Ready);
        if let (Some(debug), Some((width, height))) = (debug_listener, video_size) {
            debug.on_video_size_changed(width, height, 0, 1.0);
        }
    }

    fn seek_to(&mut self, position_ms: u64) {
        let Some(mut s) = self.record(SessionOp::Seek { position_ms }) else {
            return;
        };
        s.position_ms = if s.duration_ms > 0 {
            position_ms.min(s.duration_ms)
        } else {
            position_ms
        };
        let listeners = s.listeners.clone();
        drop(s);
        for listener in &listeners {
            listener.on_position_discontinuity();
        }
    }

    fn stop(&mut self) {
        let Some(mut s) = self.record(SessionOp::Stop) else {
            return;
        };
        s.state = EngineState::Idle;
        let (listeners, play_when_ready) = (s.listeners.clone(), s.play_when_ready);
        drop(s);
        notify_state(&listeners, play_when_ready, EngineState::Idle);
    }

    fn release(&mut self) {
        if let Some(mut s) = self.record(SessionOp::Release) {
            s.released = true;
            s.state = EngineState::Idle;
            s.surface = None;
            s.text_output = None;
            s.listeners.clear();
            s.debug_listener = None;
            log::debug!("noplayer: headless session {} released", s.id);
        }
    }

    fn renderer_type(&self, index: usize) -> RendererType {
        self.state
            .lock()
            .renderers
            .get(index)
            .copied()
            .unwrap_or(RendererType::Unknown)
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

/// Read-only view of a headless session, plus hooks to drive engine-side
/// events (cues, end of stream).
#[derive(Clone)]
pub struct SessionProbe {
    state: Arc<Mutex<SessionState>>,
}

impl SessionProbe {
    pub fn id(&self) -> usize {
        self.state.lock().id
    }

    pub fn ops(&self) -> Vec<SessionOp> {
        self.state.lock().ops.clone()
    }

    pub fn engine_state(&self) -> EngineState {
        self.state.lock().state
    }

    pub fn play_when_ready(&self) -> bool {
        self.state.lock().play_when_ready
    }

    pub fn position_ms(&self) -> u64 {
        self.state.lock().position_ms
    }

    pub fn locator(&self) -> Option<String> {
        self.state.lock().locator.clone()
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.state.lock().surface.clone()
    }

    /// How many times a surface was attached.
    pub fn surface_binds(&self) -> u32 {
        self.state.lock().surface_binds
    }

    pub fn has_text_output(&self) -> bool {
        self.state.lock().text_output.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.state.lock().released
    }

    /// Deliver `cues` to the bound text output. Returns false when none is bound.
    pub fn emit_cues(&self, cues: &[Cue]) -> bool {
        let output = self.state.lock().text_output.clone();
        match output {
            Some(output) => {
                output.on_cues(cues);
                true
            }
            None => false,
        }
    }

    /// Play to the end of the stream.
    pub fn complete(&self) {
        let mut s = self.state.lock();
        if s.released {
            return;
        }
        s.state = EngineState::Ended;
        s.position_ms = s.duration_ms;
        let (listeners, play_when_ready) = (s.listeners.clone(), s.play_when_ready);
        drop(s);
        notify_state(&listeners, play_when_ready, EngineState::Ended);
    }
}
