//! Event forwarder — folds raw engine callbacks into `PlayerEvent`s.
//!
//! One forwarder serves all four listener bridges. Events are published on
//! the caller's thread, in arrival order. Subscribers run without any
//! forwarder lock held, so they may subscribe or query from inside a
//! callback.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::EngineError;
use crate::listeners::{
    EngineEventListener, ListenerBridges, SourceEventListener, SourceLoadListener, VideoDebugListener,
};
use crate::models::{EngineState, PlayerEvent};

type Subscriber = Arc<dyn Fn(&PlayerEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct Tracker {
    prepared: bool,
    buffering: bool,
    play_when_ready: bool,
}

#[derive(Default)]
pub struct EventForwarder {
    subscribers: Mutex<Vec<Subscriber>>,
    tracker: Mutex<Tracker>,
}

impl EventForwarder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe(&self, subscriber: impl Fn(&PlayerEvent) + Send + Sync + 'static) {
        self.subscribers.lock().push(Arc::new(subscriber));
    }

    /// Bridges that route every engine callback through this forwarder.
    pub fn bridges(self: &Arc<Self>) -> ListenerBridges {
        ListenerBridges::from_shared(Arc::clone(self))
    }

    fn publish(&self, events: Vec<PlayerEvent>) {
        if events.is_empty() {
            return;
        }
        let subscribers: Vec<Subscriber> = self.subscribers.lock().clone();
        for event in &events {
            log::debug!("noplayer: event {:?}", event);
            for subscriber in &subscribers {
                subscriber(event);
            }
        }
    }

    fn error_event(error: &EngineError) -> PlayerEvent {
        log::warn!("noplayer: engine reported {}", error);
        PlayerEvent::Error {
            kind: error.kind,
            message: error.message.clone(),
        }
    }
}

impl EngineEventListener for EventForwarder {
    fn on_player_state_changed(&self, play_when_ready: bool, state: EngineState) {
        let mut events = Vec::new();
        {
            let mut tracker = self.tracker.lock();
            match state {
                EngineState::Idle => {
                    tracker.prepared = false;
                    tracker.buffering = false;
                }
                EngineState::Buffering => {
                    if !tracker.buffering {
                        tracker.buffering = true;
                        events.push(PlayerEvent::BufferingStarted);
                    }
                }
                EngineState::Ready => {
                    if tracker.buffering {
                        tracker.buffering = false;
                        events.push(PlayerEvent::BufferingEnded);
                    }
                    if !tracker.prepared {
                        tracker.prepared = true;
                        events.push(PlayerEvent::Prepared);
                    }
                }
                EngineState::Ended => {
                    tracker.buffering = false;
                    events.push(PlayerEvent::Completed);
                }
            }
            if tracker.play_when_ready != play_when_ready {
                tracker.play_when_ready = play_when_ready;
                events.push(PlayerEvent::StateChanged { playing: play_when_ready });
            }
        }
        self.publish(events);
    }

    fn on_player_error(&self, error: &EngineError) {
        self.publish(vec![Self::error_event(error)]);
    }

    fn on_position_discontinuity(&self) {
        self.publish(vec![PlayerEvent::PositionDiscontinuity]);
    }
}

impl VideoDebugListener for EventForwarder {
    fn on_video_size_changed(&self, width: u32, height: u32, rotation_degrees: u32, pixel_ratio: f32) {
        self.publish(vec![PlayerEvent::VideoSizeChanged {
            width,
            height,
            rotation_degrees,
            pixel_ratio,
        }]);
    }

    fn on_dropped_frames(&self, count: u32, elapsed_ms: u64) {
        self.publish(vec![PlayerEvent::DroppedFrames { count, elapsed_ms }]);
    }
}

impl SourceLoadListener for EventForwarder {
    fn on_load_error(&self, error: &EngineError) {
        self.publish(vec![Self::error_event(error)]);
    }
}

impl SourceEventListener for EventForwarder {
    fn on_load_started(&self, locator: &str) {
        // A new source starts a new session; nothing carries over.
        *self.tracker.lock() = Tracker::default();
        self.publish(vec![PlayerEvent::SourceLoadStarted {
            locator: locator.to_string(),
        }]);
    }

    fn on_load_completed(&self, locator: &str, bytes_loaded: u64) {
        self.publish(vec![PlayerEvent::SourceLoadCompleted {
            locator: locator.to_string(),
            bytes_loaded,
        }]);
    }
}
