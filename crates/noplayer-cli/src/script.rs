//! Scripted facade commands.
//!
//! A script is a JSON array of `{"action": ...}` objects. Each command runs
//! against the facade and yields one JSON result line; a failing command
//! (e.g. `NotLoaded`) is reported and the script carries on.

use noplayer_core::{
    ContentType, ListenerBridges, PlaybackFacade, PlayerAudioTrack, PlayerResult, PlayerSubtitleTrack,
    SurfaceHandle, VideoPosition,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptCommand {
    Load {
        locator: String,
        #[serde(default)]
        content_type: Option<ContentType>,
    },
    Play {
        #[serde(default)]
        surface: u64,
        #[serde(default)]
        from_ms: Option<u64>,
    },
    Pause,
    Seek { position_ms: u64 },
    Stop,
    Release,
    Status,
    AudioTracks,
    SelectAudio { track_id: String },
    SubtitleTracks,
    SelectSubtitle { track_id: String },
    ClearSubtitle,
    FirstSubtitle,
}

/// Parse a script file body.
pub fn parse(raw: &str) -> serde_json::Result<Vec<ScriptCommand>> {
    serde_json::from_str(raw)
}

/// Run one command, returning its JSON result.
pub fn run(facade: &mut PlaybackFacade, bridges: &ListenerBridges, cmd: &ScriptCommand) -> PlayerResult<Value> {
    match cmd {
        ScriptCommand::Load { locator, content_type } => {
            let content_type = content_type.unwrap_or_else(|| ContentType::infer(locator));
            facade.load(locator, content_type, bridges)?;
            Ok(json!({"loaded": locator, "content_type": content_type}))
        }
        ScriptCommand::Play { surface, from_ms } => {
            let surface = SurfaceHandle(*surface);
            match from_ms {
                Some(ms) => facade.play_from(&surface, VideoPosition::from_millis(*ms))?,
                None => facade.play(&surface)?,
            }
            Ok(json!({"playing": facade.is_playing()}))
        }
        ScriptCommand::Pause => {
            facade.pause()?;
            Ok(json!({"playing": facade.is_playing()}))
        }
        ScriptCommand::Seek { position_ms } => {
            facade.seek_to(VideoPosition::from_millis(*position_ms))?;
            Ok(json!({"position_ms": facade.playhead_position()?}))
        }
        ScriptCommand::Stop => {
            facade.stop()?;
            Ok(json!({"stopped": true}))
        }
        ScriptCommand::Release => {
            facade.release();
            Ok(json!({"loaded": facade.has_played_content()}))
        }
        ScriptCommand::Status => status(facade),
        ScriptCommand::AudioTracks => Ok(serde_json::to_value(facade.audio_tracks()?)?),
        ScriptCommand::SelectAudio { track_id } => {
            let track = find_audio(facade, track_id)?;
            facade.select_audio_track(&track)?;
            Ok(json!({"audio": track_id}))
        }
        ScriptCommand::SubtitleTracks => Ok(serde_json::to_value(facade.subtitle_tracks()?)?),
        ScriptCommand::SelectSubtitle { track_id } => {
            let track = find_subtitle(facade, track_id)?;
            facade.select_subtitle_track(&track)?;
            Ok(json!({"subtitle": track_id}))
        }
        ScriptCommand::ClearSubtitle => {
            facade.clear_subtitle_track()?;
            Ok(json!({"subtitle": null}))
        }
        ScriptCommand::FirstSubtitle => {
            let selected = facade.select_first_available_subtitles_track()?;
            Ok(json!({"selected": selected}))
        }
    }
}

pub fn status(facade: &PlaybackFacade) -> PlayerResult<Value> {
    Ok(json!({
        "playing": facade.is_playing(),
        "position_ms": facade.playhead_position()?,
        "duration_ms": facade.media_duration()?,
        "buffered": facade.buffer_percentage()?,
    }))
}

fn find_audio(facade: &PlaybackFacade, track_id: &str) -> PlayerResult<PlayerAudioTrack> {
    facade
        .audio_tracks()?
        .into_iter()
        .find(|t| t.track_id == track_id)
        .ok_or_else(|| noplayer_core::PlayerError::unknown_track(track_id))
}

fn find_subtitle(facade: &PlaybackFacade, track_id: &str) -> PlayerResult<PlayerSubtitleTrack> {
    facade
        .subtitle_tracks()?
        .into_iter()
        .find(|t| t.track_id == track_id)
        .ok_or_else(|| noplayer_core::PlayerError::unknown_track(track_id))
}
