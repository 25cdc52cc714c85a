//! Catalog track selector — audio and subtitle selection over a fixed
//! per-renderer track list.
//!
//! Renderer topology comes only from the `RendererTypeRequester`: a catalog
//! entry is listed as audio (or text) only if the active session reports
//! that renderer as audio (or text).

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, PlayerResult};
use crate::models::{PlayerAudioTrack, PlayerSubtitleTrack, RendererType};
use crate::tracks::{AudioTrackSelector, RendererTypeRequester, SubtitleTrackSelector};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFormat {
    pub id: String,
    pub language: Option<String>,
    pub mime_type: String,
    #[serde(default)]
    pub channels: Option<u16>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
}

impl TrackFormat {
    pub fn new(id: &str, language: Option<&str>, mime_type: &str) -> Self {
        Self {
            id: id.to_string(),
            language: language.map(String::from),
            mime_type: mime_type.to_string(),
            channels: None,
            sample_rate: None,
        }
    }

    pub fn with_audio(mut self, channels: u16, sample_rate: u32) -> Self {
        self.channels = Some(channels);
        self.sample_rate = Some(sample_rate);
        self
    }
}

/// Formats available to one renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererTracks {
    pub renderer_index: usize,
    pub formats: Vec<TrackFormat>,
}

#[derive(Debug, Default)]
struct Selections {
    audio: Option<String>,
    text: Option<String>,
    text_disabled: bool,
}

pub struct CatalogTrackSelector {
    catalog: Vec<RendererTracks>,
    selections: Mutex<Selections>,
}

impl CatalogTrackSelector {
    pub fn new(catalog: Vec<RendererTracks>) -> Self {
        Self {
            catalog,
            selections: Mutex::new(Selections::default()),
        }
    }

    pub fn selected_audio_track(&self) -> Option<String> {
        self.selections.lock().audio.clone()
    }

    pub fn selected_subtitle_track(&self) -> Option<String> {
        self.selections.lock().text.clone()
    }

    pub fn subtitles_disabled(&self) -> bool {
        self.selections.lock().text_disabled
    }

    fn renderers_of(&self, kind: RendererType, requester: &dyn RendererTypeRequester) -> PlayerResult<Vec<&RendererTracks>> {
        let mut matching = Vec::new();
        for renderer in &self.catalog {
            if requester.renderer_type_for(renderer.renderer_index)? == kind {
                matching.push(renderer);
            }
        }
        Ok(matching)
    }

    /// Resolve `(group, format, id)` against the catalog, checking that the
    /// renderer really is of type `kind`.
    fn find(
        &self,
        kind: RendererType,
        group_index: usize,
        format_index: usize,
        track_id: &str,
        requester: &dyn RendererTypeRequester,
    ) -> PlayerResult<&TrackFormat> {
        if requester.renderer_type_for(group_index)? != kind {
            return Err(PlayerError::unknown_track(track_id));
        }
        self.catalog
            .iter()
            .find(|r| r.renderer_index == group_index)
            .and_then(|r| r.formats.get(format_index))
            .filter(|format| format.id == track_id)
            .ok_or_else(|| PlayerError::unknown_track(track_id))
    }
}

impl AudioTrackSelector for CatalogTrackSelector {
    fn select_audio_track(&self, track: &PlayerAudioTrack, requester: &dyn RendererTypeRequester) -> PlayerResult<()> {
        let format = self.find(RendererType::Audio, track.group_index, track.format_index, &track.track_id, requester)?;
        log::debug!("noplayer: audio track {} selected", format.id);
        self.selections.lock().audio = Some(format.id.clone());
        Ok(())
    }

    fn audio_tracks(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<Vec<PlayerAudioTrack>> {
        let tracks = self
            .renderers_of(RendererType::Audio, requester)?
            .into_iter()
            .flat_map(|renderer| {
                renderer
                    .formats
                    .iter()
                    .enumerate()
                    .map(move |(format_index, format)| PlayerAudioTrack {
                        group_index: renderer.renderer_index,
                        format_index,
                        track_id: format.id.clone(),
                        language: format.language.clone(),
                        mime_type: format.mime_type.clone(),
                        channels: format.channels,
                        sample_rate: format.sample_rate,
                    })
            })
            .collect();
        Ok(tracks)
    }
}

impl SubtitleTrackSelector for CatalogTrackSelector {
    fn select_text_track(&self, track: &PlayerSubtitleTrack, requester: &dyn RendererTypeRequester) -> PlayerResult<()> {
        let format = self.find(RendererType::Text, track.group_index, track.format_index, &track.track_id, requester)?;
        log::debug!("noplayer: subtitle track {} selected", format.id);
        let mut selections = self.selections.lock();
        selections.text = Some(format.id.clone());
        selections.text_disabled = false;
        Ok(())
    }

    fn subtitle_tracks(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<Vec<PlayerSubtitleTrack>> {
        let tracks = self
            .renderers_of(RendererType::Text, requester)?
            .into_iter()
            .flat_map(|renderer| {
                renderer
                    .formats
                    .iter()
                    .enumerate()
                    .map(move |(format_index, format)| PlayerSubtitleTrack {
                        group_index: renderer.renderer_index,
                        format_index,
                        track_id: format.id.clone(),
                        language: format.language.clone(),
                        mime_type: format.mime_type.clone(),
                    })
            })
            .collect();
        Ok(tracks)
    }

    fn clear_subtitle_track(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<()> {
        self.renderers_of(RendererType::Text, requester)?;
        let mut selections = self.selections.lock();
        selections.text = None;
        selections.text_disabled = true;
        Ok(())
    }

    fn select_first_text_track(&self, requester: &dyn RendererTypeRequester) -> PlayerResult<bool> {
        let first = self
            .renderers_of(RendererType::Text, requester)?
            .into_iter()
            .find_map(|renderer| renderer.formats.first());
        let Some(format) = first else {
            return Ok(false);
        };
        let mut selections = self.selections.lock();
        selections.text = Some(format.id.clone());
        selections.text_disabled = false;
        Ok(true)
    }
}
