//! Track descriptors handed out and taken back by the track selectors.
//!
//! The facade never looks inside these.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAudioTrack {
    /// Index of the renderer the track group is mapped to.
    pub group_index: usize,
    pub format_index: usize,
    pub track_id: String,
    pub language: Option<String>,
    pub mime_type: String,
    pub channels: Option<u16>,
    pub sample_rate: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerSubtitleTrack {
    pub group_index: usize,
    pub format_index: usize,
    pub track_id: String,
    pub language: Option<String>,
    pub mime_type: String,
}
