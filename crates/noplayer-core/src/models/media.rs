//! Media classification types.
//!
//! String enums: type-safe matching in Rust, plain strings on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the content at a locator is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Hls,
    Dash,
    /// Plain container over HTTP or file (MP4, WebM, ...).
    #[serde(alias = "h264")]
    Progressive,
}

impl ContentType {
    /// Guess the content type from a locator's extension.
    ///
    /// `"https://cdn.example.com/live/master.m3u8?token=abc"` → `Hls`
    pub fn infer(locator: &str) -> Self {
        let path = locator.split(['?', '#']).next().unwrap_or(locator);
        let segment = path.rsplit('/').next().unwrap_or(path);
        match segment.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
            Some(ext) if ext == "m3u8" => ContentType::Hls,
            Some(ext) if ext == "mpd" => ContentType::Dash,
            _ => ContentType::Progressive,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::Hls => "hls",
            ContentType::Dash => "dash",
            ContentType::Progressive => "progressive",
        };
        f.write_str(name)
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hls" => Ok(ContentType::Hls),
            "dash" => Ok(ContentType::Dash),
            "progressive" | "h264" => Ok(ContentType::Progressive),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

/// Media type handled by one engine renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererType {
    Audio,
    Video,
    Text,
    Metadata,
    Unknown,
}

/// Opaque identifier of a native video surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceHandle(pub u64);
