//! Track metadata written next to generated audio.

use serde::{Deserialize, Serialize};

use crate::error::SpecResult;

/// License string recorded for generated tracks.
pub const GENERATED_LICENSE: &str = "Generated by Robovox script (original asset)";

/// Contents of the `LICENSE.md` written into batch output folders.
pub const LICENSE_TEXT: &str = "# Track License\n\
\n\
All files in this folder were generated programmatically by project scripts.\n\
They are original assets for this portfolio project.\n\
No third-party copyrighted audio is included.";

/// One entry of a `tracks.json` index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Track id, e.g. `rock-01`.
    pub id: String,
    /// Style id the track was rendered with.
    pub theme: String,
    /// Display title.
    pub title: String,
    /// Tempo in bpm.
    pub bpm: u32,
    /// URL path of the audio file.
    pub file: String,
    /// License note.
    pub license: String,
    /// True once a vocal asset has been mapped onto the track.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub vocal: bool,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Fields written by other tools, preserved on rewrite.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TrackDescriptor {
    /// Describes the `index`-th (1-based) generated track of a style.
    pub fn generated(style_id: &str, index: u32, bpm: u32, file: impl Into<String>) -> Self {
        let number = format!("{:02}", index);
        Self {
            id: format!("{}-{}", style_id, number),
            theme: style_id.to_string(),
            title: format!("{} Track {}", style_id.to_uppercase(), number),
            bpm,
            file: file.into(),
            license: GENERATED_LICENSE.to_string(),
            vocal: false,
            tags: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Adds a tag unless already present.
    pub fn add_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }
}

/// Parses a `tracks.json` index.
pub fn parse_track_index(json: &str) -> SpecResult<Vec<TrackDescriptor>> {
    Ok(serde_json::from_str(json)?)
}

/// Serializes a track index as pretty JSON (two-space indent).
pub fn track_index_to_json(tracks: &[TrackDescriptor]) -> SpecResult<String> {
    Ok(serde_json::to_string_pretty(tracks)?)
}
