//! Clip identifiers, derived resource links and per-clip edit settings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier naming a produced highlight
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Location of one of the clip's downloadable resources under `base_url`
    #[must_use]
    pub fn resource_url(&self, base_url: &str, resource: ClipResource) -> String {
        format!(
            "{}/clips/{}/{}",
            base_url.trim_end_matches('/'),
            self.0,
            resource.file_name()
        )
    }

    #[must_use]
    pub fn resources(&self, base_url: &str) -> ClipResources {
        ClipResources {
            raw: self.resource_url(base_url, ClipResource::Raw),
            subtitles: self.resource_url(base_url, ClipResource::Subtitles),
            preview: self.resource_url(base_url, ClipResource::Preview),
        }
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClipId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The files the backend serves for every clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipResource {
    Raw,
    Subtitles,
    /// Only valid once the clip has been rendered
    Preview,
}

impl ClipResource {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Raw => "raw.mp4",
            Self::Subtitles => "subtitles.srt",
            Self::Preview => "preview.mp4",
        }
    }
}

/// Resolved links for one clip. Computed locally, never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipResources {
    pub raw: String,
    pub subtitles: String,
    pub preview: String,
}

/// Render settings stored next to each clip on the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClipConfig {
    #[serde(default)]
    pub facecam: FacecamConfig,
    #[serde(default)]
    pub subtitles: SubtitleConfig,
}

/// Crop rectangle for the facecam overlay, in source pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacecamConfig {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub out_height: u32,
    pub enabled: bool,
}

impl Default for FacecamConfig {
    fn default() -> Self {
        Self {
            x: 1000,
            y: 120,
            w: 900,
            h: 500,
            out_height: 420,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleConfig {
    pub font_size: u32,
    pub margin_v: u32,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            font_size: 42,
            margin_v: 560,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_urls_are_interpolated() {
        let id = ClipId::new("clip_003");
        let links = id.resources("http://localhost:8000/");
        assert_eq!(links.raw, "http://localhost:8000/clips/clip_003/raw.mp4");
        assert_eq!(
            links.subtitles,
            "http://localhost:8000/clips/clip_003/subtitles.srt"
        );
        assert_eq!(
            links.preview,
            "http://localhost:8000/clips/clip_003/preview.mp4"
        );
    }

    #[test]
    fn test_clip_config_defaults_match_backend() {
        let cfg: ClipConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ClipConfig::default());
        assert_eq!(cfg.facecam.out_height, 420);
        assert_eq!(cfg.subtitles.margin_v, 560);
    }
}
