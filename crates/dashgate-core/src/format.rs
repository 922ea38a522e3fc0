//! Adaptive-bitrate output formats and their fixed layout parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Streaming format a job is packaged into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    /// MPEG-DASH, manifest `.mpd`.
    #[default]
    Dash,
    /// HTTP Live Streaming (v4 playlists), manifest `.m3u8`.
    Hls,
}

impl OutputFormat {
    /// Every supported format, in a stable order.
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Dash, OutputFormat::Hls];

    /// Directory prefix used for output keys (`dash-720p/...`).
    pub fn directory_prefix(self) -> &'static str {
        match self {
            OutputFormat::Dash => "dash",
            OutputFormat::Hls => "hls",
        }
    }

    /// Playlist format name understood by the pipeline.
    pub fn playlist_format(self) -> &'static str {
        match self {
            OutputFormat::Dash => "MPEG-DASH",
            OutputFormat::Hls => "HLSv4",
        }
    }

    /// Preset for the audio-only rendition.
    pub fn audio_preset(self) -> &'static str {
        match self {
            OutputFormat::Dash => "1351620000001-500060",
            OutputFormat::Hls => "1351620000001-200060",
        }
    }

    /// Infix placed between basename and counter in thumbnail names.
    pub fn thumbnail_infix(self) -> &'static str {
        match self {
            OutputFormat::Dash => "",
            OutputFormat::Hls => "_hls",
        }
    }

    /// File extension of the top-level manifest, without the dot.
    pub fn manifest_extension(self) -> &'static str {
        match self {
            OutputFormat::Dash => "mpd",
            OutputFormat::Hls => "m3u8",
        }
    }

    /// Map a playlist `Format` reported by the pipeline back to a format.
    pub fn from_playlist_format(raw: &str) -> Option<Self> {
        match raw {
            "MPEG-DASH" => Some(OutputFormat::Dash),
            "HLSv3" | "HLSv4" => Some(OutputFormat::Hls),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directory_prefix())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dash" | "mpeg-dash" => Ok(OutputFormat::Dash),
            "hls" => Ok(OutputFormat::Hls),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("DASH".parse::<OutputFormat>().unwrap(), OutputFormat::Dash);
        assert_eq!("mpeg-dash".parse::<OutputFormat>().unwrap(), OutputFormat::Dash);
        assert_eq!("Hls".parse::<OutputFormat>().unwrap(), OutputFormat::Hls);
        assert!("smooth".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn playlist_format_maps_back() {
        for format in OutputFormat::ALL {
            assert_eq!(
                OutputFormat::from_playlist_format(format.playlist_format()),
                Some(format)
            );
        }
        assert_eq!(OutputFormat::from_playlist_format("HLSv3"), Some(OutputFormat::Hls));
        assert_eq!(OutputFormat::from_playlist_format("Smooth"), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&OutputFormat::Hls).unwrap(), "\"hls\"");
        let parsed: OutputFormat = serde_json::from_str("\"dash\"").unwrap();
        assert_eq!(parsed, OutputFormat::Dash);
    }

    #[test]
    fn serde_accepts_every_parseable_name() {
        for raw in ["dash", "mpeg-dash", "MPEG-DASH", "hls", "HLS"] {
            let from_json: OutputFormat = serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(from_json, raw.parse::<OutputFormat>().unwrap());
        }
        assert!(serde_json::from_str::<OutputFormat>("\"smooth\"").is_err());
    }
}
