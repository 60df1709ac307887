use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What the fetch tool should produce for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Default combined video+audio stream
    #[default]
    Video,
    /// Best audio stream transcoded to mp3
    Audio,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Video => "video",
            FetchMode::Audio => "audio",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FetchMode::Video => "🎬",
            FetchMode::Audio => "🎵",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FetchMode::Video => "Video",
            FetchMode::Audio => "Audio",
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" | "v" => Ok(FetchMode::Video),
            "audio" | "a" => Ok(FetchMode::Audio),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}
