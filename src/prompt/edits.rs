//! Fixed instructions for post-generation image edits

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    #[serde(rename = "remove-bg")]
    RemoveBackground,
    #[serde(rename = "blur-bg")]
    BlurBackground,
    #[serde(rename = "resize")]
    Resize,
}

impl EditKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "remove-bg" => Some(Self::RemoveBackground),
            "blur-bg" => Some(Self::BlurBackground),
            "resize" => Some(Self::Resize),
            _ => None,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::RemoveBackground => "Remove the background of this image, keep only the subject.",
            Self::BlurBackground => "Apply background blur, keep subject sharp.",
            Self::Resize => "Resize this image to a square format, centered subject.",
        }
    }
}
