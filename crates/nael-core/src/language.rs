//! Client language reported by the host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language the game client is running in.
///
/// The quote catalog only carries English, French, German, Japanese and
/// Simplified Chinese. Every other value resolves to the Chinese text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientLanguage {
    #[default]
    English,
    French,
    German,
    Japanese,
    Chinese,
    Korean,
    /// Anything the host reports that we do not recognize.
    #[serde(other)]
    Unknown,
}

impl ClientLanguage {
    /// Parse a language code or name (`"en"`, `"English"`, `"ja"`, ...).
    ///
    /// Unrecognized input yields [`ClientLanguage::Unknown`] rather than an error.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Self::English,
            "fr" | "french" | "français" => Self::French,
            "de" | "german" | "deutsch" => Self::German,
            "ja" | "jp" | "japanese" | "日本語" => Self::Japanese,
            "zh" | "cn" | "chs" | "chinese" | "中文" => Self::Chinese,
            "ko" | "kr" | "korean" => Self::Korean,
            _ => Self::Unknown,
        }
    }

    /// Short code used in logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
            Self::German => "de",
            Self::Japanese => "ja",
            Self::Chinese => "zh",
            Self::Korean => "ko",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClientLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
