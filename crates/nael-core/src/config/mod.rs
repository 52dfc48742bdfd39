mod defaults;
mod store;


pub use store::{load_or_default, TomlSettingsStore};

use serde::{Deserialize, Serialize};

use defaults::*;

/// Smallest accepted hint duration, in seconds.
pub const MIN_DURATION_SECS: u32 = 1;
/// Largest accepted hint duration, in seconds.
pub const MAX_DURATION_SECS: u32 = 60;

/// Which matching strategy the plugin runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Compare each announcement against the quote catalog and rewrite it
    /// into its mechanic call-out.
    #[default]
    Fuzzy,
    /// Forward the untranslated line when the speaker is the configured target.
    Sender,
}

impl MatchMode {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Fuzzy => "fuzzy",
            Self::Sender => "sender",
        }
    }
}

/// How the sender name is compared in [`MatchMode::Sender`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRule {
    /// Sender must equal `target_name` exactly.
    #[default]
    Exact,
    /// Sender equals `target_name`, or contains it or one of the aliases
    /// (case-insensitive).
    Contains,
}

/// The five attack labels shown in call-outs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default = "default_dynamo")]
    pub dynamo: String,
    #[serde(default = "default_chariot")]
    pub chariot: String,
    #[serde(default = "default_beam")]
    pub beam: String,
    #[serde(default = "default_dive")]
    pub dive: String,
    #[serde(default = "default_meteor_stream")]
    pub meteor_stream: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            dynamo: default_dynamo(),
            chariot: default_chariot(),
            beam: default_beam(),
            dive: default_dive(),
            meteor_stream: default_meteor_stream(),
        }
    }
}

/// User settings, persisted as a flat TOML document.
///
/// Missing keys take their default so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default = "default_target_name")]
    pub target_name: String,
    /// Extra names that count as the target under [`SenderRule::Contains`].
    #[serde(default)]
    pub target_aliases: Vec<String>,
    #[serde(default)]
    pub sender_rule: SenderRule,
    #[serde(default = "default_duration")]
    display_duration_secs: u32,
    /// Minimum similarity (0-100) for a fuzzy match.
    #[serde(default = "default_threshold")]
    match_threshold: u8,
    /// Also raise a hint when a fuzzy match rewrites a line.
    #[serde(default = "default_true")]
    pub hint_on_match: bool,
    #[serde(flatten)]
    pub labels: Labels,
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            enabled: true,
            mode: MatchMode::default(),
            target_name: default_target_name(),
            target_aliases: Vec::new(),
            sender_rule: SenderRule::default(),
            display_duration_secs: default_duration(),
            match_threshold: default_threshold(),
            hint_on_match: true,
            labels: Labels::default(),
            separator: default_separator(),
        }
    }
}

impl Settings {
    /// Hint duration in seconds, always within `[1, 60]`.
    pub fn display_duration_secs(&self) -> u32 {
        self.display_duration_secs
    }

    /// Set the hint duration, clamped to `[1, 60]`.
    pub fn set_display_duration_secs(&mut self, secs: u32) {
        self.display_duration_secs = secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
    }

    /// Fuzzy match threshold, always within `[0, 100]`.
    pub fn match_threshold(&self) -> u8 {
        self.match_threshold
    }

    /// Set the fuzzy match threshold, clamped to `[0, 100]`.
    pub fn set_match_threshold(&mut self, threshold: u8) {
        self.match_threshold = threshold.min(100);
    }

    /// Re-apply bounds after deserialization, where setters are bypassed.
    pub fn normalized(mut self) -> Self {
        self.set_display_duration_secs(self.display_duration_secs);
        self.set_match_threshold(self.match_threshold);
        self
    }

    /// Parse settings from TOML, clamping out-of-range values.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Settings>(content).map(Settings::normalized)
    }
}

/// Default location of the settings file.
pub fn default_path() -> String {
    shellexpand(&default_settings_path())
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}
