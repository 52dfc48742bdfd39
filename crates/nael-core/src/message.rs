use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat channel a line was posted to.
///
/// Only [`ChatCategory::NpcDialogueAnnouncements`] is ever inspected by the
/// matcher; the rest exist so hosts can forward their stream unfiltered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatCategory {
    Say,
    Shout,
    Party,
    Echo,
    SystemMessage,
    NpcDialogue,
    /// Boss call-outs shown in the middle of the screen.
    #[default]
    NpcDialogueAnnouncements,
    #[serde(other)]
    Other,
}

impl ChatCategory {
    /// Whether lines of this category are candidates for matching.
    pub fn is_announcement(&self) -> bool {
        matches!(self, Self::NpcDialogueAnnouncements)
    }
}

/// One segment of a chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Plain text, may be rewritten in place.
    Text { text: String },
    /// Icons, item links and other non-text segments. Never touched.
    Opaque { kind: String },
}

impl Payload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// A chat line delivered by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    #[serde(default)]
    pub category: ChatCategory,
    /// Display name of the speaker.
    #[serde(default)]
    pub sender: String,
    pub payloads: Vec<Payload>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatEvent {
    /// Single-segment line, timestamped now.
    pub fn new(category: ChatCategory, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category,
            sender: sender.into(),
            payloads: vec![Payload::text(text)],
            timestamp: Utc::now(),
        }
    }

    /// Concatenation of every text segment.
    pub fn text(&self) -> String {
        self.payloads
            .iter()
            .filter_map(|p| match p {
                Payload::Text { text } => Some(text.as_str()),
                Payload::Opaque { .. } => None,
            })
            .collect()
    }
}

/// Anything a host can push at the plugin.
#[derive(Debug, Clone)]
pub enum HostEvent {
    Chat(ChatEvent),
    /// A slash command, e.g. `/nael test` → name `nael`, args `test`.
    Command { name: String, args: String },
}

impl HostEvent {
    /// Parse `/name args...` into a command event. Returns `None` for plain text.
    pub fn parse_command(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('/')?;
        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().filter(|n| !n.is_empty())?;
        let args = parts.next().unwrap_or("").trim();
        Some(Self::Command {
            name: name.to_lowercase(),
            args: args.to_string(),
        })
    }
}
