//! Line protocol shared by the stdin and replay sources.
//!
//! One event per line:
//! - `/nael test` → a command
//! - `{"category": "...", "sender": "...", "payloads": [...]}` → a chat event
//! - `Sender Name: text` → an announcement from `Sender Name`
//!
//! Blank lines and lines starting with `#` are skipped.

use nael_core::message::{ChatCategory, ChatEvent, HostEvent};
use tracing::warn;

/// Parse one input line. Returns `None` for blank, comment, or malformed lines.
pub fn parse_line(line: &str) -> Option<HostEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    if trimmed.starts_with('/') {
        return HostEvent::parse_command(trimmed);
    }

    if trimmed.starts_with('{') {
        return match serde_json::from_str::<ChatEvent>(trimmed) {
            Ok(event) => Some(HostEvent::Chat(event)),
            Err(e) => {
                warn!("lines: skipping malformed event: {e}");
                None
            }
        };
    }

    match trimmed.split_once(':') {
        Some((sender, text)) if !sender.trim().is_empty() => Some(HostEvent::Chat(ChatEvent::new(
            ChatCategory::NpcDialogueAnnouncements,
            sender.trim(),
            unescape(text.trim()),
        ))),
        _ => {
            warn!("lines: expected `Sender: text`, JSON, or a /command; got {trimmed:?}");
            None
        }
    }
}

/// Turn a literal `\n` typed on one line into a real line break.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nael_core::message::Payload;

    fn chat(line: &str) -> ChatEvent {
        match parse_line(line) {
            Some(HostEvent::Chat(e)) => e,
            other => panic!("expected chat event, got {other:?}"),
        }
    }

    #[test]
    fn test_shorthand_line() {
        let e = chat("Nael deus Darnus: O hallowed moon,\\nshine you the iron path!");
        assert_eq!(e.sender, "Nael deus Darnus");
        assert_eq!(e.category, ChatCategory::NpcDialogueAnnouncements);
        assert_eq!(
            e.payloads,
            vec![Payload::text("O hallowed moon,\nshine you the iron path!")]
        );
    }

    #[test]
    fn test_json_line() {
        let e = chat(
            r#"{"category":"say","sender":"Tank","payloads":[{"type":"text","text":"pull in 5"}]}"#,
        );
        assert_eq!(e.category, ChatCategory::Say);
        assert_eq!(e.text(), "pull in 5");
    }

    #[test]
    fn test_command_line() {
        match parse_line("/nael cfg") {
            Some(HostEvent::Command { name, args }) => {
                assert_eq!(name, "nael");
                assert_eq!(args, "cfg");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_skipped_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("# a comment").is_none());
        assert!(parse_line("{not json").is_none());
        assert!(parse_line("no colon here").is_none());
        assert!(parse_line(": no sender").is_none());
    }
}
