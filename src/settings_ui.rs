//! Settings editor: cliclack prompts for every field, with a live preview
//! of two call-outs.

use nael_core::config::{MatchMode, SenderRule, Settings, MAX_DURATION_SECS, MIN_DURATION_SECS};
use nael_quotes::{formatter, mechanic};

/// Quotes whose call-outs are shown as a preview of the current labels.
const PREVIEW_QUOTES: [u32; 2] = [6494, 6503];

/// Something that can show the settings to the player and maybe edit them.
pub trait SettingsEditor: Send + Sync {
    /// Returns `Some` with the edited settings if the player saved, `None`
    /// if they cancelled or the editor is read-only.
    fn edit(&self, current: &Settings, path: &str) -> anyhow::Result<Option<Settings>>;
}

/// Preview lines for the current labels and separator.
pub fn preview(settings: &Settings) -> Vec<String> {
    PREVIEW_QUOTES
        .iter()
        .filter_map(|&id| mechanic::lookup(id))
        .map(|e| {
            format!(
                "{} ({}): {}",
                e.quote_id,
                e.phase,
                formatter::render(e.mechanics, settings)
            )
        })
        .collect()
}

/// Full interactive editor. Needs the terminal, so only usable when stdin
/// is not also the chat source.
pub struct InteractiveEditor;

impl SettingsEditor for InteractiveEditor {
    fn edit(&self, current: &Settings, path: &str) -> anyhow::Result<Option<Settings>> {
        cliclack::intro("nael config")?;
        cliclack::log::info(format!("Settings file: {path}"))?;

        let mut next = current.clone();

        next.enabled = cliclack::confirm("Enable the plugin?")
            .initial_value(current.enabled)
            .interact()?;

        next.mode = cliclack::select("Matching mode")
            .item(
                MatchMode::Fuzzy,
                "Fuzzy (Recommended)",
                "Replace recognized quotes with their mechanics",
            )
            .item(
                MatchMode::Sender,
                "Sender",
                "Show every line the target says as a hint",
            )
            .initial_value(current.mode)
            .interact()?;

        match next.mode {
            MatchMode::Fuzzy => {
                let threshold: u8 = cliclack::input("Match threshold (0-100)")
                    .default_input(&current.match_threshold().to_string())
                    .validate(|input: &String| match input.parse::<u8>() {
                        Ok(n) if n <= 100 => Ok(()),
                        _ => Err("Enter a number between 0 and 100"),
                    })
                    .interact()?;
                next.set_match_threshold(threshold);

                next.hint_on_match = cliclack::confirm("Also show matched call-outs as hints?")
                    .initial_value(current.hint_on_match)
                    .interact()?;
            }
            MatchMode::Sender => {
                next.target_name = cliclack::input("Target speaker")
                    .default_input(&current.target_name)
                    .interact()?;

                next.sender_rule = cliclack::select("Speaker rule")
                    .item(SenderRule::Exact, "Exact", "Name must match exactly")
                    .item(
                        SenderRule::Contains,
                        "Contains",
                        "Name or an alias appears anywhere, ignoring case",
                    )
                    .initial_value(current.sender_rule)
                    .interact()?;
            }
        }

        let secs: u32 = cliclack::input(format!(
            "Hint duration in seconds ({MIN_DURATION_SECS}-{MAX_DURATION_SECS})"
        ))
        .default_input(&current.display_duration_secs().to_string())
        .validate(|input: &String| match input.parse::<u32>() {
            Ok(n) if (MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&n) => Ok(()),
            _ => Err("Enter a whole number of seconds in range"),
        })
        .interact()?;
        next.set_display_duration_secs(secs);

        next.labels.dynamo = label_input("Lunar Dynamo label", &current.labels.dynamo)?;
        next.labels.chariot = label_input("Iron Chariot label", &current.labels.chariot)?;
        next.labels.beam = label_input("Thermionic Beam label", &current.labels.beam)?;
        next.labels.dive = label_input("Dalamud Dive label", &current.labels.dive)?;
        next.labels.meteor_stream =
            label_input("Meteor Stream label", &current.labels.meteor_stream)?;
        next.separator = cliclack::input("Separator")
            .default_input(&current.separator)
            .required(false)
            .interact()?;

        cliclack::note("Preview", preview(&next).join("\n"))?;

        if !cliclack::confirm("Save these settings?")
            .initial_value(true)
            .interact()?
        {
            cliclack::outro_cancel("Nothing changed")?;
            return Ok(None);
        }
        cliclack::outro("Saved")?;
        Ok(Some(next))
    }
}

fn label_input(prompt: &str, current: &str) -> anyhow::Result<String> {
    Ok(cliclack::input(prompt).default_input(current).interact()?)
}

/// Read-only editor: prints the settings and where to change them.
///
/// Used while stdin carries chat lines and prompts would swallow them.
pub struct SummaryEditor;

impl SettingsEditor for SummaryEditor {
    fn edit(&self, current: &Settings, path: &str) -> anyhow::Result<Option<Settings>> {
        println!("{}", summary(current, path));
        Ok(None)
    }
}

/// Human-readable dump of `settings`.
pub fn summary(settings: &Settings, path: &str) -> String {
    let mut lines = vec![
        format!("Settings ({path})"),
        format!("  enabled:   {}", settings.enabled),
        format!("  mode:      {}", settings.mode.display_name()),
    ];
    match settings.mode {
        MatchMode::Fuzzy => {
            lines.push(format!("  threshold: {}", settings.match_threshold()));
            lines.push(format!("  hint:      {}", settings.hint_on_match));
        }
        MatchMode::Sender => {
            lines.push(format!("  target:    {}", settings.target_name));
            lines.push(format!("  rule:      {:?}", settings.sender_rule));
        }
    }
    lines.push(format!(
        "  duration:  {}s",
        settings.display_duration_secs()
    ));
    lines.push("  preview:".to_string());
    lines.extend(preview(settings).into_iter().map(|l| format!("    {l}")));
    lines.push("Run `nael config` to edit.".to_string());
    lines.join("\n")
}
