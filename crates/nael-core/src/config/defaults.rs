// --- Default value functions ---

pub(super) fn default_version() -> u32 {
    1
}
pub(super) fn default_true() -> bool {
    true
}
pub(super) fn default_target_name() -> String {
    "Nael deus Darnus".to_string()
}
pub(super) fn default_duration() -> u32 {
    4
}
pub(super) fn default_threshold() -> u8 {
    85
}
pub(super) fn default_dynamo() -> String {
    "Dynamo".to_string()
}
pub(super) fn default_chariot() -> String {
    "Chariot".to_string()
}
pub(super) fn default_beam() -> String {
    "Beam".to_string()
}
pub(super) fn default_dive() -> String {
    "Dive".to_string()
}
pub(super) fn default_meteor_stream() -> String {
    "Meteor Stream".to_string()
}
pub(super) fn default_separator() -> String {
    " -> ".to_string()
}
pub(super) fn default_settings_path() -> String {
    "~/.nael/settings.toml".to_string()
}
