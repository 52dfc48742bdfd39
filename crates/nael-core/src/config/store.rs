use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{shellexpand, Settings};
use crate::{error::NaelError, traits::SettingsStore};

/// Settings persisted as a TOML file on disk.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    /// Store backed by `path` (`~` is expanded).
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand(path)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<Option<Settings>, NaelError> {
        if !self.path.exists() {
            info!(
                "Settings file not found at {}, using defaults",
                self.path.display()
            );
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            NaelError::Config(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let settings = Settings::from_toml(&content)
            .map_err(|e| NaelError::Config(format!("failed to parse settings: {e}")))?;

        Ok(Some(settings))
    }

    fn save(&self, settings: &Settings) -> Result<(), NaelError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(settings)
            .map_err(|e| NaelError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.path, content).map_err(|e| {
            NaelError::Config(format!("failed to write {}: {e}", self.path.display()))
        })?;
        info!("settings: saved to {}", self.path.display());
        Ok(())
    }
}

/// Defaults overlaid by whatever the store has persisted.
///
/// A missing or unreadable settings file is never fatal: it is logged and the
/// defaults are used.
pub fn load_or_default(store: &dyn SettingsStore) -> Settings {
    match store.load() {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            warn!("settings: {e}; falling back to defaults");
            Settings::default()
        }
    }
}
