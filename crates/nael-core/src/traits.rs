use crate::{config::Settings, error::NaelError, message::HostEvent};
use async_trait::async_trait;

/// Hint surface: where call-outs end up.
///
/// The host owns rendering; we only hand over the text and how long it
/// should stay on screen.
pub trait HintPresenter: Send + Sync {
    /// Show `text` as an on-screen hint for `duration_secs` seconds.
    fn show_hint(&self, text: &str, duration_secs: u32);

    /// Print a plain status line to the player's chat log.
    fn print(&self, text: &str);
}

/// Settings persistence, owned by the host.
pub trait SettingsStore: Send + Sync {
    /// Load persisted settings. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<Settings>, NaelError>;

    /// Persist the given settings.
    fn save(&self, settings: &Settings) -> Result<(), NaelError>;
}

/// Chat source: the host's event stream.
///
/// Every host adapter (stdin, replay file, ...) implements this trait.
#[async_trait]
pub trait ChatSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Start producing events. The receiver closes when the source is exhausted.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<HostEvent>, NaelError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), NaelError> {
        Ok(())
    }
}
