//! Gateway, the host loop: sources in, bus and commands out.

use crate::i18n::t;
use crate::plugin::{NaelPlugin, Session};
use crate::settings_ui::SettingsEditor;
use nael_core::{
    bus::{CommandRegistry, EventBus},
    message::{ChatEvent, HostEvent},
    traits::{ChatSource, HintPresenter},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Built-in command listing every registered command with its help text.
const HELP_COMMAND: &str = "help";

/// Owns the sources, the chat bus, the command registry and the loaded plugin.
pub struct Gateway {
    sources: Vec<Arc<dyn ChatSource>>,
    bus: EventBus<ChatEvent>,
    commands: CommandRegistry,
    plugin: Option<NaelPlugin>,
    presenter: Arc<dyn HintPresenter>,
    editor: Arc<dyn SettingsEditor>,
    settings_path: String,
    echo_chat: bool,
}

impl Gateway {
    /// Load the plugin for `session` and get ready to read from `sources`.
    pub fn new(
        sources: Vec<Arc<dyn ChatSource>>,
        session: Session,
        presenter: Arc<dyn HintPresenter>,
        editor: Arc<dyn SettingsEditor>,
        settings_path: impl Into<String>,
    ) -> Self {
        let bus = EventBus::new();
        let commands = CommandRegistry::new();
        let plugin = NaelPlugin::load(&bus, &commands, session);
        Self {
            sources,
            bus,
            commands,
            plugin: Some(plugin),
            presenter,
            editor,
            settings_path: settings_path.into(),
            echo_chat: true,
        }
    }

    /// Print every chat line after the plugin has seen it (default on).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_chat = echo;
        self
    }

    /// Run until every source is exhausted or Ctrl-C.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(
            "nael gateway running | sources: {} | commands: {}",
            self.sources
                .iter()
                .map(|s| s.name().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            self.commands.names().join(", "),
        );

        let (tx, mut rx) = mpsc::channel::<HostEvent>(256);

        for source in &self.sources {
            let mut source_rx = source
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start source {}: {e}", source.name()))?;
            let tx = tx.clone();
            let source_name = source.name().to_string();

            tokio::spawn(async move {
                while let Some(event) = source_rx.recv().await {
                    if tx.send(event).await.is_err() {
                        info!("gateway receiver dropped, stopping {source_name} forwarder");
                        break;
                    }
                }
                debug!("source {source_name} exhausted");
            });

            info!("Source started: {}", source.name());
        }

        drop(tx);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        info!("All sources closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    async fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Chat(mut chat) => {
                let handlers = self.bus.dispatch(&mut chat);
                debug!("chat from {} seen by {handlers} handler(s)", chat.sender);
                if self.echo_chat {
                    self.presenter
                        .print(&format!("{}: {}", chat.sender, chat.text()));
                }
            }
            HostEvent::Command { name, args } => {
                if name == HELP_COMMAND {
                    self.show_help(&args);
                } else if !self.commands.invoke(&name, &args) {
                    warn!("unknown command /{name}");
                    self.report_unknown(&name);
                }
                self.open_editor_if_requested().await;
            }
        }
    }

    /// `/help` lists every command, `/help <name>` just that one.
    fn show_help(&self, args: &str) {
        let wanted = args.trim().trim_start_matches('/').to_lowercase();
        let names = if wanted.is_empty() {
            self.commands.names()
        } else {
            vec![wanted]
        };
        for name in names {
            match self.commands.help(&name) {
                Some(help) => self.presenter.print(&format!("/{name}: {help}")),
                None => self.report_unknown(&name),
            }
        }
    }

    fn report_unknown(&self, name: &str) {
        let language = self.language();
        self.presenter
            .print(&format!("{}: /{name}", t("unknown_command", language)));
    }

    fn language(&self) -> nael_core::language::ClientLanguage {
        self.plugin
            .as_ref()
            .map(|p| p.session().language())
            .unwrap_or_default()
    }

    /// Show the settings editor if `/nael cfg` asked for it.
    ///
    /// The editor blocks on terminal input, so it runs on the blocking pool
    /// with the session lock released.
    async fn open_editor_if_requested(&self) {
        let Some(plugin) = &self.plugin else {
            return;
        };
        let current = {
            let mut session = plugin.session();
            if !session.take_config_request() {
                return;
            }
            session.settings().clone()
        };

        let editor = Arc::clone(&self.editor);
        let path = self.settings_path.clone();
        let edited = tokio::task::spawn_blocking(move || editor.edit(&current, &path))
            .await
            .unwrap_or_else(|e| Err(anyhow::anyhow!("editor task failed: {e}")));

        match edited {
            Ok(Some(edited)) => {
                if let Err(e) = plugin.session().apply_settings(edited) {
                    error!("failed to save settings: {e}");
                }
            }
            Ok(None) => debug!("settings editor closed without changes"),
            Err(e) => error!("settings editor failed: {e}"),
        }
    }

    /// Unload the plugin, then stop every source.
    async fn shutdown(&mut self) {
        info!("Shutting down...");
        self.plugin.take();
        for source in &self.sources {
            if let Err(e) = source.stop().await {
                warn!("failed to stop source {}: {e}", source.name());
            }
        }
        info!("Shutdown complete.");
    }
}
