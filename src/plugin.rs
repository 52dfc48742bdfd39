//! The plugin: one session object owning settings, catalog and matcher.
//!
//! `NaelPlugin::load` wires the session into the host's chat bus and
//! command registry; dropping the plugin unregisters both.

use crate::commands::{self, Command};
use crate::i18n::{format_status, t};
use nael_core::{
    bus::{CommandRegistration, CommandRegistry, EventBus, Subscription},
    config::{load_or_default, Settings},
    error::NaelError,
    language::ClientLanguage,
    message::{ChatCategory, ChatEvent},
    traits::{HintPresenter, SettingsStore},
};
use nael_quotes::{mechanic, MatchOutcome, MechanicFormatter, QuoteCatalog, QuoteMatcher};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};


/// Everything the plugin knows, behind one lock.
pub struct Session {
    settings: Settings,
    store: Box<dyn SettingsStore>,
    catalog: Arc<QuoteCatalog>,
    formatter: MechanicFormatter,
    matcher: QuoteMatcher,
    language: ClientLanguage,
    presenter: Arc<dyn HintPresenter>,
    /// Set by `/nael cfg`, consumed by whoever shows the editor.
    config_requested: bool,
}

impl Session {
    /// Build a session with persisted settings (or defaults).
    pub fn new(
        catalog: Arc<QuoteCatalog>,
        store: Box<dyn SettingsStore>,
        presenter: Arc<dyn HintPresenter>,
        language: ClientLanguage,
    ) -> Self {
        let settings = load_or_default(store.as_ref());
        let formatter = MechanicFormatter::new(&settings);
        let matcher = QuoteMatcher::build(&settings, &catalog, &formatter, language);
        info!(
            "session: {} quotes, mode {}, language {language}, {}",
            catalog.len(),
            settings.mode.display_name(),
            if settings.enabled { "enabled" } else { "disabled" }
        );
        Self {
            settings,
            store,
            catalog,
            formatter,
            matcher,
            language,
            presenter,
            config_requested: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn language(&self) -> ClientLanguage {
        self.language
    }

    /// Handle one chat event. Fuzzy matches rewrite the event in place.
    pub fn on_chat(&mut self, event: &mut ChatEvent) -> MatchOutcome {
        if !self.settings.enabled {
            return MatchOutcome::Ignored;
        }
        let outcome = self.matcher.handle(event);
        self.present(&outcome);
        outcome
    }

    fn present(&self, outcome: &MatchOutcome) {
        let duration = self.settings.display_duration_secs();
        match outcome {
            MatchOutcome::Rewritten(hits) if self.settings.hint_on_match => {
                for hit in hits {
                    self.presenter.show_hint(&hit.callout, duration);
                }
            }
            MatchOutcome::Forward(text) => self.presenter.show_hint(text, duration),
            _ => {}
        }
    }

    /// Run `/nael <args>`.
    pub fn handle_command(&mut self, args: &str) {
        match Command::parse(args) {
            Command::Toggle => {
                self.toggle();
            }
            Command::Config => self.config_requested = true,
            Command::Test => {
                self.run_test();
            }
        }
    }

    /// Flip `enabled`, persist it, and announce the new state.
    pub fn toggle(&mut self) -> bool {
        self.settings.enabled = !self.settings.enabled;
        if let Err(e) = self.store.save(&self.settings) {
            warn!("session: could not persist enabled flag: {e}");
        }
        self.presenter
            .print(&format_status(self.settings.enabled, self.language));
        self.settings.enabled
    }

    /// Push every catalog quote through the matcher and show the result.
    ///
    /// Each quote is judged like a live line: fuzzy mode shows its call-out,
    /// sender mode the raw quote, and a disabled plugin leaves every quote
    /// untouched. Returns the number of hints shown.
    pub fn run_test(&self) -> usize {
        let duration = self.settings.display_duration_secs();
        self.presenter.print(t("test_header", self.language));

        let mut shown = 0;
        let mut phase = None;
        for record in self.catalog.records() {
            if let Some(entry) = mechanic::lookup(record.id) {
                if phase != Some(entry.phase) {
                    phase = Some(entry.phase);
                    self.presenter.print(&entry.phase.to_string());
                }
            }

            let quote = record.text_for(self.language);
            let mut event = ChatEvent::new(
                ChatCategory::NpcDialogueAnnouncements,
                self.settings.target_name.clone(),
                quote.clone(),
            );
            let outcome = if self.settings.enabled {
                self.matcher.handle(&mut event)
            } else {
                MatchOutcome::Ignored
            };
            let text = match outcome {
                MatchOutcome::Rewritten(hits) => hits
                    .into_iter()
                    .map(|h| h.callout)
                    .collect::<Vec<_>>()
                    .join("\n"),
                MatchOutcome::Forward(text) => text,
                MatchOutcome::NoMatch => {
                    warn!("test: quote {} did not match itself", record.id);
                    quote
                }
                MatchOutcome::Ignored => quote,
            };
            self.presenter.show_hint(&text, duration);
            shown += 1;
        }
        shown
    }

    /// Replace the settings, persist them, and rebuild call-outs and matcher.
    ///
    /// The in-memory settings and caches are updated even if persisting
    /// fails, so the running session always reflects the latest edit.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), NaelError> {
        self.settings = settings.normalized();
        self.rebuild();
        self.store.save(&self.settings)?;
        self.presenter.print(t("settings_saved", self.language));
        Ok(())
    }

    fn rebuild(&mut self) {
        self.formatter.rebuild(&self.settings);
        self.matcher = QuoteMatcher::build(
            &self.settings,
            &self.catalog,
            &self.formatter,
            self.language,
        );
        debug!("session: matcher rebuilt ({})", self.matcher.mode().display_name());
    }

    /// Whether `/nael cfg` was issued since the last call. Clears the flag.
    pub fn take_config_request(&mut self) -> bool {
        std::mem::take(&mut self.config_requested)
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A session registered with the host. Drop to unload.
pub struct NaelPlugin {
    session: Arc<Mutex<Session>>,
    _chat: Subscription,
    _command: CommandRegistration,
}

impl NaelPlugin {
    /// Register `session` for chat events and the `/nael` command.
    pub fn load(
        bus: &EventBus<ChatEvent>,
        commands: &CommandRegistry,
        session: Session,
    ) -> Self {
        let session = Arc::new(Mutex::new(session));

        let chat_session = session.clone();
        let chat = bus.subscribe(move |event| {
            lock(&chat_session).on_chat(event);
        });

        let cmd_session = session.clone();
        let command = commands.register(commands::COMMAND_NAME, commands::HELP, move |args| {
            lock(&cmd_session).handle_command(args);
        });

        info!("plugin: loaded, /{} registered", commands::COMMAND_NAME);
        Self {
            session,
            _chat: chat,
            _command: command,
        }
    }

    /// Exclusive access to the session.
    pub fn session(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }
}

impl Drop for NaelPlugin {
    fn drop(&mut self) {
        info!("plugin: unloading");
    }
}
