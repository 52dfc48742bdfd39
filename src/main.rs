mod commands;
mod gateway;
mod i18n;
mod plugin;
mod settings_ui;

use clap::{Parser, Subcommand};
use console::style;
use nael_channels::{ConsolePresenter, ReplaySource, StdinSource};
use nael_core::{
    config::{self, TomlSettingsStore},
    language::ClientLanguage,
    shellexpand,
    traits::{ChatSource, HintPresenter},
};
use nael_quotes::{FuzzyMatcher, MechanicFormatter, QuoteCatalog};
use plugin::Session;
use settings_ui::{InteractiveEditor, SettingsEditor, SummaryEditor};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nael",
    version,
    about = "Big Nael Quotes: turns Nael deus Darnus quotes into mechanic call-outs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the settings file.
    #[arg(short, long, default_value_t = config::default_path())]
    config: String,

    /// Client language code (en, fr, de, ja, zh).
    #[arg(short, long, env = "NAEL_LANGUAGE", default_value = "en")]
    language: String,

    /// Quote catalog JSON to use instead of the bundled one.
    #[arg(long)]
    catalog: Option<String>,

    /// Write logs to `<dir>/nael.log` instead of stderr.
    #[arg(long)]
    log_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read chat events and commands, showing hints as quotes arrive.
    Start {
        /// Replay a recorded chat log instead of reading stdin.
        #[arg(long)]
        replay: Option<String>,
        /// Milliseconds to wait between replayed events.
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Print without colors.
        #[arg(long)]
        plain: bool,
        /// Do not echo chat lines, only hints and status messages.
        #[arg(long)]
        quiet: bool,
    },
    /// Show the hint for every known quote, like `/nael test`.
    Test {
        #[arg(long)]
        plain: bool,
    },
    /// Score a line against the quote catalog.
    Match {
        /// The chat line.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Edit the settings interactively.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_dir.as_deref());

    let language = ClientLanguage::from_code(&cli.language);
    let catalog = Arc::new(load_catalog(cli.catalog.as_deref())?);
    let store = TomlSettingsStore::new(&cli.config);
    let settings_path = store.path().display().to_string();

    match cli.command {
        Commands::Start {
            replay,
            delay_ms,
            plain,
            quiet,
        } => {
            let presenter = presenter(plain);
            let session = Session::new(catalog, Box::new(store), presenter.clone(), language);

            // Prompts would read the chat lines off stdin, so the editor is
            // only interactive when replaying.
            let (source, editor): (Arc<dyn ChatSource>, Arc<dyn SettingsEditor>) = match replay {
                Some(path) => (
                    Arc::new(
                        ReplaySource::new(shellexpand(&path))
                            .with_delay(Duration::from_millis(delay_ms)),
                    ),
                    Arc::new(InteractiveEditor),
                ),
                None => (Arc::new(StdinSource::new()), Arc::new(SummaryEditor)),
            };

            let gw = gateway::Gateway::new(vec![source], session, presenter, editor, settings_path)
                .with_echo(!quiet);
            gw.run().await?;
        }
        Commands::Test { plain } => {
            let session = Session::new(catalog, Box::new(store), presenter(plain), language);
            session.run_test();
        }
        Commands::Match { text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: nael match <line>");
            }
            let line = text.join(" ");
            let settings = config::load_or_default(&store);
            let formatter = MechanicFormatter::new(&settings);
            let matcher =
                FuzzyMatcher::build(&catalog, &formatter, language, settings.match_threshold());

            match matcher.best(&line) {
                Some(hit) if hit.score >= matcher.threshold() => {
                    println!(
                        "{} quote {} (score {})",
                        style("match").green().bold(),
                        hit.quote_id,
                        hit.score
                    );
                    println!("{}", hit.callout);
                }
                Some(hit) => println!(
                    "{} best was quote {} with score {} (threshold {})",
                    style("no match").red().bold(),
                    hit.quote_id,
                    hit.score,
                    matcher.threshold()
                ),
                None => println!("{} catalog is empty", style("no match").red().bold()),
            }
        }
        Commands::Config => {
            let presenter = presenter(false);
            let mut session = Session::new(catalog, Box::new(store), presenter, language);
            let current = session.settings().clone();
            if let Some(edited) = InteractiveEditor.edit(&current, &settings_path)? {
                session.apply_settings(edited)?;
            }
        }
    }

    Ok(())
}

/// Log to stderr, or to a file under `log_dir`. Keep the guard alive for
/// the life of the process so buffered lines are flushed.
fn init_logging(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(shellexpand(dir), "nael.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn load_catalog(path: Option<&str>) -> anyhow::Result<QuoteCatalog> {
    let catalog = match path {
        Some(p) => QuoteCatalog::load_file(Path::new(&shellexpand(p))),
        None => QuoteCatalog::bundled(),
    };
    match catalog {
        Ok(c) if c.is_empty() => anyhow::bail!("quote catalog is empty"),
        Ok(c) => Ok(c),
        Err(e) => anyhow::bail!("failed to load quote catalog: {e}"),
    }
}

fn presenter(plain: bool) -> Arc<dyn HintPresenter> {
    if plain {
        Arc::new(ConsolePresenter::plain())
    } else {
        Arc::new(ConsolePresenter::new())
    }
}
