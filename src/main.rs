//! Interactive terminal runtime.
//!
//! Reads one command per line from stdin, turns it into an
//! [`Event`](foodlens::Event), and runs the resulting actions. Fetches run as
//! tokio tasks on the [`CatalogWorker`]; their responses come back over a
//! channel and re-enter the coordinator as `FetchCompleted` events.
//!
//! ```text
//! stdin ──► cli::parse_command ──► handle_event ──► Action::Fetch ──► worker task
//!                                      ▲                                  │
//!                                      └──── FetchCompleted ◄── channel ◄─┘
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use foodlens::cli::{self, Step, HELP_TEXT};
use foodlens::gateway::CatalogClient;
use foodlens::infrastructure::env_map;
use foodlens::observability::init_tracing;
use foodlens::storage::{JsonPreferences, PreferenceStore, PREFERENCES_FILE};
use foodlens::ui::{self, Theme};
use foodlens::worker::{CatalogWorker, FetchResponse};
use foodlens::{handle_event, Action, AppState, Config, Event};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const PROMPT: &str = "foodlens> ";

/// Browse the Open Food Facts catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "foodlens", version, about)]
struct Args {
    /// TOML config file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog host.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Products per page.
    #[arg(long)]
    page_size: Option<u32>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Directory for preferences and trace output.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. `debug`).
    #[arg(long, value_name = "LEVEL")]
    trace_level: Option<String>,

    /// Print log events to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Output width in columns.
    #[arg(long, default_value_t = 100)]
    width: usize,
}

impl Args {
    /// Command-line flags take precedence over every other source.
    fn overlay(&self, mut config: Config) -> Config {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.data_dir.is_some() {
            config.data_dir.clone_from(&self.data_dir);
        }
        if self.trace_level.is_some() {
            config.trace_level.clone_from(&self.trace_level);
        }
        config.log_to_stderr |= self.verbose;
        config.sanitized()
    }
}

/// Runtime around the coordinator state.
struct Session {
    app: AppState,
    theme: Theme,
    preferences: JsonPreferences,
    worker: Arc<CatalogWorker<CatalogClient>>,
    completions: mpsc::UnboundedSender<FetchResponse>,
    cols: usize,
    quitting: bool,
}

impl Session {
    fn dispatch(&mut self, event: &Event) {
        let span = tracing::debug_span!("dispatch", event = event.name());
        let _guard = span.entered();

        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    self.execute_action(action);
                }
                if should_render && !self.quitting {
                    self.render();
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "event handling failed");
                eprintln!("foodlens: {e}");
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Fetch(request) => {
                tracing::debug!(ticket = request.ticket, operation = request.query.operation(), "spawning fetch");
                let worker = Arc::clone(&self.worker);
                let completions = self.completions.clone();
                tokio::spawn(async move {
                    let response = worker.execute(request).await;
                    if completions.send(response).is_err() {
                        tracing::debug!("session closed before fetch completed");
                    }
                });
            }
            Action::PersistTheme(name) => {
                self.theme = Theme::from_name(name);
                if let Err(e) = self.preferences.save_theme(name) {
                    tracing::warn!(error = %e, "failed to persist theme");
                }
            }
            Action::Quit => self.quitting = true,
        }
    }

    fn handle_line(&mut self, line: &str) {
        let command = match cli::parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                self.notice(&message);
                return;
            }
        };

        match cli::resolve(command, &self.app) {
            Step::Dispatch(event) => self.dispatch(&event),
            Step::ShowCategories { fetch } => {
                if let Some(event) = fetch {
                    self.dispatch(&event);
                }
                let vm = self.app.compute_viewmodel();
                self.print(&ui::render_categories_to_string(&vm.categories, &self.theme, self.cols));
            }
            Step::Help => self.print(HELP_TEXT),
            Step::Redraw => self.render(),
            Step::Notice(message) => self.notice(&message),
        }
    }

    fn render(&self) {
        if let Err(e) = ui::render(&self.app.compute_viewmodel(), &self.theme, self.cols) {
            tracing::warn!(error = %e, "failed to write frame");
        }
    }

    fn notice(&self, message: &str) {
        self.print(&format!("{}{message}{}", Theme::fg(&self.theme.colors.text_dim), Theme::reset()));
    }

    fn print(&self, text: &str) {
        println!("{text}");
    }

    fn prompt(&self) {
        if let Err(e) = write_prompt(&mut std::io::stdout().lock()) {
            tracing::warn!(error = %e, "failed to write prompt");
        }
    }
}

fn write_prompt(out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()
}

/// Opens the preference file, starting over if it is corrupt.
fn open_preferences(data_dir: &Path) -> JsonPreferences {
    let path = data_dir.join(PREFERENCES_FILE);
    JsonPreferences::new(path.clone()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, path = %path.display(), "preference file unusable, starting fresh");
        JsonPreferences::fresh(path)
    })
}

async fn run(config: Config, data_dir: &Path, cols: usize) -> foodlens::Result<()> {
    let preferences = open_preferences(data_dir);
    let app = foodlens::initialize(&config, &preferences);
    let client = CatalogClient::new(&config.client_settings())?;
    let (completions, mut responses) = mpsc::unbounded_channel();

    let mut session = Session {
        theme: Theme::from_name(app.theme),
        app,
        preferences,
        worker: Arc::new(CatalogWorker::new(client)),
        completions,
        cols,
        quitting: false,
    };

    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "session started");
    session.dispatch(&Event::Startup);
    session.prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !session.quitting {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => session.handle_line(&line),
                None => break,
            },
            Some(response) = responses.recv() => session.dispatch(&Event::FetchCompleted(response)),
        }
        if !session.quitting {
            session.prompt();
        }
    }

    tracing::info!("session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let env = env_map();

    let config = match Config::load(args.config.as_deref(), &env) {
        Ok(config) => args.overlay(config),
        Err(e) => {
            eprintln!("foodlens: {e}");
            return ExitCode::FAILURE;
        }
    };

    let data_dir = config.data_dir(&env);
    let _tracing = init_tracing(&config, &data_dir);

    match run(config, &data_dir, args.width).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session failed");
            eprintln!("foodlens: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn prompt_is_written_and_flushed() {
        let mut out = Vec::new();
        write_prompt(&mut out).unwrap();
        assert_eq!(out, PROMPT.as_bytes());
    }

    #[test]
    fn prompt_write_failure_is_reported() {
        let err = write_prompt(&mut ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn flags_override_loaded_config() {
        let args = Args::parse_from(["foodlens", "--page-size", "500", "--timeout", "3", "-v"]);
        let config = args.overlay(Config::default());
        assert_eq!(config.page_size, foodlens::MAX_PAGE_SIZE);
        assert_eq!(config.request_timeout_secs, 3);
        assert!(config.log_to_stderr);
    }
}
