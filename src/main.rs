mod clipboard;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod session;
mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::watch;

use clipboard::TerminalClipboard;
use config::Config;
use controller::{AppController, ControllerSettings};
use model::{AppModel, BrainClient, Route};
use session::{LocalStorage, Session};
use view::{AppView, ViewState};

/// Terminal client for the Second Brain bookmarking service
#[derive(Parser, Debug)]
#[command(name = "second-brain", version, about)]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file and environment
    #[arg(long)]
    backend_url: Option<String>,

    /// Screen to open first, e.g. /signin or /dashboard
    #[arg(long, default_value = "/")]
    route: String,
}

const SESSION_CHECK_INTERVAL: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Second Brain Client Starting ===");

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    let base_url = config.base_url()?;
    tracing::info!(backend = %base_url, "Configuration loaded");

    let storage = LocalStorage::open(config.storage_path())?;
    tracing::debug!(path = %storage.path().display(), "Local storage opened");
    let session = Arc::new(Session::new(storage));

    let api = Arc::new(BrainClient::new(base_url, config.request_timeout())?);
    let model = Arc::new(AppModel::new());
    let controller = AppController::new(
        model.clone(),
        api,
        session.clone(),
        Arc::new(TerminalClipboard),
        ControllerSettings::from_config(&config),
    );

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let session_changes = session.subscribe();
    let initial_route = Route::from_path(&cli.route);
    {
        let controller = controller.clone();
        tokio::spawn(async move {
            controller.navigate(initial_route).await;
        });
    }

    let res = run_app(
        &mut terminal,
        model,
        controller,
        session,
        session_changes,
        config.notice_timeout(),
    )
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Second Brain Client shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
    session: Arc<Session>,
    mut session_changes: watch::Receiver<bool>,
    notice_timeout: Duration,
) -> io::Result<()> {
    let mut last_session_check = Instant::now();

    loop {
        // Another process may have signed in or out through the shared storage file
        if last_session_check.elapsed() >= SESSION_CHECK_INTERVAL {
            last_session_check = Instant::now();
            if let Err(e) = session.refresh_from_storage().await {
                tracing::warn!(error = %e, "Session storage check failed");
            }
        }

        if session_changes.has_changed().unwrap_or(false) {
            session_changes.mark_unchanged();
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.on_session_changed().await;
            });
        }

        model.auto_clear_old_notices(notice_timeout).await;

        let state = ViewState {
            ui: model.get_ui_state().await,
            content: model.get_content_state().await,
            auth_form: model.get_auth_form().await,
            add_form: model.get_add_form().await,
        };

        terminal.draw(|f| {
            AppView::render(f, &state);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
