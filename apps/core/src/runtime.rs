use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::action_executor::launch_open_target;
use crate::app::App;
use crate::clipboard::ClipboardService;
use crate::command::Command;
use crate::config::{self, Config, ConfigError};
use crate::controller::SelectionController;
use crate::directory::{Directory, DirectoryError};
use crate::input::{map_event, InputMode};
use crate::slot_store::{self, StoreError};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Company search with one-keystroke jumps to disclosure, quote and news pages.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tickerlink", version, about, long_about = None)]
pub struct CliOptions {
    /// Config file (TOML). Created with defaults when missing.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Company directory (JSON5 array of {code, name}).
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// History database file.
    #[arg(long)]
    pub storage: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl RuntimeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Directory(_) => 2,
            Self::Store(_) | Self::Terminal(_) => 1,
        }
    }
}

pub fn resolve_config(options: &CliOptions) -> Result<Config, ConfigError> {
    let mut cfg = config::load(options.config.as_deref())?;
    if !cfg.config_path.exists() {
        config::save(&cfg)?;
        tracing::info!(path = %cfg.config_path.display(), "wrote default config");
    }

    if let Some(directory) = &options.directory {
        cfg.directory_path = Some(directory.clone());
    }
    if let Some(storage) = &options.storage {
        cfg.storage_path = storage.clone();
    }
    config::validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

pub fn load_directory(cfg: &Config) -> Result<Directory, DirectoryError> {
    match &cfg.directory_path {
        Some(path) => Directory::load(path),
        None => Directory::bundled(),
    }
}

pub fn build_app(cfg: &Config, clipboard: ClipboardService) -> Result<App, RuntimeError> {
    let directory = load_directory(cfg)?;
    let db = slot_store::open_from_config(cfg)?;
    let controller = SelectionController::new(
        directory,
        db,
        clipboard,
        Duration::from_millis(cfg.open_stagger_ms),
    );
    tracing::info!(
        companies = controller.directory().len(),
        history = controller.history().len(),
        storage = %cfg.storage_path.display(),
        "widget initialized"
    );
    Ok(App::new(controller, Duration::from_millis(cfg.toast_duration_ms)))
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let cfg = resolve_config(&options)?;
    let mut app = build_app(&cfg, ClipboardService::system())?;

    install_restore_hook(restore_terminal);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

// Panics leave the loop without unwinding through the normal teardown.
fn install_restore_hook(restore: fn()) {
    let prior = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        prior(panic_info);
    }));
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), RuntimeError> {
    let size = terminal.size()?;
    app.dispatch(Command::Resize(size.width, size.height), Instant::now());

    loop {
        terminal.draw(|f| crate::view::render(f, app))?;

        if event::poll(TICK_RATE)? {
            let evt = event::read()?;
            let command = map_event(&evt, InputMode::for_app(app));
            app.dispatch(command, Instant::now());
        }

        let now = Instant::now();
        app.dispatch(Command::Tick, now);
        launch_due(app, now);

        if app.should_quit() {
            tracing::info!("widget closed");
            return Ok(());
        }
    }
}

fn launch_due(app: &mut App, now: Instant) {
    for link in app.take_launches() {
        match launch_open_target(&link.url) {
            Ok(()) => tracing::debug!(url = %link.url, "opened link"),
            Err(error) => app.report_launch_failure(&link, &error, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{install_restore_hook, RuntimeError};
    use crate::config::ConfigError;

    static RESTORES: AtomicUsize = AtomicUsize::new(0);

    fn count_restore() {
        RESTORES.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn panic_restores_terminal_before_unwinding() {
        install_restore_hook(count_restore);
        let result = std::panic::catch_unwind(|| panic!("render failed"));
        assert!(result.is_err());
        assert!(RESTORES.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn config_errors_exit_with_two() {
        let error = RuntimeError::from(ConfigError::Invalid("bad".into()));
        assert_eq!(error.exit_code(), 2);
    }
}
