// Sprite atlas backing the terminal renderer
#[path = "assetLoader/mod.rs"]
pub mod asset_loader;

// Input handler module: geometry, hit-testing and the move/resize machine
#[path = "inputHandler/mod.rs"]
pub mod input_handler;

pub mod config;
pub mod error;

// Draw primitives and the immediate-mode widget helpers
pub mod render;

// State management module
pub mod state;

// Terminal frontend
pub mod terminal;

pub use config::Config;
pub use error::{AllocError, Error};
pub use state::WindowManager;

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "rlwm_lib=info";

/// Route tracing output to `config.log_file`. The terminal is the render
/// surface, so nothing is written to stdout or stderr.
pub fn init_logging(config: &Config) -> Result<(), Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call keeps the subscriber that is already installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let source = Config::discover_path();
    let config = match &source {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_logging(&config)?;

    match &source {
        Some(path) => info!("[Config] Loaded {}", path.display()),
        None => info!("[Config] Using built-in defaults"),
    }
    let (w, h) = config.render_size();
    info!(
        "[WM] Starting with {} slots on a {}x{} desktop",
        config.window_limit, w, h
    );

    terminal::run(WindowManager::with_welcome_window(config))
}
