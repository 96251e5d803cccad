// buslog - main.rs
//
// Replay front-end. Handles:
// 1. CLI argument parsing
// 2. Diagnostics initialisation (debug mode support)
// 3. config.toml loading with CLI overrides
// 4. Logger registration on a local event bus
// 5. Replaying a JSON-lines event script through the bus

use buslog::app::bus::LocalEventBus;
use buslog::app::locator::{self, ServiceLocator};
use buslog::app::replay;
use buslog::core::fault::{FatalTrigger, WindowErrorHook};
use buslog::core::level::Level;
use buslog::core::settings::Environment;
use buslog::platform::config::{self, AppConfig};
use buslog::platform::panic_hook::PanicHook;
use buslog::render::browser::BrowserRenderer;
use buslog::render::server::ServerRenderer;
use buslog::render::Renderer;
use buslog::util;
use buslog::util::error::{BuslogError, ConfigError, ReplayError};
use clap::Parser;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// buslog - replay framework events as leveled log lines.
///
/// Reads one JSON event per line (`{"event": "...", "args": {...}}`) from a
/// file or stdin and publishes each on an event bus the logger listens to.
#[derive(Parser, Debug)]
#[command(name = "buslog", version, about)]
struct Cli {
    /// Event script to replay (reads stdin if omitted or "-").
    script: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Minimum level: a number (10-60) or trace/debug/info/warn/error/fatal.
    #[arg(short = 'l', long = "level")]
    level: Option<String>,

    /// Logger name shown in the server prefix.
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// Render through console methods instead of process streams.
    #[arg(long = "browser")]
    browser: bool,

    /// Disable prefix styling.
    #[arg(long = "no-color")]
    no_color: bool,

    /// Enable debug diagnostics (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let (app_config, config_warnings) = load_app_config(&cli);
    util::logging::init(cli.debug, app_config.diagnostics_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    if let Err(e) = run(&cli, app_config) {
        tracing::error!(error = %e, "Replay failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load config.toml and apply CLI overrides. Any failure falls back to
/// defaults with a warning; an explicit --config that cannot be read exits.
fn load_app_config(cli: &Cli) -> (AppConfig, Vec<String>) {
    let (mut app_config, mut warnings) = match &cli.config {
        Some(path) => match config::load_config(path, true) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, false).unwrap_or_else(|e| {
                (AppConfig::default(), vec![format!("{e}. Using defaults.")])
            }),
            None => (AppConfig::default(), Vec::new()),
        },
    };

    if let Some(level) = &cli.level {
        let parsed = level
            .parse::<u32>()
            .ok()
            .map(Level::new)
            .or_else(|| Level::from_name(level));
        match parsed {
            Some(level) => app_config.logger.level = level,
            None => warnings.push(format!(
                "--level {level} is not recognised. Keeping {}.",
                app_config.logger.level
            )),
        }
    }
    if let Some(name) = &cli.name {
        app_config.logger.name = name.clone();
    }
    if cli.browser {
        app_config.logger.environment = Environment::Browser;
    }
    if cli.no_color {
        app_config.logger.colors = false;
    }

    (app_config, warnings)
}

fn run(cli: &Cli, app_config: AppConfig) -> Result<(), BuslogError> {
    let settings = app_config.logger;

    let mut panic_hook = PanicHook::new();
    let mut window_hook = WindowErrorHook::new();
    let renderer: Box<dyn Renderer> = match settings.environment {
        Environment::Server => Box::new(ServerRenderer::new(&settings)),
        Environment::Browser => Box::new(BrowserRenderer::new()),
    };
    let trigger: &mut dyn FatalTrigger = match settings.environment {
        Environment::Server => &mut panic_hook,
        Environment::Browser => &mut window_hook,
    };

    let mut locator = ServiceLocator::new(settings).with_event_bus(LocalEventBus::new());
    let logger = locator::register(&mut locator, renderer, trigger)?;
    let bus = locator.event_bus().ok_or(ConfigError::MissingEventBus)?;

    let stats = match cli.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path).map_err(|e| ReplayError::Io {
                path: Some(path.to_path_buf()),
                source: e,
            })?;
            replay::replay(BufReader::new(file), Some(path), bus, &logger)?
        }
        _ => replay::replay(io::stdin().lock(), None, bus, &logger)?,
    };

    tracing::info!(
        emitted = stats.emitted,
        delivered = stats.delivered,
        skipped = stats.skipped,
        "Event script replayed"
    );
    Ok(())
}
