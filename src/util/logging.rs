// buslog - util/logging.rs
//
// Diagnostics for buslog itself (config loading, wiring, replay progress).
// These go through `tracing` to stderr and are separate from the lines the
// logger facade renders for the application.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [diagnostics] level = "debug"

use super::constants;
use tracing_subscriber::EnvFilter;

/// Filter directive for the diagnostics subscriber.
///
/// Priority: RUST_LOG > --debug > `[diagnostics] level` > default "warn".
/// An empty RUST_LOG counts as unset.
pub fn filter_directive(rust_log: Option<&str>, debug_flag: bool, config_level: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => directive.to_string(),
        None if debug_flag => "debug".to_string(),
        None => config_level
            .unwrap_or(constants::DEFAULT_DIAGNOSTICS_LEVEL)
            .to_lowercase(),
    }
}

/// Initialise the diagnostics subscriber.
///
/// A host that already installed a global subscriber keeps it; buslog then
/// reports through that one.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), debug_flag, config_level);
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_DIAGNOSTICS_LEVEL));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok();

    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        directive = %directive,
        installed,
        "Diagnostics initialised"
    );
}
