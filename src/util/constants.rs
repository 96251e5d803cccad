// buslog - util/constants.rs
//
// Single source of truth for all named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "buslog";

/// Application identifier used for config directories.
pub const APP_ID: &str = "buslog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Logger defaults
// =============================================================================

/// Numeric value of the level used when the configuration omits one (INFO).
pub const DEFAULT_LEVEL: u32 = 30;

/// Logger name used in the server prefix when the configuration omits one.
pub const DEFAULT_LOGGER_NAME: &str = "app";

/// Width every level label is padded to in the server prefix.
pub const LEVEL_LABEL_WIDTH: usize = 5;

/// Separator between the server prefix and the message body.
/// This is an en dash, kept byte-for-byte for tools that parse log lines.
pub const BODY_SEPARATOR: &str = " \u{2013} ";

/// Levels strictly above this value go to the error stream on the server.
pub const ERROR_STREAM_ABOVE: u32 = 40;

// =============================================================================
// Component tag names
// =============================================================================

/// Prefix applied to custom component tag names.
pub const COMPONENT_TAG_PREFIX: &str = "CAT-";

/// Reserved component rendered as the document head element.
pub const HEAD_COMPONENT_NAME: &str = "HEAD";

/// Reserved component rendered as the root document element.
pub const DOCUMENT_COMPONENT_NAME: &str = "DOCUMENT";

/// Tag name the root document component renders under.
pub const DOCUMENT_TAG_NAME: &str = "HTML";

// =============================================================================
// Diagnostics
// =============================================================================

/// Default filter for the crate's own tracing diagnostics.
/// Kept quiet so diagnostics do not interleave with logger output.
pub const DEFAULT_DIAGNOSTICS_LEVEL: &str = "warn";

/// Maximum length of an event-script line echoed in diagnostics.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
