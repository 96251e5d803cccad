// buslog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Logging itself is best-effort: only construction, configuration and the
// replay front-end ever hand these errors to a caller. Render errors are
// consumed inside `Logger::write` and reported through a fallback channel.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all buslog operations.
#[derive(Debug)]
pub enum BuslogError {
    /// Configuration loading or logger construction failed.
    Config(ConfigError),

    /// Writing a rendered line to its sink failed.
    Render(RenderError),

    /// Reading or decoding an event script failed.
    Replay(ReplayError),
}

impl fmt::Display for BuslogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Render(e) => write!(f, "Render error: {e}"),
            Self::Replay(e) => write!(f, "Replay error: {e}"),
        }
    }
}

impl std::error::Error for BuslogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::Replay(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and logger construction.
#[derive(Debug)]
pub enum ConfigError {
    /// The locator has no event bus to attach the logger to.
    MissingEventBus,

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEventBus => {
                write!(f, "No event bus registered; the logger has nothing to attach to")
            }
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::MissingEventBus => None,
        }
    }
}

impl From<ConfigError> for BuslogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

/// Errors raised while emitting a rendered line.
#[derive(Debug)]
pub enum RenderError {
    /// Writing to an output stream or console method failed.
    Sink {
        sink: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink { sink, source } => write!(f, "Failed to write to {sink}: {source}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sink { source, .. } => Some(source),
        }
    }
}

impl From<RenderError> for BuslogError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

// ---------------------------------------------------------------------------
// Replay errors
// ---------------------------------------------------------------------------

/// Errors related to reading an event script.
#[derive(Debug)]
pub enum ReplayError {
    /// A script line is not a recognised event.
    Decode {
        line_number: u64,
        source: serde_json::Error,
    },

    /// I/O error reading the script.
    Io {
        path: Option<PathBuf>,
        source: io::Error,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode {
                line_number,
                source,
            } => write!(f, "event script line {line_number}: {source}"),
            Self::Io { path, source } => match path {
                Some(path) => write!(f, "cannot read event script '{}': {source}", path.display()),
                None => write!(f, "cannot read event script from stdin: {source}"),
            },
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ReplayError> for BuslogError {
    fn from(e: ReplayError) -> Self {
        Self::Replay(e)
    }
}

/// Convenience type alias for buslog results.
pub type Result<T> = std::result::Result<T, BuslogError>;
