// buslog - core/settings.rs
//
// Validated logger configuration. Fixed for the lifetime of a logger.

use crate::core::level::Level;
use crate::util::constants;
use serde::Deserialize;
use std::fmt;

/// Execution environment the logger renders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Process streams with a coloured, process-tagged prefix.
    #[default]
    Server,

    /// Console-style methods, no styling.
    Browser,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Server => f.write_str("server"),
            Environment::Browser => f.write_str("browser"),
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerSettings {
    /// Minimum level that produces output.
    pub level: Level,

    /// Name shown in the server prefix.
    pub name: String,

    /// Which renderer the logger is built for.
    pub environment: Environment,

    /// Whether the server prefix is styled.
    pub colors: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: Level::default(),
            name: constants::DEFAULT_LOGGER_NAME.to_string(),
            environment: Environment::default(),
            colors: true,
        }
    }
}

impl LoggerSettings {
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }
}
