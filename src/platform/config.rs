// buslog - platform/config.rs
//
// Config directory resolution and config.toml loading. Invalid or missing
// values never fail construction: they fall back to defaults and produce a
// warning string the caller may surface.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::level::Level;
use crate::core::settings::{Environment, LoggerSettings};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default location of config.toml, if a platform config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", constants::APP_ID)?;
    let path = dirs.config_dir().join(constants::CONFIG_FILE_NAME);
    tracing::debug!(path = %path.display(), "Default config path resolved");
    Some(path)
}

// =============================================================================
// Raw config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logger]` section.
    pub logger: LoggerSection,
    /// `[diagnostics]` section.
    pub diagnostics: DiagnosticsSection,
}

/// `[logger]` config section. Every field is loosely typed so a wrong type
/// becomes a warning rather than a parse failure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggerSection {
    /// Integer level or level name.
    pub level: Option<toml::Value>,
    pub name: Option<toml::Value>,
    pub environment: Option<toml::Value>,
    pub colors: Option<toml::Value>,
}

/// `[diagnostics]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiagnosticsSection {
    /// Filter for buslog's own tracing output.
    pub level: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub logger: LoggerSettings,
    pub diagnostics_level: Option<String>,
}

// =============================================================================
// Loading
// =============================================================================

/// Load config.toml from `path`.
///
/// A missing file yields defaults when `required` is false and an error
/// otherwise. An unreadable or unparseable file is always an error.
pub fn load_config(path: &Path, required: bool) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return Ok((AppConfig::default(), Vec::new()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate a parsed config, falling back to defaults field by field.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut warnings = Vec::new();
    let mut config = AppConfig::default();
    let section = raw.logger;

    // -- Logger: level --
    if let Some(value) = section.level {
        match parse_level(&value) {
            Some(level) => config.logger.level = level,
            None => warnings.push(format!(
                "[logger] level = {value} is not recognised. Expected a non-negative \
                 integer or one of trace, debug, info, warn, error, fatal. Using default ({}).",
                constants::DEFAULT_LEVEL
            )),
        }
    }

    // -- Logger: name --
    if let Some(value) = section.name {
        match value.as_str() {
            Some(name) => config.logger.name = name.to_string(),
            None => warnings.push(format!(
                "[logger] name = {value} is not a string. Using default (\"{}\").",
                constants::DEFAULT_LOGGER_NAME
            )),
        }
    }

    // -- Logger: environment --
    if let Some(value) = section.environment {
        match value.as_str().map(str::to_lowercase).as_deref() {
            Some("server") => config.logger.environment = Environment::Server,
            Some("browser") => config.logger.environment = Environment::Browser,
            _ => warnings.push(format!(
                "[logger] environment = {value} is not recognised. \
                 Expected \"server\" or \"browser\". Using default (server)."
            )),
        }
    }

    // -- Logger: colors --
    if let Some(value) = section.colors {
        match value.as_bool() {
            Some(colors) => config.logger.colors = colors,
            None => warnings.push(format!(
                "[logger] colors = {value} is not a boolean. Using default (true)."
            )),
        }
    }

    // -- Diagnostics: level --
    if let Some(level) = raw.diagnostics.level {
        let valid = ["error", "warn", "info", "debug", "trace", "off"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.diagnostics_level = Some(level);
        } else {
            warnings.push(format!(
                "[diagnostics] level = \"{level}\" is not recognised. \
                 Valid values: off, error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_DIAGNOSTICS_LEVEL
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

/// Level from an integer or a level name.
pub fn parse_level(value: &toml::Value) -> Option<Level> {
    match value {
        toml::Value::Integer(n) => u32::try_from(*n).ok().map(Level::new),
        toml::Value::String(name) => Level::from_name(name),
        _ => None,
    }
}
