// buslog - core/level.rs
//
// Severity levels and the gating order between them.
// Pure lookups: no I/O, no failure modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A severity rank. Higher values are more severe.
///
/// The six canonical levels are exposed as associated constants. Other
/// values are representable because `Logger::write` accepts any level and
/// compares it numerically against the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u32);

impl Level {
    pub const TRACE: Level = Level(10);
    pub const DEBUG: Level = Level(20);
    pub const INFO: Level = Level(30);
    pub const WARN: Level = Level(40);
    pub const ERROR: Level = Level(50);
    pub const FATAL: Level = Level(60);

    /// Wrap a raw numeric level.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw numeric value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the canonical levels in ascending order.
    pub fn all() -> &'static [Level] {
        &[
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::FATAL,
        ]
    }

    /// Five-character padded label used in the server prefix.
    ///
    /// `None` for values outside the canonical set.
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            60 => Some("FATAL"),
            50 => Some("ERROR"),
            40 => Some("WARN "),
            30 => Some("INFO "),
            20 => Some("DEBUG"),
            10 => Some("TRACE"),
            _ => None,
        }
    }

    /// Look up a canonical level by its name, ignoring case and padding.
    pub fn from_name(name: &str) -> Option<Level> {
        let wanted = name.trim();
        Level::all()
            .iter()
            .copied()
            .find(|level| level.name().is_some_and(|n| n.trim().eq_ignore_ascii_case(wanted)))
    }

    /// True if this level is one of the six canonical values.
    pub fn is_canonical(self) -> bool {
        self.name().is_some()
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::new(crate::util::constants::DEFAULT_LEVEL)
    }
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Level(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name.trim_end()),
            None => write!(f, "{}", self.0),
        }
    }
}

/// True when a message at `candidate` passes a logger configured at `configured`.
pub fn is_enabled(configured: Level, candidate: Level) -> bool {
    candidate >= configured
}
