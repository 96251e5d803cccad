// buslog - render/mod.rs
//
// Environment-specific rendering: turns a (level, message) pair into one
// output action. Dependencies: core (levels, messages), platform (sinks).

pub mod browser;
pub mod server;

use crate::core::level::Level;
use crate::core::message::LogMessage;
use crate::core::settings::Environment;
use crate::util::error::RenderError;
use std::io::{self, Write};

/// Formats and emits one already-gated line.
pub trait Renderer {
    /// Environment this renderer serves. Selects the environment-specific
    /// subscriptions and how fatal signals are disposed of.
    fn environment(&self) -> Environment;

    /// Emit exactly one line to exactly one sink.
    fn render(&self, level: Level, message: &LogMessage) -> Result<(), RenderError>;

    /// Last-resort channel for failures raised by [`Renderer::render`].
    /// Must not fail itself: a write error here is discarded.
    fn report_failure(&self, error: &RenderError) {
        let _ = writeln!(io::stderr(), "{error}");
    }
}
