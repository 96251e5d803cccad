// buslog - app/logger.rs
//
// The logging facade: owns the settings and a renderer, exposes one method
// per severity, and wires itself to an event bus and a fatal trigger once at
// construction. Writes are synchronous and never fail from the caller's
// point of view.

use crate::app::bus::EventBus;
use crate::core::fault::{FatalSignal, FatalTrigger, FaultDisposition};
use crate::core::level::{self, Level};
use crate::core::message::LogMessage;
use crate::core::planner;
use crate::core::settings::{Environment, LoggerSettings};
use crate::render::Renderer;
use crate::util::error::ConfigError;
use std::rc::Rc;

/// Leveled logger attached to an event bus.
pub struct Logger {
    settings: LoggerSettings,
    renderer: Box<dyn Renderer>,
}

impl Logger {
    /// A logger that is not attached to anything. Use [`Logger::attach`] to
    /// build one wired to a bus and a fatal trigger.
    pub fn new(settings: LoggerSettings, renderer: Box<dyn Renderer>) -> Self {
        Self { settings, renderer }
    }

    /// Build a logger, subscribe it to `bus` and install its fatal handler.
    ///
    /// Subscriptions depend on the configured level and the renderer's
    /// environment. The renderer is authoritative: `settings.environment`
    /// only chooses which renderer a host builds, and a disagreement is
    /// logged as a warning. The fatal handler is installed at every level.
    /// Calling this twice with the same bus subscribes twice.
    pub fn attach<B, T>(
        settings: LoggerSettings,
        renderer: Box<dyn Renderer>,
        bus: Option<&mut B>,
        trigger: &mut T,
    ) -> Result<Rc<Logger>, ConfigError>
    where
        B: EventBus + ?Sized,
        T: FatalTrigger + ?Sized,
    {
        let bus = bus.ok_or(ConfigError::MissingEventBus)?;
        if settings.environment != renderer.environment() {
            tracing::warn!(
                configured = %settings.environment,
                renderer = %renderer.environment(),
                "Configured environment differs from the renderer; planning for the renderer"
            );
        }
        let logger = Rc::new(Logger::new(settings, renderer));

        let bindings = planner::plan(logger.level(), logger.environment());
        for binding in &bindings {
            let target = Rc::clone(&logger);
            let binding = *binding;
            bus.on(
                binding.event,
                Box::new(move |event| {
                    if let Some(message) = (binding.render)(event) {
                        target.write(binding.level, &message);
                    }
                }),
            );
        }

        let target = Rc::clone(&logger);
        trigger.install(Box::new(move |signal| target.handle_fatal(signal)));

        tracing::debug!(
            level = %logger.level(),
            name = %logger.settings.name,
            environment = %logger.environment(),
            subscriptions = bindings.len(),
            "Logger attached to event bus"
        );

        Ok(logger)
    }

    pub fn settings(&self) -> &LoggerSettings {
        &self.settings
    }

    pub fn level(&self) -> Level {
        self.settings.level
    }

    /// Environment of the renderer, which may differ from
    /// `settings().environment`.
    pub fn environment(&self) -> Environment {
        self.renderer.environment()
    }

    /// True if a message at `level` would be written.
    pub fn is_enabled(&self, level: Level) -> bool {
        level::is_enabled(self.settings.level, level)
    }

    /// Write one message. Below the configured level this is a no-op; render
    /// failures are reported on the renderer's fallback channel and dropped.
    pub fn write(&self, level: Level, message: &LogMessage) {
        if !self.is_enabled(level) {
            return;
        }
        if let Err(e) = self.renderer.render(level, message) {
            self.renderer.report_failure(&e);
        }
    }

    pub fn trace(&self, message: impl Into<LogMessage>) {
        self.write(Level::TRACE, &message.into());
    }

    pub fn debug(&self, message: impl Into<LogMessage>) {
        self.write(Level::DEBUG, &message.into());
    }

    pub fn info(&self, message: impl Into<LogMessage>) {
        self.write(Level::INFO, &message.into());
    }

    pub fn warn(&self, message: impl Into<LogMessage>) {
        self.write(Level::WARN, &message.into());
    }

    pub fn error(&self, message: impl Into<LogMessage>) {
        self.write(Level::ERROR, &message.into());
    }

    pub fn fatal(&self, message: impl Into<LogMessage>) {
        self.write(Level::FATAL, &message.into());
    }

    /// Log an uncaught fault at FATAL. Console environments take ownership of
    /// the fault; process environments let it continue.
    fn handle_fatal(&self, signal: &FatalSignal) -> FaultDisposition {
        match signal {
            FatalSignal::Uncaught(info) => self.fatal(info.clone()),
            FatalSignal::WindowError {
                message,
                source,
                line,
            } => self.fatal(format!("{source}:{line} {message}")),
        }
        match self.environment() {
            Environment::Browser => FaultDisposition::Handled,
            Environment::Server => FaultDisposition::Propagate,
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &self.settings)
            .field("environment", &self.environment())
            .finish_non_exhaustive()
    }
}
