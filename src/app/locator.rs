// buslog - app/locator.rs
//
// Minimal dependency locator: supplies the logger settings and the shared
// event bus, and keeps the registered logger for the rest of the host.

use crate::app::bus::LocalEventBus;
use crate::app::logger::Logger;
use crate::core::fault::FatalTrigger;
use crate::core::settings::LoggerSettings;
use crate::render::Renderer;
use crate::util::error::ConfigError;
use std::rc::Rc;

/// Holds what the logger needs at construction and the logger afterwards.
#[derive(Debug, Default)]
pub struct ServiceLocator {
    settings: LoggerSettings,
    event_bus: Option<LocalEventBus>,
    logger: Option<Rc<Logger>>,
}

impl ServiceLocator {
    pub fn new(settings: LoggerSettings) -> Self {
        Self {
            settings,
            event_bus: None,
            logger: None,
        }
    }

    pub fn with_event_bus(mut self, bus: LocalEventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn settings(&self) -> &LoggerSettings {
        &self.settings
    }

    pub fn event_bus(&self) -> Option<&LocalEventBus> {
        self.event_bus.as_ref()
    }

    /// The registered logger, if [`register`] has run.
    pub fn logger(&self) -> Option<Rc<Logger>> {
        self.logger.clone()
    }
}

/// Build a logger from the locator's settings and bus, and register it.
///
/// Fails with [`ConfigError::MissingEventBus`] when the locator has no bus.
pub fn register(
    locator: &mut ServiceLocator,
    renderer: Box<dyn Renderer>,
    trigger: &mut dyn FatalTrigger,
) -> Result<Rc<Logger>, ConfigError> {
    let logger = Logger::attach(
        locator.settings.clone(),
        renderer,
        locator.event_bus.as_mut(),
        trigger,
    )?;
    locator.logger = Some(Rc::clone(&logger));
    tracing::info!(name = %locator.settings.name, "Logger registered");
    Ok(logger)
}
