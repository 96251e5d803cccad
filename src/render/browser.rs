// buslog - render/browser.rs
//
// Console-style renderer: no styling, messages pass through unchanged and
// are dispatched to one of four console methods by severity.

use crate::core::level::Level;
use crate::core::message::LogMessage;
use crate::core::settings::Environment;
use crate::platform::streams::{self, Sink};
use crate::render::Renderer;
use crate::util::error::RenderError;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// The four console methods a line can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Log,
}

impl ConsoleMethod {
    /// Method for a level: ≥ ERROR, ≥ WARN, ≥ INFO, anything else.
    pub fn for_level(level: Level) -> Self {
        if level >= Level::ERROR {
            ConsoleMethod::Error
        } else if level >= Level::WARN {
            ConsoleMethod::Warn
        } else if level >= Level::INFO {
            ConsoleMethod::Info
        } else {
            ConsoleMethod::Log
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConsoleMethod::Error => "console.error",
            ConsoleMethod::Warn => "console.warn",
            ConsoleMethod::Info => "console.info",
            ConsoleMethod::Log => "console.log",
        }
    }
}

/// A console with one entry point per method.
pub trait Console {
    fn write(&self, method: ConsoleMethod, text: &str) -> io::Result<()>;
}

/// Console backed by the process streams: error and warn to stderr,
/// info and log to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write(&self, method: ConsoleMethod, text: &str) -> io::Result<()> {
        match method {
            ConsoleMethod::Error | ConsoleMethod::Warn => writeln!(io::stderr().lock(), "{text}"),
            ConsoleMethod::Info | ConsoleMethod::Log => writeln!(io::stdout().lock(), "{text}"),
        }
    }
}

/// Console that records every call. Clones share the same record.
#[derive(Debug, Default, Clone)]
pub struct RecordingConsole {
    calls: Rc<RefCell<Vec<(ConsoleMethod, String)>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(ConsoleMethod, String)> {
        self.calls.borrow().clone()
    }
}

impl Console for RecordingConsole {
    fn write(&self, method: ConsoleMethod, text: &str) -> io::Result<()> {
        self.calls.borrow_mut().push((method, text.to_string()));
        Ok(())
    }
}

/// Renderer for console environments.
pub struct BrowserRenderer {
    console: Box<dyn Console>,
    fallback: RefCell<Sink>,
}

impl BrowserRenderer {
    /// Renderer dispatching to the process-stream console.
    pub fn new() -> Self {
        Self::with_console(StdConsole)
    }

    pub fn with_console(console: impl Console + 'static) -> Self {
        Self {
            console: Box::new(console),
            fallback: RefCell::new(streams::stderr()),
        }
    }

    /// Replace the channel console failures are reported on.
    pub fn with_fallback(mut self, fallback: Sink) -> Self {
        self.fallback = RefCell::new(fallback);
        self
    }
}

impl Default for BrowserRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BrowserRenderer {
    fn environment(&self) -> Environment {
        Environment::Browser
    }

    fn render(&self, level: Level, message: &LogMessage) -> Result<(), RenderError> {
        let method = ConsoleMethod::for_level(level);
        let text = match (method, message) {
            (ConsoleMethod::Error, LogMessage::Error(info)) => match info.stack.as_deref() {
                Some(stack) => format!("{}\n{stack}", info.header()),
                None => info.header(),
            },
            _ => message.to_string(),
        };
        self.console
            .write(method, &text)
            .map_err(|source| RenderError::Sink {
                sink: method.as_str(),
                source,
            })
    }

    fn report_failure(&self, error: &RenderError) {
        let mut fallback = self.fallback.borrow_mut();
        let _ = writeln!(fallback, "{error}");
    }
}

impl std::fmt::Debug for BrowserRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserRenderer").finish_non_exhaustive()
    }
}
