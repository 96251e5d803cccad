// buslog - render/server.rs
//
// Process-stream renderer. Every line starts with
//
//   [<ISO-8601 UTC>] [<LEVEL>] [<name>:<pid>]
//
// styled as a whole per level, then " – " and the body. Levels above WARN go
// to stderr, everything else to stdout. The prefix layout is parsed by
// external tooling and must stay byte-for-byte stable.

use crate::core::level::Level;
use crate::core::message::LogMessage;
use crate::core::settings::{Environment, LoggerSettings};
use crate::platform::streams::{self, Sink};
use crate::render::Renderer;
use crate::util::constants;
use crate::util::error::RenderError;
use chrono::{DateTime, SecondsFormat, Utc};
use colored::{Color, Colorize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

/// Foreground, background and weight applied to a level's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub foreground: Color,
    pub background: Color,
    pub bold: bool,
}

/// Fixed style per canonical level.
pub fn level_style(level: Level) -> Option<LevelStyle> {
    let (foreground, background, bold) = match level {
        Level::FATAL => (Color::White, Color::Red, true),
        Level::ERROR => (Color::White, Color::Red, false),
        Level::WARN => (Color::Black, Color::Yellow, false),
        Level::INFO => (Color::Black, Color::Cyan, false),
        Level::DEBUG => (Color::Black, Color::White, false),
        Level::TRACE => (Color::BrightBlack, Color::Black, false),
        _ => return None,
    };
    Some(LevelStyle {
        foreground,
        background,
        bold,
    })
}

type Styling = Box<dyn Fn(&str) -> String>;

/// Build the per-level styling table once. With colours disabled every level
/// maps to the identity.
fn build_stylings(colors: bool) -> HashMap<Level, Styling> {
    Level::all()
        .iter()
        .filter_map(|&level| {
            let style = level_style(level)?;
            let styling: Styling = if colors {
                Box::new(move |text: &str| {
                    let painted = text
                        .color(style.foreground)
                        .on_color(style.background);
                    if style.bold {
                        painted.bold().to_string()
                    } else {
                        painted.to_string()
                    }
                })
            } else {
                Box::new(|text: &str| text.to_string())
            };
            Some((level, styling))
        })
        .collect()
}

/// Renderer for process environments.
pub struct ServerRenderer {
    name: String,
    pid: u32,
    stylings: HashMap<Level, Styling>,
    stdout: RefCell<Sink>,
    stderr: RefCell<Sink>,
    fallback: RefCell<Sink>,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

impl ServerRenderer {
    /// Renderer writing to the real process streams.
    pub fn new(settings: &LoggerSettings) -> Self {
        Self::with_streams(settings, streams::stdout(), streams::stderr())
    }

    /// Renderer writing to the given standard and error sinks. Failures are
    /// still reported on the process stderr.
    pub fn with_streams(settings: &LoggerSettings, stdout: Sink, stderr: Sink) -> Self {
        Self {
            name: settings.name.clone(),
            pid: std::process::id(),
            stylings: build_stylings(settings.colors),
            stdout: RefCell::new(stdout),
            stderr: RefCell::new(stderr),
            fallback: RefCell::new(streams::stderr()),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the channel render failures are reported on.
    pub fn with_fallback(mut self, fallback: Sink) -> Self {
        self.fallback = RefCell::new(fallback);
        self
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Override the process id shown in the prefix.
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    /// `[<timestamp>] [<LEVEL>] [<name>:<pid>]`, styled for `level`.
    /// Levels outside the canonical set show their number and stay unstyled.
    pub fn build_prefix(&self, level: Level) -> String {
        let timestamp = (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true);
        let label = match level.name() {
            Some(name) => name.to_string(),
            None => format!(
                "{:<width$}",
                level.value(),
                width = constants::LEVEL_LABEL_WIDTH
            ),
        };
        let plain = format!("[{timestamp}] [{label}] [{}:{}]", self.name, self.pid);
        match self.stylings.get(&level) {
            Some(styling) => styling(&plain),
            None => plain,
        }
    }
}

impl Renderer for ServerRenderer {
    fn environment(&self) -> Environment {
        Environment::Server
    }

    fn render(&self, level: Level, message: &LogMessage) -> Result<(), RenderError> {
        let prefix = self.build_prefix(level);
        let separator = constants::BODY_SEPARATOR;

        let (line, sink, sink_name) = if level.value() > constants::ERROR_STREAM_ABOVE {
            let body = match message {
                LogMessage::Error(info) => format!("{}\n\n", info.trace()),
                LogMessage::Text(text) => format!("{text}\n"),
            };
            (format!("{prefix}{separator}{body}"), &self.stderr, "stderr")
        } else {
            (format!("{prefix}{separator}{message}\n"), &self.stdout, "stdout")
        };

        let mut sink = sink.borrow_mut();
        sink.write_all(line.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|source| RenderError::Sink {
                sink: sink_name,
                source,
            })
    }

    fn report_failure(&self, error: &RenderError) {
        let mut fallback = self.fallback.borrow_mut();
        // Nothing is left to report to if the fallback fails too.
        let _ = writeln!(fallback, "{error}");
    }
}

impl std::fmt::Debug for ServerRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerRenderer")
            .field("name", &self.name)
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}
