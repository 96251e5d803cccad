// buslog - tests/e2e_logger.rs
//
// End-to-end tests for the event-bus-to-log-line pipeline.
//
// These tests go through the public surface only: config parsing, locator
// registration, real bus delivery and real renderers writing into in-memory
// sinks. Line layouts asserted here are what external log parsers rely on.

use buslog::app::bus::LocalEventBus;
use buslog::app::locator::{register, ServiceLocator};
use buslog::app::replay::replay;
use buslog::core::event::{BusEvent, Named};
use buslog::core::fault::WindowErrorHook;
use buslog::core::settings::Environment;
use buslog::platform::config::load_config;
use buslog::platform::panic_hook::PanicHook;
use buslog::platform::streams::SharedBuffer;
use buslog::render::browser::{BrowserRenderer, Console, ConsoleMethod, RecordingConsole};
use buslog::render::server::ServerRenderer;
use buslog::util::error::ConfigError;
use buslog::{ErrorInfo, Level, LogMessage, Logger, LoggerSettings};
use regex::Regex;
use std::io::{self, Cursor, Write};
use std::panic;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Helpers
// =============================================================================

struct Server {
    logger: Rc<Logger>,
    locator: ServiceLocator,
    out: SharedBuffer,
    err: SharedBuffer,
}

impl Server {
    fn bus(&self) -> &LocalEventBus {
        self.locator.event_bus().unwrap()
    }
}

/// Server logger registered on a locator with a fresh bus, colours off.
fn server(level: Level) -> Server {
    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let settings = LoggerSettings::default()
        .with_level(level)
        .with_name("e2e")
        .with_colors(false);
    let renderer = ServerRenderer::with_streams(&settings, out.sink(), err.sink());
    let mut locator = ServiceLocator::new(settings).with_event_bus(LocalEventBus::new());
    let mut hook = WindowErrorHook::new();
    let logger = register(&mut locator, Box::new(renderer), &mut hook).unwrap();
    Server {
        logger,
        locator,
        out,
        err,
    }
}

fn line_pattern(level: &str, body: &str) -> Regex {
    Regex::new(&format!(
        r"^\[\d{{4}}-\d{{2}}-\d{{2}}T\d{{2}}:\d{{2}}:\d{{2}}\.\d{{3}}Z\] \[{}\] \[e2e:\d+\] \x{{2013}} {}$",
        regex::escape(level),
        regex::escape(body)
    ))
    .unwrap()
}

// =============================================================================
// Subscription gating
// =============================================================================

/// ERROR-level configuration subscribes only the generic error event.
#[test]
fn e2e_error_level_subscribes_only_error() {
    let server = server(Level::ERROR);
    assert_eq!(server.bus().event_names(), vec!["error"]);

    server.bus().emit(&BusEvent::Info("ignored".into()));
    server.bus().emit(&BusEvent::Debug("ignored".into()));
    assert!(server.out.is_empty());
    assert!(server.err.is_empty());

    server.bus().emit(&BusEvent::Error("disk failure".into()));
    assert!(server.err.contents().contains("disk failure"));
}

/// Every handler the planner attaches is attached exactly once.
#[test]
fn e2e_trace_level_attaches_each_event_once() {
    let server = server(Level::TRACE);
    for name in server.bus().event_names() {
        assert_eq!(server.bus().listener_count(name), 1, "{name}");
    }
    assert!(server.bus().listener_count("appBundleChanged") == 1);
    assert_eq!(server.bus().listener_count("componentBound"), 0);
}

// =============================================================================
// Line layout
// =============================================================================

/// componentLoaded at INFO renders the documented body on stdout.
#[test]
fn e2e_component_loaded_round_trip() {
    let server = server(Level::INFO);
    server.bus().emit(&BusEvent::ComponentLoaded(Named {
        name: "x".to_string(),
    }));

    let out = server.out.contents();
    let line = out.strip_suffix('\n').expect("line ends with newline");
    assert!(
        line_pattern("INFO ", "Component \"x\" loaded").is_match(line),
        "unexpected line {line:?}"
    );
}

/// Error objects at ERROR go to stderr with their trace and a blank line.
#[test]
fn e2e_error_object_formatting() {
    let server = server(Level::INFO);
    let error = ErrorInfo::new("TypeError", "boom").with_stack("TypeError: boom\n  at ...");
    server.logger.write(Level::ERROR, &LogMessage::from(error));

    assert!(server.out.is_empty());
    let err = server.err.contents();
    assert!(err.contains("[ERROR]"));
    assert!(err.contains(" \u{2013} TypeError: boom\n  at ...\n\n"));
    assert!(err.ends_with("\n\n"));
}

/// 40 stays on stdout, 41 moves to stderr.
#[test]
fn e2e_stream_boundary() {
    let server = server(Level::TRACE);
    server.logger.write(Level::new(40), &"forty".into());
    server.logger.write(Level::new(41), &"forty-one".into());

    assert!(server.out.contents().contains(" \u{2013} forty\n"));
    assert!(!server.out.contents().contains("forty-one"));
    assert!(server.err.contents().contains(" \u{2013} forty-one\n"));
}

/// Non-canonical levels are compared numerically.
#[test]
fn e2e_intermediate_level_gating() {
    let server = server(Level::new(45));
    server.logger.warn("below threshold");
    server.logger.write(Level::new(45), &"exactly at threshold".into());
    server.logger.error("above threshold");

    assert!(server.out.is_empty());
    let err = server.err.contents();
    assert!(!err.contains("below threshold"));
    assert!(err.contains("[45   ]"));
    assert!(err.contains("exactly at threshold"));
    assert!(err.contains("above threshold"));
}

/// Milestone events are not deduplicated.
#[test]
fn e2e_identical_events_produce_identical_lines() {
    let server = server(Level::INFO);
    let event = BusEvent::StoreLoaded(Named {
        name: "cart".to_string(),
    });
    server.bus().emit(&event);
    server.bus().emit(&event);

    let out = server.out.contents();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert!(line_pattern("INFO ", "Store \"cart\" loaded").is_match(line));
    }
}

// =============================================================================
// Browser flavour
// =============================================================================

/// Console dispatch by level and the window-error hook at FATAL.
#[test]
fn e2e_browser_dispatch_and_window_error() {
    let console = RecordingConsole::new();
    let settings = LoggerSettings::default()
        .with_level(Level::TRACE)
        .with_environment(Environment::Browser);
    let mut locator = ServiceLocator::new(settings).with_event_bus(LocalEventBus::new());
    let mut hook = WindowErrorHook::new();
    let logger = register(
        &mut locator,
        Box::new(BrowserRenderer::with_console(console.clone())),
        &mut hook,
    )
    .unwrap();

    logger.trace("t");
    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error(ErrorInfo::new("Error", "e").with_stack("  at x"));
    assert!(hook.report("bad thing", "bundle.js", 42));

    let methods: Vec<ConsoleMethod> = console.calls().iter().map(|(m, _)| *m).collect();
    assert_eq!(
        methods,
        vec![
            ConsoleMethod::Log,
            ConsoleMethod::Log,
            ConsoleMethod::Info,
            ConsoleMethod::Warn,
            ConsoleMethod::Error,
            ConsoleMethod::Error,
        ]
    );
    let calls = console.calls();
    assert_eq!(calls[4].1, "Error: e\n  at x");
    assert_eq!(calls[5].1, "bundle.js:42 bad thing");
}

/// Console and fallback that both reject writes, like a closed stderr pipe.
struct Closed;

impl Console for Closed {
    fn write(&self, _method: ConsoleMethod, _text: &str) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

impl Write for Closed {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

/// A console that cannot be written to never takes the caller down, even
/// when the fallback channel is closed as well.
#[test]
fn e2e_browser_write_failure_is_contained() {
    let settings = LoggerSettings::default()
        .with_level(Level::TRACE)
        .with_environment(Environment::Browser);
    let mut locator = ServiceLocator::new(settings).with_event_bus(LocalEventBus::new());
    let mut hook = WindowErrorHook::new();
    let renderer = BrowserRenderer::with_console(Closed).with_fallback(Box::new(Closed));
    let logger = register(&mut locator, Box::new(renderer), &mut hook).unwrap();

    let bus = locator.event_bus().unwrap();
    assert_eq!(bus.emit(&BusEvent::Error("disk failure".into())), 1);
    bus.emit(&BusEvent::Warn("disk almost full".into()));
    logger.fatal("still alive");
    assert!(hook.report("bad thing", "bundle.js", 42));
}

// =============================================================================
// Server fatal trigger
// =============================================================================

/// A panic on the attaching thread is logged at FATAL on stderr, and the
/// previously installed hook still runs. Panics on other threads are not
/// logged.
#[test]
fn e2e_panic_is_logged_at_fatal_and_still_propagates() {
    static PREVIOUS_HOOK_CALLS: AtomicUsize = AtomicUsize::new(0);
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        PREVIOUS_HOOK_CALLS.fetch_add(1, Ordering::SeqCst);
        default_hook(info);
    }));

    let out = SharedBuffer::new();
    let err = SharedBuffer::new();
    let settings = LoggerSettings::default()
        .with_level(Level::FATAL)
        .with_colors(false);
    let renderer = ServerRenderer::with_streams(&settings, out.sink(), err.sink());
    let mut locator = ServiceLocator::new(settings).with_event_bus(LocalEventBus::new());
    let mut hook = PanicHook::new();
    let _logger = register(&mut locator, Box::new(renderer), &mut hook).unwrap();

    let result = panic::catch_unwind(|| panic!("kaboom"));
    assert!(result.is_err());
    assert!(PREVIOUS_HOOK_CALLS.load(Ordering::SeqCst) >= 1);

    let logged = err.contents();
    assert!(logged.contains("[FATAL]"), "{logged:?}");
    assert!(logged.contains(" \u{2013} Panic: kaboom\n    at "), "{logged:?}");
    assert!(logged.ends_with("\n\n"));
    assert!(out.is_empty());

    let elsewhere = std::thread::spawn(|| panic!("elsewhere")).join();
    assert!(elsewhere.is_err());
    assert!(!err.contents().contains("elsewhere"));
}

// =============================================================================
// Configuration and replay
// =============================================================================

/// A config file on disk drives the level and name; a locator without a bus
/// refuses to build a logger.
#[test]
fn e2e_config_file_and_missing_bus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logger]\nlevel = \"warn\"\nname = \"shop\"\n").unwrap();

    let (config, warnings) = load_config(&path, true).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(config.logger.level, Level::WARN);
    assert_eq!(config.logger.name, "shop");

    let mut locator = ServiceLocator::new(config.logger);
    let mut hook = WindowErrorHook::new();
    let result = register(
        &mut locator,
        Box::new(BrowserRenderer::with_console(RecordingConsole::new())),
        &mut hook,
    );
    assert!(matches!(result, Err(ConfigError::MissingEventBus)));
}

/// A server-side script replays build milestones with durations.
#[test]
fn e2e_replay_build_milestones() {
    let server = server(Level::INFO);
    let script = concat!(
        r#"{"event":"appDefinitionsBuilt","args":{"hrTime":[1,500000000]}}"#,
        "\n",
        r#"{"event":"appBundleBuilt","args":{"path":"public/app.js","hrTime":[0,12000000]}}"#,
        "\n",
        r#"{"event":"appBundleChanged","args":{"changedFiles":["a.js","b.js"]}}"#,
        "\n",
        r#"{"event":"componentRendered","args":{"name":"nav"}}"#,
        "\n",
    );

    let stats = replay(Cursor::new(script), None, server.bus(), &server.logger).unwrap();
    assert_eq!(stats.emitted, 4);
    assert_eq!(stats.delivered, 3);

    let out = server.out.contents();
    let lines: Vec<&str> = out.lines().collect();
    assert!(line_pattern("INFO ", "App definitions have been built (1.5 s)").is_match(lines[0]));
    assert!(line_pattern(
        "INFO ",
        "Browser app bundle has been built at public/app.js (12 ms)"
    )
    .is_match(lines[1]));
    assert!(line_pattern(
        "INFO ",
        "App bundle has been updated, changed files: [a.js,b.js]"
    )
    .is_match(lines[2]));
}
