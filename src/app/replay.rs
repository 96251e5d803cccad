// buslog - app/replay.rs
//
// Feeds a JSON-lines event script through a bus, one event per line:
//
//   {"event": "componentLoaded", "args": {"name": "cart"}}
//
// Blank lines and lines starting with '#' are ignored. Lines that do not
// decode are reported through the logger at WARN and skipped.

use crate::app::bus::LocalEventBus;
use crate::app::logger::Logger;
use crate::core::event::BusEvent;
use crate::util::constants;
use crate::util::error::ReplayError;
use std::io::BufRead;
use std::path::Path;

/// Counts from one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Events decoded and emitted.
    pub emitted: usize,
    /// Handler invocations across all emitted events.
    pub delivered: usize,
    /// Lines that failed to decode.
    pub skipped: usize,
}

/// Decode one script line.
pub fn decode_line(line: &str, line_number: u64) -> Result<BusEvent, ReplayError> {
    serde_json::from_str(line).map_err(|source| ReplayError::Decode {
        line_number,
        source,
    })
}

/// Replay every event from `reader` onto `bus`.
pub fn replay<R: BufRead>(
    reader: R,
    source: Option<&Path>,
    bus: &LocalEventBus,
    logger: &Logger,
) -> Result<ReplayStats, ReplayError> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ReplayError::Io {
            path: source.map(Path::to_path_buf),
            source: e,
        })?;
        let line_number = index as u64 + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match decode_line(trimmed, line_number) {
            Ok(event) => {
                let delivered = bus.emit(&event);
                tracing::trace!(line = line_number, event = event.name(), delivered, "Replayed event");
                stats.emitted += 1;
                stats.delivered += delivered;
            }
            Err(e) => {
                let preview: String = trimmed.chars().take(constants::DEBUG_MAX_LINE_PREVIEW).collect();
                tracing::debug!(line = line_number, text = %preview, "Skipping undecodable line");
                logger.warn(e.to_string());
                stats.skipped += 1;
            }
        }
    }

    tracing::debug!(
        emitted = stats.emitted,
        delivered = stats.delivered,
        skipped = stats.skipped,
        "Replay complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fault::WindowErrorHook;
    use crate::core::level::Level;
    use crate::core::settings::LoggerSettings;
    use crate::render::browser::{BrowserRenderer, ConsoleMethod, RecordingConsole};
    use std::io::Cursor;

    #[test]
    fn test_replay_counts_and_reports_bad_lines() {
        let console = RecordingConsole::new();
        let mut bus = LocalEventBus::new();
        let mut hook = WindowErrorHook::new();
        let logger = Logger::attach(
            LoggerSettings::default().with_level(Level::INFO),
            Box::new(BrowserRenderer::with_console(console.clone())),
            Some(&mut bus),
            &mut hook,
        )
        .unwrap();

        let script = "\
# boot sequence
{\"event\":\"storeLoaded\",\"args\":{\"name\":\"cart\"}}

{\"event\":\"componentRender\",\"args\":{\"name\":\"nav\"}}
not json
{\"event\":\"allStoresLoaded\"}
";
        let stats = replay(Cursor::new(script), None, &bus, &logger).unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                emitted: 3,
                delivered: 2,
                skipped: 1,
            }
        );
        let calls = console.calls();
        assert_eq!(calls[0], (ConsoleMethod::Info, "Store \"cart\" loaded".to_string()));
        assert_eq!(calls[1].0, ConsoleMethod::Warn);
        assert!(calls[1].1.starts_with("event script line 5:"));
        assert_eq!(calls[2], (ConsoleMethod::Info, "All stores loaded".to_string()));
    }
}
