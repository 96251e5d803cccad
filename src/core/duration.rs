// buslog - core/duration.rs
//
// Compact human-readable rendering of high-resolution timings reported by
// build and render events, e.g. "1.5 s", "12 ms", "340 μs".

use serde::Deserialize;
use std::time::Duration;

/// A `[seconds, nanoseconds]` pair as carried by timing payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HrTime(pub u64, pub u32);

impl From<HrTime> for Duration {
    fn from(hr: HrTime) -> Self {
        Duration::new(hr.0, 0) + Duration::from_nanos(u64::from(hr.1))
    }
}

impl From<Duration> for HrTime {
    fn from(d: Duration) -> Self {
        HrTime(d.as_secs(), d.subsec_nanos())
    }
}

const UNITS: [&str; 6] = ["h", "min", "s", "ms", "μs", "ns"];

/// Render using the largest unit whose value reaches 1.
///
/// Values below 10 keep two decimals, larger values none; trailing zeros are
/// dropped. A zero timing renders as an empty string.
pub fn pretty(hr: HrTime) -> String {
    let HrTime(secs, nanos) = hr;
    let secs = secs as f64;
    let nanos = f64::from(nanos);

    let steps = [
        secs / 3_600.0,
        (secs % 3_600.0) / 60.0,
        secs % 60.0 + nanos / 1e9,
        nanos / 1e6,
        (nanos % 1e6) / 1e3,
        nanos % 1e3,
    ];

    for (value, unit) in steps.iter().zip(UNITS) {
        if *value >= 1.0 {
            return format!("{} {unit}", format_step(*value));
        }
    }
    String::new()
}

fn format_step(value: f64) -> String {
    let text = if value >= 10.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    };
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds() {
        assert_eq!(pretty(HrTime(1, 500_000_000)), "1.5 s");
        assert_eq!(pretty(HrTime(2, 0)), "2 s");
        assert_eq!(pretty(HrTime(42, 0)), "42 s");
    }

    #[test]
    fn test_sub_second_units() {
        assert_eq!(pretty(HrTime(0, 12_000_000)), "12 ms");
        assert_eq!(pretty(HrTime(0, 1_234_567)), "1.23 ms");
        assert_eq!(pretty(HrTime(0, 340_000)), "340 μs");
        assert_eq!(pretty(HrTime(0, 7)), "7 ns");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(pretty(HrTime(90, 0)), "1.5 min");
        assert_eq!(pretty(HrTime(7_200, 0)), "2 h");
    }

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(pretty(HrTime(0, 0)), "");
    }

    #[test]
    fn test_duration_conversion() {
        let hr = HrTime::from(Duration::from_millis(1_250));
        assert_eq!(hr, HrTime(1, 250_000_000));
        assert_eq!(Duration::from(hr), Duration::from_millis(1_250));
    }
}
