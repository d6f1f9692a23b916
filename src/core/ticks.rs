use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ValueRange;

/// Time zone used when formatting time-axis and tooltip labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeLabelZone {
    /// The host's local zone.
    #[default]
    Local,
    /// A fixed UTC offset in seconds east of UTC.
    FixedOffsetSeconds(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeTick {
    pub timestamp: i64,
    pub x: f64,
    pub label: String,
}

/// Evenly spaced value ticks from `range.max` at `top` down to `range.min` at `bottom`.
#[must_use]
pub fn value_ticks(range: ValueRange, top: f64, bottom: f64, count: usize) -> Vec<ValueTick> {
    let height = bottom - top;
    (0..count)
        .map(|i| {
            let frac = tick_fraction(i, count);
            let value = range.max * (1.0 - frac) + range.min * frac;
            ValueTick {
                value,
                y: top + frac * height,
                label: format_value_label(value),
            }
        })
        .collect()
}

/// Evenly spaced time ticks between `start` and `end` inclusive.
#[must_use]
pub fn time_ticks(
    start: i64,
    end: i64,
    left: f64,
    width: f64,
    count: usize,
    zone: TimeLabelZone,
) -> Vec<TimeTick> {
    let span = end.saturating_sub(start) as f64;
    (0..count)
        .map(|i| {
            let frac = tick_fraction(i, count);
            let timestamp = start.saturating_add((span * frac) as i64);
            TimeTick {
                timestamp,
                x: left + frac * width,
                label: format_time_label(timestamp, zone),
            }
        })
        .collect()
}

#[must_use]
pub fn format_value_label(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats unix milliseconds as `YYYY-MM-DD HH:mm` in `zone`.
#[must_use]
pub fn format_time_label(timestamp: i64, zone: TimeLabelZone) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp) else {
        return timestamp.to_string();
    };
    const PATTERN: &str = "%Y-%m-%d %H:%M";
    match zone {
        TimeLabelZone::Local => utc.with_timezone(&Local).format(PATTERN).to_string(),
        TimeLabelZone::FixedOffsetSeconds(seconds) => match FixedOffset::east_opt(seconds) {
            Some(offset) => utc.with_timezone(&offset).format(PATTERN).to_string(),
            None => utc.format(PATTERN).to_string(),
        },
    }
}

fn tick_fraction(index: usize, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    index as f64 / (count - 1) as f64
}
