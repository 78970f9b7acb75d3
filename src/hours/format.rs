// src/hours/format.rs
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::parse;
use super::types::{MINUTES_PER_DAY, ParsedRange};

/// Display convention for clock times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `7:00 AM`
    #[default]
    H12,
    /// `07:00`
    H24,
}

/// Minutes since midnight (wrapped to one day) as clock text.
pub fn format_time(minutes: u16, fmt: TimeFormat) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let (h, m) = (minutes / 60, minutes % 60);
    match fmt {
        TimeFormat::H12 => {
            let meridiem = if h < 12 { "AM" } else { "PM" };
            let h12 = match h % 12 { 0 => 12, other => other };
            format!("{h12}:{m:02} {meridiem}")
        }
        TimeFormat::H24 => format!("{h:02}:{m:02}"),
    }
}

pub fn format_instant(t: NaiveDateTime, fmt: TimeFormat) -> String {
    let minutes = (t.hour() * 60 + t.minute()) as u16;
    format_time(minutes, fmt)
}

pub fn format_range(r: &ParsedRange, fmt: TimeFormat) -> String {
    let sep = match fmt { TimeFormat::H12 => " - ", TimeFormat::H24 => "-" };
    join!(format_time(r.start, fmt), sep, &format_time(r.end, fmt))
}

/// Canonical `HH:mm-HH:mm` for any parseable range text, `None` otherwise.
pub fn normalize_range_text(text: &str) -> Option<String> {
    parse::parse(text).range().map(|r| format_range(&r, TimeFormat::H24))
}
