// src/specs/library.rs
//! Reader for the location-block (weekly widget) layout used by library pages.
//!
//! Layout:
//! - A header row of `<th>` cells, one per day (`"Tuesday"`, `"Tue Sep 23"`, …).
//!   The column whose header names the requested day is the one we read.
//! - `tr.s-lc-whw-loc`: a location. Name in `.s-lc-whw-locname` (or the first
//!   cell), hours in the day column. `"-"` means closed that day.
//! - `tr.s-lc-whw-subloc`: a service inside the preceding location
//!   ("Night Powell", "CLICC Classroom Hub"). Its name becomes the entry label;
//!   `"-"` rows are dropped.
//!
//! A cell may list several ranges separated by commas; each becomes an entry.
//!
//! Also here: [`service_summary`], the per-service open/closed view of a
//! location's entries.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::config::consts::{
    CLOSED_TEXT, LIBRARY_LOC_CLASS, LIBRARY_MAIN_LABEL, LIBRARY_SUBLOC_CLASS, NO_HOURS_MARK,
};
use crate::core::html::{self, Block};
use crate::hours::format::{TimeFormat, format_range};
use crate::hours::parse;
use crate::hours::types::{ParseOutcome, RawScheduleEntry};
use crate::normalize::normalize_key;

const MONTHS: [&str; 12] = ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

pub fn extract(markup: &str, day: NaiveDate) -> BTreeMap<String, Vec<RawScheduleEntry>> {
    let mut out: BTreeMap<String, Vec<RawScheduleEntry>> = BTreeMap::new();
    let rows = html::find_all_blocks(markup, "tr");

    let Some((header_at, col)) = rows.iter().enumerate().find_map(|(i, row)| {
        let cells = html::cells(row.inner);
        let headed = cells.iter().any(|c| c.header);
        let col = cells.iter().position(|c| c.header && names_day(&c.text, day));
        headed.then_some(col).flatten().map(|col| (i, col))
    }) else {
        logd!("no header column for {day} ({})", day.weekday());
        return out;
    };

    // key of the location that sub-service rows attach to
    let mut current: Option<String> = None;

    for row in &rows[header_at + 1..] {
        if row.has_class(LIBRARY_LOC_CLASS) {
            current = None;
            let Some((name, text)) = name_and_day_cell(row, LIBRARY_LOC_CLASS, col) else { continue };
            let key = normalize_key(&name);
            if key.is_empty() {
                continue;
            }
            let text = if is_no_hours(&text) { s!(CLOSED_TEXT) } else { text };
            out.entry(key.clone()).or_default().extend(super::split_cell(LIBRARY_MAIN_LABEL, &text));
            current = Some(key);
        } else if row.has_class(LIBRARY_SUBLOC_CLASS) {
            let Some(key) = current.as_ref() else { continue };
            let Some((name, text)) = name_and_day_cell(row, LIBRARY_SUBLOC_CLASS, col) else { continue };
            if name.is_empty() || is_no_hours(&text) {
                continue;
            }
            out.entry(key.clone()).or_default().extend(super::split_cell(&name, &text));
        }
    }

    out
}

/// Row name (from the `<class>name` element, else the first cell) and the
/// text of the day column.
fn name_and_day_cell(row: &Block, row_class: &str, col: usize) -> Option<(String, String)> {
    let cells = html::cells(row.inner);
    let text = cells.get(col)?.text.clone();
    let name = html::first_with_class(row.inner, &join!(row_class, "name"))
        .map(|b| html::strip_tags(b.inner))
        .filter(|n| !n.is_empty())
        .or_else(|| cells.first().map(|c| c.text.clone()))?;
    Some((name, text))
}

fn is_no_hours(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || t == NO_HOURS_MARK || t == "–" || t == "—"
}

/// Does a column header name `day`? A weekday word (full or 3-letter) must
/// match; a `"Mon DD"` date, when present, must match as well.
fn names_day(header: &str, day: NaiveDate) -> bool {
    let lower = header.to_ascii_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let weekday = day.weekday();
    let named = words.iter().any(|w| *w == weekday_name(weekday) || *w == &weekday_name(weekday)[..3]);

    let dated = words.windows(2).find_map(|pair| {
        let month = MONTHS.iter().position(|m| pair[0].starts_with(m))? as u32 + 1;
        let dom: u32 = pair[1].parse().ok()?;
        Some((month, dom))
    });

    match dated {
        Some((month, dom)) => month == day.month() && dom == day.day() && (named || !has_weekday(&words)),
        None => named,
    }
}

fn has_weekday(words: &[&str]) -> bool {
    const ALL: [Weekday; 7] =
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun];
    words.iter().any(|w| ALL.iter().any(|d| *w == weekday_name(*d) || *w == &weekday_name(*d)[..3]))
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

// ---------------------------------------------------------------------------
// Service summary
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceStatus {
    Open,
    Closed,
    /// Hours text present but unreadable.
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    /// `HH:mm-HH:mm` when open; the raw text when unreadable.
    pub hours: Option<String>,
    pub status: ServiceStatus,
}

/// One line per `expected` service of a location. A service matches an entry
/// whose label key contains, or is contained in, the service's key. Missing
/// services are closed; no entries at all means nothing is known.
pub fn service_summary(entries: Option<&[RawScheduleEntry]>, expected: &[&str]) -> Vec<ServiceInfo> {
    expected
        .iter()
        .map(|&name| {
            let Some(entries) = entries else {
                return ServiceInfo { name: s!(name), hours: None, status: ServiceStatus::Unknown };
            };

            let want = normalize_key(name);
            let found = entries.iter().find(|e| {
                let key = normalize_key(&e.label);
                !key.is_empty() && !want.is_empty() && (key.contains(&want) || want.contains(&key))
            });

            let (hours, status) = match found {
                None => (None, ServiceStatus::Closed),
                Some(e) => {
                    let text = e.range_text();
                    match parse::parse(&text) {
                        ParseOutcome::Range(r) => (Some(format_range(&r, TimeFormat::H24)), ServiceStatus::Open),
                        ParseOutcome::Closed => (None, ServiceStatus::Closed),
                        ParseOutcome::Failure => (Some(text), ServiceStatus::Unknown),
                    }
                }
            };
            ServiceInfo { name: s!(name), hours, status }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::POWELL_SERVICES;

    const WEEK: &str = r##"
<table class="s-lc-whw">
  <thead><tr>
    <th>Location</th>
    <th>Sunday<br>Sep 21</th><th>Monday<br>Sep 22</th><th>Tuesday<br>Sep 23</th>
  </tr></thead>
  <tbody>
  <tr class="s-lc-whw-loc">
    <td><span class="s-lc-whw-locname">Powell Library</span> <a href="#">map</a></td>
    <td>-</td><td>7:30am - 12am</td><td>7:30am - 12am</td>
  </tr>
  <tr class="s-lc-whw-subloc">
    <td><span class="s-lc-whw-sublocname">Night Powell</span></td>
    <td>-</td><td>-</td><td>12am - 7:30am</td>
  </tr>
  <tr class="s-lc-whw-subloc">
    <td><span class="s-lc-whw-sublocname">CLICC Classroom Hub</span></td>
    <td>-</td><td>8am - 5pm</td><td>8am - 12pm, 1pm - 5pm</td>
  </tr>
  <tr class="s-lc-whw-loc">
    <td>Music Library</td>
    <td>-</td><td>9am - 5pm</td><td>-</td>
  </tr>
  </tbody>
</table>"##;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn reads_requested_day_column() {
        let got = extract(WEEK, date(23));

        let powell = &got["powelllibrary"];
        assert_eq!(powell[0], RawScheduleEntry::new("Hours", "7:30am", "12am"));
        assert_eq!(powell[1], RawScheduleEntry::new("Night Powell", "12am", "7:30am"));
        assert_eq!(powell[2], RawScheduleEntry::new("CLICC Classroom Hub", "8am", "12pm"));
        assert_eq!(powell[3], RawScheduleEntry::new("CLICC Classroom Hub", "1pm", "5pm"));
        assert_eq!(powell.len(), 4);

        let music = &got["musiclibrary"];
        assert_eq!(music, &vec![RawScheduleEntry::new("Hours", "Closed", "")]);
    }

    #[test]
    fn dash_sub_services_are_dropped() {
        let got = extract(WEEK, date(22));
        let labels: Vec<&str> = got["powelllibrary"].iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Hours", "CLICC Classroom Hub"]);

        let sunday = extract(WEEK, date(21));
        assert_eq!(sunday["powelllibrary"], vec![RawScheduleEntry::new("Hours", "Closed", "")]);
    }

    #[test]
    fn day_outside_the_week_yields_nothing() {
        // a Tuesday, but not Sep 23
        assert!(extract(WEEK, date(30)).is_empty());
    }

    #[test]
    fn plain_weekday_headers() {
        let doc = r#"<table class="s-lc-whw"><tr><th></th><th>Mon</th><th>Tue</th></tr>
            <tr class="s-lc-whw-loc"><td>Arts Library</td><td>9am-5pm</td><td>10am-6pm</td></tr></table>"#;
        assert_eq!(extract(doc, date(22))["artslibrary"][0].start_text, "9am");
        assert_eq!(extract(doc, date(23))["artslibrary"][0].start_text, "10am");
    }

    #[test]
    fn header_matching() {
        assert!(names_day("Tuesday", date(23)));
        assert!(names_day("TUE", date(23)));
        assert!(names_day("Tue, Sep 23", date(23)));
        assert!(names_day("Sep 23", date(23)));
        assert!(!names_day("Tue, Sep 30", date(23)));
        assert!(!names_day("Wednesday Sep 23", date(23)));
        assert!(!names_day("Location", date(23)));
    }

    #[test]
    fn summary_of_powell_services() {
        let got = extract(WEEK, date(23));
        let summary = service_summary(got.get("powelllibrary").map(Vec::as_slice), &POWELL_SERVICES);

        assert_eq!(summary[0].name, "Night Powell");
        assert_eq!(summary[0].status, ServiceStatus::Open);
        assert_eq!(summary[0].hours.as_deref(), Some("00:00-07:30"));
        assert_eq!(summary[1].status, ServiceStatus::Open);
        assert_eq!(summary[1].hours.as_deref(), Some("08:00-12:00"));
        assert_eq!(summary[2].status, ServiceStatus::Closed);
        assert_eq!(summary[2].hours, None);
    }

    #[test]
    fn summary_without_data_is_unknown() {
        let summary = service_summary(None, &["Night Powell"]);
        assert_eq!(summary[0].status, ServiceStatus::Unknown);

        let odd = [RawScheduleEntry::new("Night Powell", "by appointment", "")];
        let summary = service_summary(Some(&odd[..]), &["Night Powell"]);
        assert_eq!(summary[0].status, ServiceStatus::Unknown);
        assert_eq!(summary[0].hours.as_deref(), Some("by appointment"));
    }
}
