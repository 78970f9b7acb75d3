// src/hours/types.rs
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A normalized time range: minutes since midnight, with the end optionally
/// falling on the following calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParsedRange {
    pub start: u16,
    pub end: u16,
    pub overnight: bool,
}

impl ParsedRange {
    /// Applies the overnight rule: an end at or before the start belongs to the next day.
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end, overnight: end <= start }
    }

    pub fn end_day_offset(&self) -> u64 {
        u64::from(self.overnight)
    }

    /// Concrete `(start, end)` instants for the range placed on `day`.
    pub fn anchor(&self, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = day.and_time(NaiveTime::MIN);
        let start = midnight + TimeDelta::minutes(i64::from(self.start));
        let end_day = day.checked_add_days(Days::new(self.end_day_offset())).unwrap_or(day);
        let end = end_day.and_time(NaiveTime::MIN) + TimeDelta::minutes(i64::from(self.end));
        (start, end)
    }
}

/// Result of reading one time-range string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    Range(ParsedRange),
    Closed,
    /// Text matched no known format; callers keep the raw text for display.
    Failure,
}

impl ParseOutcome {
    pub fn range(self) -> Option<ParsedRange> {
        match self {
            ParseOutcome::Range(r) => Some(r),
            _ => None,
        }
    }
}

/// Pre-parse text pulled from markup or a static table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawScheduleEntry {
    pub label: String,
    pub start_text: String,
    pub end_text: String,
}

impl RawScheduleEntry {
    pub fn new(label: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { label: label.into(), start_text: start.into(), end_text: end.into() }
    }

    /// Split a whole cell such as `"7:00 AM - 10:00 AM"` into start/end text.
    /// Cells without a range separator (`"Closed"`, garbage) keep everything in `start_text`.
    pub fn from_cell(label: impl Into<String>, cell: &str) -> Self {
        let label = label.into();
        match super::parse::split_range(cell) {
            Some((start, end)) => Self::new(label, start, end),
            None => Self::new(label, cell.trim(), ""),
        }
    }

    /// Text handed to the range parser.
    pub fn range_text(&self) -> String {
        if self.end_text.is_empty() {
            self.start_text.clone()
        } else {
            format!("{} - {}", self.start_text, self.end_text)
        }
    }
}

/// A contiguous open interval, optionally labeled ("Breakfast", "CLICC", …).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ServiceWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, label: Option<String>) -> Self {
        Self { start, end, label }
    }

    /// Closed interval: both endpoints count as inside.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

/// All windows of one entity on one calendar day, sorted by start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub entity_id: String,
    pub date: NaiveDate,
    pub windows: Vec<ServiceWindow>,
}

impl DaySchedule {
    pub fn is_closed_all_day(&self) -> bool {
        self.windows.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    Open,
    Close,
    MealSwitch,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Open => "open",
            ChangeType::Close => "close",
            ChangeType::MealSwitch => "mealSwitch",
        }
    }
}

/// Open/closed state of an entity at one instant, plus its next transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityStatus {
    pub entity_id: String,
    pub open_now: bool,
    pub current_label: Option<String>,
    pub next_change_at: Option<NaiveDateTime>,
    pub next_change_type: Option<ChangeType>,
}

impl EntityStatus {
    pub fn closed_indefinitely(entity_id: &str) -> Self {
        Self {
            entity_id: s!(entity_id),
            open_now: false,
            current_label: None,
            next_change_at: None,
            next_change_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 23).unwrap()
    }

    #[test]
    fn overnight_range_anchors_end_on_next_day() {
        let r = ParsedRange::new(hm!(22, 0), hm!(2, 0));
        assert!(r.overnight);
        let (start, end) = r.anchor(day());
        assert_eq!(start, day().and_hms_opt(22, 0, 0).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 9, 24).unwrap().and_hms_opt(2, 0, 0).unwrap());
    }

    #[test]
    fn contains_is_closed_on_both_ends() {
        let (start, end) = ParsedRange::new(hm!(7, 0), hm!(9, 0)).anchor(day());
        let w = ServiceWindow::new(start, end, Some(s!("Breakfast")));
        assert!(w.contains(start));
        assert!(w.contains(end));
        assert!(!w.contains(end + TimeDelta::minutes(1)));
    }

    #[test]
    fn cell_split_keeps_closed_text_whole() {
        let e = RawScheduleEntry::from_cell("Lunch", "11:00 AM – 2:00 PM");
        assert_eq!(e.start_text, "11:00 AM");
        assert_eq!(e.end_text, "2:00 PM");
        assert_eq!(e.range_text(), "11:00 AM - 2:00 PM");

        let closed = RawScheduleEntry::from_cell("Dinner", " Closed ");
        assert_eq!(closed.start_text, "Closed");
        assert_eq!(closed.range_text(), "Closed");
    }

    #[test]
    fn status_serializes_to_camel_case() {
        let status = EntityStatus {
            entity_id: s!("BruinPlate"),
            open_now: true,
            current_label: Some(s!("Dinner")),
            next_change_at: day().and_hms_opt(21, 0, 0),
            next_change_type: Some(ChangeType::Close),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["entityId"], "BruinPlate");
        assert_eq!(json["openNow"], true);
        assert_eq!(json["nextChangeAt"], "2025-09-23T21:00:00");
        assert_eq!(json["nextChangeType"], "close");
        assert_eq!(serde_json::to_value(ChangeType::MealSwitch).unwrap(), "mealSwitch");
    }
}
